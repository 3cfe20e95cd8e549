use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const DECK: &str = "\\title{Demo}\n\\begin{document}\n\\begin{frame}{Hello}\n\\begin{itemize}\n\\item One\n\\end{itemize}\n\\end{frame}\n\\end{document}\n";

#[test]
fn converts_to_derived_output_path() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("talk.tex");
    fs::write(&input, DECK).unwrap();

    let mut cmd = cargo_bin_cmd!("b2r");
    cmd.arg(input.as_os_str())
        .assert()
        .success()
        .stdout(predicate::str::contains("(Widescreen: false)..."))
        .stdout(predicate::str::contains("Conversion successful! Output saved to"));

    let output = fs::read_to_string(dir.path().join("talk.Rmd")).unwrap();
    assert!(output.contains("title: \"Demo\""));
    assert!(output.contains("## Hello\n- One"));
}

#[test]
fn writes_explicit_output_path() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("talk.tex");
    let output = dir.path().join("slides.Rmd");
    fs::write(&input, DECK).unwrap();

    let mut cmd = cargo_bin_cmd!("b2r");
    cmd.arg(input.as_os_str()).arg(output.as_os_str());
    cmd.assert().success();

    assert!(output.exists());
    assert!(!dir.path().join("talk.Rmd").exists());
}

#[test]
fn widescreen_flag_after_paths() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("talk.tex");
    fs::write(&input, DECK).unwrap();

    let mut cmd = cargo_bin_cmd!("b2r");
    cmd.arg(input.as_os_str())
        .arg("--widescreen")
        .assert()
        .success()
        .stdout(predicate::str::contains("(Widescreen: true)"));

    let output = fs::read_to_string(dir.path().join("talk.Rmd")).unwrap();
    assert!(output.contains("    widescreen: true\n"));
}

#[test]
fn config_file_sets_options() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("talk.tex");
    let config = dir.path().join("b2r.toml");
    fs::write(&input, DECK).unwrap();
    fs::write(&config, "highlight = \"pygments\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("b2r");
    cmd.arg("--config")
        .arg(config.as_os_str())
        .arg(input.as_os_str())
        .assert()
        .success();

    let output = fs::read_to_string(dir.path().join("talk.Rmd")).unwrap();
    assert!(output.contains("    highlight: pygments\n"));
}

#[test]
fn warnings_log_is_json() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("empty.tex");
    let log = dir.path().join("warnings.json");
    fs::write(&input, "\\title{Nothing here}\n").unwrap();

    let mut cmd = cargo_bin_cmd!("b2r");
    cmd.arg(input.as_os_str())
        .arg("--warnings-log")
        .arg(log.as_os_str())
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&log).unwrap()).unwrap();
    assert_eq!(json[0]["kind"], "no_frames");
}

#[test]
fn missing_argument_prints_usage() {
    let mut cmd = cargo_bin_cmd!("b2r");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage: b2r"));
}

#[test]
fn nonexistent_input_fails() {
    let dir = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("b2r");
    cmd.arg(dir.path().join("missing.tex").as_os_str())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Converting").not())
        .stderr(predicate::str::contains("not found"));
}
