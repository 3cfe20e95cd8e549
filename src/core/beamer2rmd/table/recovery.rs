//! Line-scan recovery for pipe tables the structured translator missed
//!
//! Every pass here is idempotent: running it over clean Markdown leaves the
//! text unchanged.

use lazy_static::lazy_static;
use regex::Regex;

use super::parser::{is_separator_row, separator_columns, separator_row};
use crate::core::beamer2rmd::utils::pipe_count;

lazy_static! {
    static ref WIDTH_LEAK_RE: Regex =
        Regex::new(r"\|\s*p\{\d+(?:\.\d+)?(?:cm|in|pt|em|ex|mm)\}\s*").unwrap();
}

fn looks_like_row(line: &str) -> bool {
    pipe_count(line) >= 2 && !line.trim().starts_with('\\')
}

/// Half-open line ranges of consecutive table-like lines
fn find_table_runs(lines: &[String]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;
    for (i, line) in lines.iter().enumerate() {
        if looks_like_row(line) {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start {
            // Command lines that still carry pipes stay inside the run
            if pipe_count(line) < 2 || line.trim().is_empty() {
                runs.push((s, i));
                start = None;
            }
        }
    }
    if let Some(s) = start {
        runs.push((s, lines.len()));
    }
    runs
}

fn fence_row(line: &str) -> String {
    let mut row = line.to_string();
    if !row.starts_with('|') {
        row.insert_str(0, "| ");
    }
    if !row.ends_with('|') {
        row.push_str(" |");
    }
    row
}

fn clean_run(run: &[String]) -> Vec<String> {
    let has_separator = run.first().is_some_and(|line| is_separator_row(line))
        || run.get(1).is_some_and(|line| is_separator_row(line));
    let mut cleaned = Vec::with_capacity(run.len() + 1);
    for (i, line) in run.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('\\') {
            continue;
        }
        let row = fence_row(trimmed);
        let columns = pipe_count(&row).saturating_sub(1);
        cleaned.push(row);
        if i == 0 && !has_separator {
            cleaned.push(separator_row(columns));
        }
    }
    cleaned
}

/// Force pipe fencing on runs of pipe-delimited lines and give each run a
/// header separator below its first line when it lacks one.
pub fn recover_malformed_tables(text: &str) -> String {
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    let runs = find_table_runs(&lines);
    for (start, end) in runs.into_iter().rev() {
        let cleaned = clean_run(&lines[start..end]);
        if !cleaned.is_empty() {
            lines.splice(start..end, std::iter::once(cleaned.join("\n")));
        }
    }
    lines.join("\n")
}

/// Drop a separator row that directly follows another of the same width
/// (blank lines in between included).
pub fn collapse_duplicate_separators(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for line in text.split('\n') {
        if let Some(columns) = separator_columns(line) {
            let previous = kept.iter().rposition(|l| !l.trim().is_empty());
            if let Some(idx) = previous {
                if separator_columns(kept[idx]) == Some(columns) {
                    kept.truncate(idx + 1);
                    continue;
                }
            }
        }
        kept.push(line);
    }
    kept.join("\n")
}

/// Remove `p{3cm}`-style column widths that leaked into emitted rows
pub fn strip_width_leaks(text: &str) -> String {
    WIDTH_LEAK_RE.replace_all(text, "| ").into_owned()
}
