//! b2r - Beamer LaTeX to R Markdown (ioslides) converter

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use std::process::ExitCode;

#[cfg(feature = "cli")]
use beamer2rmd::{
    convert_with_diagnostics,
    utils::config::load_options,
    utils::files::{read_document, resolve_invocation, write_document},
    CliResult, RmdOptions,
};

#[cfg(feature = "cli")]
const USAGE: &str = "Usage: b2r [--widescreen] input.tex [output.Rmd]";

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "b2r")]
#[command(version)]
#[command(about = "Convert Beamer LaTeX slides to R Markdown ioslides", long_about = None)]
struct Cli {
    /// Input file, optionally followed by an output file ending in .Rmd
    ///
    /// Unquoted input paths containing spaces are joined back together.
    paths: Vec<String>,

    /// Use the 16:9 ioslides layout
    #[arg(long)]
    widescreen: bool,

    /// Read conversion options from a TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write conversion warnings as JSON to this path
    #[arg(long)]
    warnings_log: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

#[cfg(feature = "cli")]
fn run(cli: &Cli) -> CliResult<()> {
    let invocation = resolve_invocation(&cli.paths)?;

    let mut options = match cli.config {
        Some(ref path) => load_options(path)?,
        None => RmdOptions::default(),
    };
    options.widescreen |= cli.widescreen;

    let input = read_document(&invocation.input)?;

    println!(
        "Converting {} to {} (Widescreen: {})...",
        invocation.input.display(),
        invocation.output.display(),
        options.widescreen
    );
    let result = convert_with_diagnostics(&input, &options);

    if let Some(ref path) = cli.warnings_log {
        // Warnings serialize infallibly; only the write can fail.
        let json = serde_json::to_string_pretty(&result.warnings).unwrap_or_default();
        write_document(path, &json)?;
    }

    write_document(&invocation.output, &result.output)?;
    println!(
        "Conversion successful! Output saved to {}",
        invocation.output.display()
    );
    Ok(())
}

#[cfg(feature = "cli")]
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            if err.wants_usage() {
                eprintln!("{}", USAGE);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install beamer2rmd --features cli");
    eprintln!("  b2r [--widescreen] input.tex [output.Rmd]");
}
