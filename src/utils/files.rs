//! Invocation resolution and document I/O

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::error::{CliError, CliResult};

/// Extension of generated documents
pub const OUTPUT_EXTENSION: &str = "Rmd";

/// Where to read from and write to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Resolve positional arguments into input and output paths.
///
/// With two or more arguments, a final one ending in `.rmd` (any case) is the
/// output; every other argument is joined with spaces into the input path.
/// Without an explicit output the input's extension is replaced.
pub fn resolve_invocation(args: &[String]) -> CliResult<Invocation> {
    if args.is_empty() {
        return Err(CliError::MissingInput);
    }

    let explicit_output = args.len() > 1
        && args
            .last()
            .is_some_and(|last| last.to_lowercase().ends_with(".rmd"));

    let invocation = if explicit_output {
        let (output, inputs) = args.split_last().ok_or(CliError::MissingInput)?;
        Invocation {
            input: PathBuf::from(inputs.join(" ")),
            output: PathBuf::from(output),
        }
    } else {
        let input = PathBuf::from(args.join(" "));
        let output = default_output_path(&input);
        Invocation { input, output }
    };
    debug!("resolved invocation: {:?}", invocation);
    Ok(invocation)
}

/// `talk.tex` -> `talk.Rmd`
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}

/// Read a UTF-8 document, distinguishing a missing file from a read failure
pub fn read_document(path: &Path) -> CliResult<String> {
    if !path.exists() {
        return Err(CliError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the converted document
pub fn write_document(path: &Path, content: &str) -> CliResult<()> {
    fs::write(path, content).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}
