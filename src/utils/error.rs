//! Error handling for the file and command-line boundary
//!
//! The converter itself never fails; only sourcing and persisting documents
//! can.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised around a conversion (never by it)
#[derive(Debug, Error)]
pub enum CliError {
    /// No input path was given
    #[error("No input file specified.")]
    MissingInput,
    /// The input path does not exist
    #[error("Input file '{}' not found.", path.display())]
    InputNotFound { path: PathBuf },
    /// Reading the input failed
    #[error("Error reading input file: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing the output failed
    #[error("Error writing output file: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An options file could not be loaded
    #[error("Error loading config '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },
}

/// Result type for boundary operations
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Wrong invocations are reported together with the usage line
    pub fn wants_usage(&self) -> bool {
        matches!(self, CliError::MissingInput)
    }
}
