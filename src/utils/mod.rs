//! Utility modules
//!
//! This module contains the helpers around a conversion:
//! - Error types and result types for the file boundary
//! - Invocation resolution and document I/O
//! - Options files (with the `cli` feature)

#[cfg(feature = "cli")]
pub mod config;
pub mod error;
pub mod files;

// Re-export commonly used items
pub use error::{CliError, CliResult};
pub use files::{read_document, resolve_invocation, write_document, Invocation};
