//! Beamer LaTeX to R Markdown converter
//!
//! This module implements the pattern-driven Beamer to ioslides converter.
//! The document is rewritten stage by stage: metadata and header first, then
//! the global passes (sections, listings, verbatim, typography, tables), then
//! frame segmentation and per-frame body translation.

pub mod context;
mod environment;
mod frame;
mod markup;
mod metadata;
mod table;
mod utils;

use serde::Serialize;

pub use context::{RmdConverter, RmdOptions};
pub use environment::{convert_listings, convert_sections, convert_verbatim};
pub use frame::{convert_frame, segment_frames, Frame, Slide};
pub use markup::{compute_image_width, strip_typography};
pub use metadata::{build_header, extract_metadata, Metadata};
pub use table::{convert_tables, recover_malformed_tables};

// =============================================================================
// Warning System
// =============================================================================

/// Kind of best-effort fallback taken during conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A size command had no matching closing brace; typography stripping stopped
    UnbalancedBraces,
    /// A table environment could not be translated and was kept verbatim
    TablePassthrough,
    /// A frame opener was not segmented (missing title braces)
    UnsegmentedFrame,
    /// The document contains no frames at all
    NoFrames,
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarningKind::UnbalancedBraces => write!(f, "unbalanced braces"),
            WarningKind::TablePassthrough => write!(f, "table passthrough"),
            WarningKind::UnsegmentedFrame => write!(f, "unsegmented frame"),
            WarningKind::NoFrames => write!(f, "no frames"),
        }
    }
}

/// A warning generated during Beamer to R Markdown conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionWarning {
    /// The kind of warning
    pub kind: WarningKind,
    /// Human-readable message
    pub message: String,
    /// Location context (e.g., "\\scriptsize" or "frame 3")
    pub location: Option<String>,
}

impl ConversionWarning {
    /// Create a new warning
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        ConversionWarning {
            kind,
            message: message.into(),
            location: None,
        }
    }

    /// Add location context to the warning
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn unbalanced_braces(command: &str) -> Self {
        ConversionWarning::new(
            WarningKind::UnbalancedBraces,
            format!(
                "No closing brace for '{}'; remaining size commands left unchanged",
                command
            ),
        )
        .with_location(command.to_string())
    }

    pub fn table_passthrough(location: &str, opener: &str) -> Self {
        ConversionWarning::new(
            WarningKind::TablePassthrough,
            format!(
                "Table environment '{}' without a tabular body was kept unchanged",
                opener.trim()
            ),
        )
        .with_location(location.to_string())
    }

    pub fn unsegmented_frames(found: usize, segmented: usize) -> Self {
        ConversionWarning::new(
            WarningKind::UnsegmentedFrame,
            format!(
                "{} frame opener(s) found but only {} frame(s) segmented",
                found, segmented
            ),
        )
    }

    pub fn no_frames() -> Self {
        ConversionWarning::new(
            WarningKind::NoFrames,
            "No frame environments found; output contains only the header",
        )
    }
}

impl std::fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref loc) = self.location {
            write!(f, "[{}] {}: {}", self.kind, loc, self.message)
        } else {
            write!(f, "[{}] {}", self.kind, self.message)
        }
    }
}

/// Result of conversion with diagnostics
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// The converted output
    pub output: String,
    /// Warnings generated during conversion
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionResult {
    /// Create a new result with no warnings
    pub fn ok(output: String) -> Self {
        ConversionResult {
            output,
            warnings: Vec::new(),
        }
    }

    /// Create a result with warnings
    pub fn with_warnings(output: String, warnings: Vec<ConversionWarning>) -> Self {
        ConversionResult { output, warnings }
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Get warnings as formatted strings
    pub fn format_warnings(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.to_string()).collect()
    }
}

/// Convert a Beamer document to an R Markdown ioslides document
pub fn convert(input: &str, widescreen: bool) -> String {
    let options = RmdOptions {
        widescreen,
        ..RmdOptions::default()
    };
    convert_with_options(input, &options)
}

/// Convert a Beamer document with explicit options
pub fn convert_with_options(input: &str, options: &RmdOptions) -> String {
    let mut converter = RmdConverter::with_options(options.clone());
    converter.convert_document(input)
}

/// Convert a Beamer document and report every fallback that was taken
///
/// # Example
///
/// ```
/// use beamer2rmd::{convert_with_diagnostics, RmdOptions};
///
/// let result = convert_with_diagnostics(r"\small{unclosed", &RmdOptions::default());
/// for warning in &result.warnings {
///     eprintln!("Warning: {}", warning);
/// }
/// assert!(result.has_warnings());
/// ```
pub fn convert_with_diagnostics(input: &str, options: &RmdOptions) -> ConversionResult {
    let mut converter = RmdConverter::with_options(options.clone());
    converter.convert_document_with_diagnostics(input)
}
