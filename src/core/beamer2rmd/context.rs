//! Core state and structures for Beamer to R Markdown conversion
//!
//! This module contains the conversion options and the converter struct that
//! drives the pipeline.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::environment::{convert_listings, convert_sections, convert_verbatim};
use super::frame::{convert_frame_reporting, segment_document, Block, Slide};
use super::markup::strip_typography_checked;
use super::metadata::{build_header, extract_metadata};
use super::table::{convert_tables, recover_malformed_tables};
use super::{ConversionResult, ConversionWarning};

// =============================================================================
// Beamer → R Markdown Conversion Options
// =============================================================================

/// Options for Beamer to R Markdown conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RmdOptions {
    /// Target a 16:9 canvas: adds `widescreen: true` to the header and
    /// scales image widths down
    /// Default: false
    pub widescreen: bool,

    /// Syntax highlight theme for the ioslides header; `None` omits the line
    /// Default: "tango"
    pub highlight: Option<String>,

    /// Fence language tag for `lstlisting` blocks
    /// Default: "r"
    pub code_language: String,

    /// Emit the extracted institute as the deck subtitle
    /// Default: false
    pub institute_as_subtitle: bool,
}

impl Default for RmdOptions {
    fn default() -> Self {
        Self {
            widescreen: false,
            highlight: Some("tango".to_string()),
            code_language: "r".to_string(),
            institute_as_subtitle: false,
        }
    }
}

impl RmdOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default options with the widescreen layout enabled
    pub fn widescreen() -> Self {
        Self {
            widescreen: true,
            ..Self::default()
        }
    }
}

/// Beamer to R Markdown converter
///
/// Options are fixed for the lifetime of the converter; every stage receives
/// them explicitly.
#[derive(Debug, Default)]
pub struct RmdConverter {
    options: RmdOptions,
    warnings: Vec<ConversionWarning>,
}

impl RmdConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RmdOptions) -> Self {
        Self {
            options,
            warnings: Vec::new(),
        }
    }

    pub fn options(&self) -> &RmdOptions {
        &self.options
    }

    /// Convert a complete Beamer document to R Markdown
    pub fn convert_document(&mut self, input: &str) -> String {
        self.warnings.clear();

        let metadata = extract_metadata(input);
        debug!(
            "metadata: title={:?} author={:?} institute={:?}",
            metadata.title, metadata.author, metadata.institute
        );
        let mut output = build_header(&metadata, &self.options);

        let text = self.run_global_passes(input);

        let blocks = segment_document(&text);
        let opener_count = text.matches("\\begin{frame}").count();
        let frame_count = blocks
            .iter()
            .filter(|block| matches!(block, Block::Frame(_)))
            .count();
        if frame_count == 0 {
            self.warn(ConversionWarning::no_frames());
        } else if opener_count > frame_count {
            self.warn(ConversionWarning::unsegmented_frames(
                opener_count,
                frame_count,
            ));
        }

        let mut frame_number = 0;
        for block in &blocks {
            let slide = match block {
                Block::Section(title) => Slide::section(title),
                Block::Frame(frame) => {
                    frame_number += 1;
                    debug!("translating frame {} ({:?})", frame_number, frame.title);
                    let location = format!("frame {}", frame_number);
                    let mut frame_warnings = Vec::new();
                    let slide = convert_frame_reporting(
                        frame,
                        &self.options,
                        &location,
                        &mut frame_warnings,
                    );
                    for warning in frame_warnings {
                        self.warn(warning);
                    }
                    slide
                }
            };
            slide.render_into(&mut output);
        }

        output
    }

    /// Convert and keep the warnings collected along the way
    pub fn convert_document_with_diagnostics(&mut self, input: &str) -> ConversionResult {
        let output = self.convert_document(input);
        ConversionResult::with_warnings(output, std::mem::take(&mut self.warnings))
    }

    /// Warnings collected by the last conversion
    pub fn warnings(&self) -> &[ConversionWarning] {
        &self.warnings
    }

    /// Stages that run once over the whole document before segmentation
    fn run_global_passes(&mut self, input: &str) -> String {
        let text = convert_sections(input);
        let text = convert_listings(&text, &self.options.code_language);
        let text = convert_verbatim(&text);

        let (text, unbalanced) = strip_typography_checked(&text);
        if let Some(command) = unbalanced {
            self.warn(ConversionWarning::unbalanced_braces(&command));
        }

        let text = convert_tables(&text);
        recover_malformed_tables(&text)
    }

    fn warn(&mut self, warning: ConversionWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}
