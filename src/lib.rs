//! beamer2rmd - Beamer LaTeX to R Markdown (ioslides) converter
//!
//! The converter is a linear pipeline of pattern-driven rewrites over one
//! text buffer: preamble metadata, global environment translation, frame
//! segmentation, then per-frame body translation.
//!
//! # Example
//!
//! ```
//! use beamer2rmd::convert;
//!
//! let input = r"\begin{frame}{Overview}
//! \begin{itemize}
//! \item First
//! \item Second
//! \end{itemize}
//! \end{frame}";
//! let output = convert(input, false);
//! assert!(output.contains("## Overview"));
//! assert!(output.contains("- First"));
//! ```

pub mod core;
pub mod utils;

pub use crate::core::beamer2rmd::{
    build_header, compute_image_width, convert, convert_frame, convert_listings,
    convert_sections, convert_tables, convert_verbatim, convert_with_diagnostics,
    convert_with_options, extract_metadata, recover_malformed_tables, segment_frames,
    strip_typography, ConversionResult, ConversionWarning, Frame, Metadata, RmdConverter,
    RmdOptions, Slide, WarningKind,
};
pub use crate::utils::error::{CliError, CliResult};
