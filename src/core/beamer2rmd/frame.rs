//! Frame segmentation and per-frame translation

use lazy_static::lazy_static;
use regex::Regex;

use super::context::RmdOptions;
use super::environment::{
    convert_centering, convert_enumerate, convert_figures, convert_itemize, convert_stray_items,
};
use super::markup::{
    convert_bullets, convert_colors, convert_hrefs, convert_images, convert_residual_footnotes,
    convert_text_footnotes, convert_url_footnotes, convert_urls, final_cleanup,
};
use super::table::convert_frame_tables;
use super::ConversionWarning;

/// Title token asking for a blank heading (or a centered slide)
const CENTER_MARKER: &str = "~";
const BRACED_CENTER_MARKER: &str = "{~}";

lazy_static! {
    /// The title is the first brace group after the opener; frames without
    /// one are not segmented.
    static ref FRAME_RE: Regex =
        Regex::new(r"(?s)\\begin\{frame\}.*?\{(.*?)\}(.*?)\\end\{frame\}").unwrap();
    static ref SECTION_HEADING_RE: Regex = Regex::new(r"^[ \t]*## (.+?)[ \t]*$").unwrap();
}

/// One slide of the source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub title: String,
    pub body: String,
}

/// A translated slide, ready for assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    /// `## Title`, or a bare `##`
    pub heading: String,
    pub body: String,
}

impl Slide {
    /// Slide produced by a section heading outside any frame
    pub fn section(title: &str) -> Self {
        Slide {
            heading: format!("## {}", title),
            body: String::new(),
        }
    }

    /// Append `\n<heading>\n<trimmed body>\n`
    pub fn render_into(&self, output: &mut String) {
        output.push('\n');
        output.push_str(&self.heading);
        output.push('\n');
        output.push_str(self.body.trim());
        output.push('\n');
    }
}

/// Document piece in output order
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Block {
    Section(String),
    Frame(Frame),
}

/// Every frame of the document, in document order
pub fn segment_frames(text: &str) -> Vec<Frame> {
    FRAME_RE
        .captures_iter(text)
        .map(|caps| Frame {
            title: caps[1].to_string(),
            body: caps[2].to_string(),
        })
        .collect()
}

/// Frames plus the section headings found between them
pub(crate) fn segment_document(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut cursor = 0;
    for caps in FRAME_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        push_sections(&text[cursor..whole.start()], &mut blocks);
        blocks.push(Block::Frame(Frame {
            title: caps[1].to_string(),
            body: caps[2].to_string(),
        }));
        cursor = whole.end();
    }
    push_sections(&text[cursor..], &mut blocks);
    blocks
}

/// Section headings in the text between frames. Lines inside code fences
/// are program output, not headings.
fn push_sections(gap: &str, blocks: &mut Vec<Block>) {
    let mut in_fence = false;
    for line in gap.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(caps) = SECTION_HEADING_RE.captures(line) {
            blocks.push(Block::Section(caps[1].to_string()));
        }
    }
}

/// How a frame title is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
enum TitleKind {
    /// `~` title with content: the body becomes a centered div
    Centered,
    /// `~` or `{~}` on its own: a blank heading
    Blank,
    Heading(String),
}

fn classify_title(title: &str, body: &str) -> TitleKind {
    let trimmed = title.trim();
    if trimmed == CENTER_MARKER && !body.trim().is_empty() {
        TitleKind::Centered
    } else if trimmed == CENTER_MARKER || trimmed == BRACED_CENTER_MARKER {
        TitleKind::Blank
    } else {
        TitleKind::Heading(render_title(title))
    }
}

/// Links and footnotes inside the title text itself
fn render_title(title: &str) -> String {
    let title = convert_hrefs(title);
    let title = convert_url_footnotes(&title);
    let title = convert_text_footnotes(&title);
    let title = title.trim();
    if title.is_empty() {
        "##".to_string()
    } else {
        format!("## {}", title)
    }
}

fn centered_body(text: &str) -> String {
    format!(
        "<div style=\"display: flex; align-items: center; justify-content: center; height: 400px;\">\n\
<div style=\"font-size: 36px; text-align: center;\">{}</div>\n\
</div>",
        text
    )
}

/// Translate one frame into a slide
pub fn convert_frame(frame: &Frame, options: &RmdOptions) -> Slide {
    convert_frame_reporting(frame, options, "frame", &mut Vec::new())
}

/// Like [`convert_frame`], collecting fallbacks under `location`
pub(crate) fn convert_frame_reporting(
    frame: &Frame,
    options: &RmdOptions,
    location: &str,
    warnings: &mut Vec<ConversionWarning>,
) -> Slide {
    let body = frame.body.replace("\n      ", "\n");

    match classify_title(&frame.title, &body) {
        TitleKind::Centered => Slide {
            heading: "##".to_string(),
            body: centered_body(body.trim()),
        },
        TitleKind::Blank => Slide {
            heading: "##".to_string(),
            body: translate_body(&body, options, location, warnings),
        },
        TitleKind::Heading(heading) => Slide {
            heading,
            body: translate_body(&body, options, location, warnings),
        },
    }
}

/// The per-frame body pipeline
fn translate_body(
    body: &str,
    options: &RmdOptions,
    location: &str,
    warnings: &mut Vec<ConversionWarning>,
) -> String {
    let widescreen = options.widescreen;

    let text = convert_hrefs(body);
    let text = convert_url_footnotes(&text);
    let text = convert_urls(&text);
    let text = convert_text_footnotes(&text);
    let text = convert_colors(&text);
    let text = convert_bullets(&text);
    let text = convert_frame_tables(&text, location, warnings);
    let text = convert_figures(&text, widescreen);
    let text = convert_images(&text, widescreen);
    let text = convert_centering(&text);
    let text = convert_itemize(&text);
    let text = convert_enumerate(&text);
    let text = convert_stray_items(&text);
    let text = final_cleanup(&text);
    convert_residual_footnotes(&text)
}
