//! Inline markup handling for Beamer to R Markdown conversion
//!
//! Typography, hyperlinks, footnotes, colors, images and the final
//! whitespace cleanup of a frame body.

use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};

use super::utils::find_matching_brace;

/// Width scale applied under the widescreen layout
const WIDESCREEN_SCALE: f64 = 0.75;

/// Fixed height of embedded PDF frames
const PDF_FRAME_HEIGHT: &str = "500px";

lazy_static! {
    static ref SIZE_CMD_RE: Regex = Regex::new(
        r"\\(scriptsize|tiny|small|large|Large|LARGE|huge|Huge)\s*\{"
    )
    .unwrap();
    static ref HREF_RE: Regex = Regex::new(r"\\href\{(.*?)\}\{(.*?)\}").unwrap();
    static ref URL_RE: Regex = Regex::new(r"\\url\{([^{}]+)\}").unwrap();
    static ref FOOTNOTE_URL_RE: Regex = Regex::new(r"\\footnote\{\\url\{([^{}]+)\}\}").unwrap();
    static ref FOOTNOTE_RE: Regex = Regex::new(r"\\footnote\{([^{}]+)\}").unwrap();
    static ref RESIDUAL_FOOTNOTE_RE: Regex =
        Regex::new(r"\\footnote\{[^}]*\\url\{([^}]+)\}[^}]*\}").unwrap();
    static ref BRACED_COLOR_RE: Regex = Regex::new(r"\{\\color\{([^}]+)\}([^}]+)\}").unwrap();
    static ref TEXTCOLOR_RE: Regex = Regex::new(r"\\textcolor\{([^}]+)\}\{([^}]+)\}").unwrap();
    static ref COLOR_RE: Regex = Regex::new(r"\\color\{([^}]+)\}").unwrap();
    static ref BULLET_RE: Regex = Regex::new(r"\\textbullet\s*").unwrap();
    static ref IMAGE_RE: Regex = Regex::new(r"\\includegraphics(\[.*?\])?\{(.*?)\}").unwrap();
    static ref WIDTH_RE: Regex = Regex::new(r"width=([\d.]+)\\(?:textwidth|linewidth)").unwrap();
    static ref CENTER_BLOCK_RE: Regex = Regex::new(r"(?s)<center>(.*?)</center>").unwrap();
    static ref IMG_TAG_RE: Regex = Regex::new(r"(<img .*?>)").unwrap();
    static ref IFRAME_TAG_RE: Regex = Regex::new(r"(<iframe .*?</iframe>)").unwrap();
    static ref DASH_INDENT_RE: Regex = Regex::new(r"\n\s+(-\s+)").unwrap();
    static ref GLYPH_INDENT_RE: Regex = Regex::new(r"\n\s+(•\s+)").unwrap();
    static ref BLANK_RUN_RE: Regex = Regex::new(r"\n{3,}").unwrap();
}

// =============================================================================
// Typography
// =============================================================================

/// Remove size commands (`\small{...}`, `\Large{...}`, ...) keeping their text
pub fn strip_typography(input: &str) -> String {
    strip_typography_checked(input).0
}

/// Like [`strip_typography`], also naming the command whose brace never
/// closed. Stripping stops at that command.
pub(crate) fn strip_typography_checked(input: &str) -> (String, Option<String>) {
    let mut text = input.to_string();
    loop {
        let found = SIZE_CMD_RE.captures(&text).and_then(|caps| {
            let whole = caps.get(0)?;
            Some((whole.start(), whole.end() - 1, caps[1].to_string()))
        });
        let Some((start, open, name)) = found else {
            return (text, None);
        };
        match find_matching_brace(&text, open) {
            Some(close) => {
                let inner = text[open + 1..close].to_string();
                text.replace_range(start..close + 1, &inner);
            }
            None => return (text, Some(format!("\\{}", name))),
        }
    }
}

// =============================================================================
// Links and footnotes
// =============================================================================

/// `\href{url}{text}` to an anchor opening in a new tab
pub fn convert_hrefs(content: &str) -> String {
    HREF_RE
        .replace_all(content, |caps: &Captures| {
            match (caps.get(1), caps.get(2)) {
                (Some(url), Some(text)) => format!(
                    "<a href=\"{}\" target=\"_blank\">{}</a>",
                    url.as_str(),
                    text.as_str()
                ),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// `\url{u}` to an anchor labelled with the URL itself
pub fn convert_urls(content: &str) -> String {
    URL_RE
        .replace_all(content, "<a href=\"${1}\" target=\"_blank\">${1}</a>")
        .into_owned()
}

fn arrow_link(url: &str) -> String {
    format!(" <a href=\"{}\" target=\"_blank\">↗</a>", url.trim())
}

/// Footnotes wrapping a bare URL become arrow links
pub fn convert_url_footnotes(content: &str) -> String {
    FOOTNOTE_URL_RE
        .replace_all(content, |caps: &Captures| arrow_link(&caps[1]))
        .into_owned()
}

/// Plain-text footnotes become small inline text
pub fn convert_text_footnotes(content: &str) -> String {
    FOOTNOTE_RE
        .replace_all(content, " <small>${1}</small>")
        .into_owned()
}

/// Last-chance pass for footnotes that still carry a `\url{}` somewhere
pub fn convert_residual_footnotes(content: &str) -> String {
    RESIDUAL_FOOTNOTE_RE
        .replace_all(content, |caps: &Captures| arrow_link(&caps[1]))
        .into_owned()
}

// =============================================================================
// Colors and glyphs
// =============================================================================

fn color_span(color: &str, text: &str) -> String {
    format!("<span style=\"color:{}\">{}</span>", color, text)
}

/// Convert the three color idioms into styled spans.
///
/// `{\color{c} text}` and `\textcolor{c}{text}` are matched first. A bare
/// `\color{c}` then colors everything up to the next backslash or line end.
pub fn convert_colors(content: &str) -> String {
    let text = BRACED_COLOR_RE.replace_all(content, |caps: &Captures| {
        color_span(&caps[1], caps[2].trim_start())
    });
    let text = TEXTCOLOR_RE.replace_all(&text, |caps: &Captures| color_span(&caps[1], &caps[2]));
    convert_bare_colors(&text)
}

fn convert_bare_colors(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for caps in COLOR_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() < cursor {
            continue;
        }
        let rest = &text[whole.end()..];
        let span_len = rest.find(['\\', '\n']).unwrap_or(rest.len());
        out.push_str(&text[cursor..whole.start()]);
        out.push_str(&color_span(&caps[1], &rest[..span_len]));
        cursor = whole.end() + span_len;
    }
    out.push_str(&text[cursor..]);
    out
}

/// `\textbullet` to the bullet glyph
pub fn convert_bullets(content: &str) -> String {
    BULLET_RE.replace_all(content, "• ").into_owned()
}

// =============================================================================
// Images
// =============================================================================

/// Resolve the rendered width of an image from its `[...]` options.
///
/// `width=0.5\textwidth` becomes `50%`, scaled by 0.75 under widescreen.
/// Without an explicit width the default is `100%` (or `80%` widescreen).
pub fn compute_image_width(options: &str, widescreen: bool) -> String {
    let explicit = WIDTH_RE
        .captures(options)
        .and_then(|caps| caps[1].parse::<f64>().ok());
    match explicit {
        Some(fraction) => {
            let mut percentage = fraction * 100.0;
            if widescreen {
                percentage *= WIDESCREEN_SCALE;
            }
            // Ties go to the even percentage: 52.5 renders as 52
            format!("{}%", percentage.round_ties_even() as i64)
        }
        None if widescreen => "80%".to_string(),
        None => "100%".to_string(),
    }
}

/// Render one image reference as `<img>`, or `<iframe>` for PDF targets
pub fn render_image(path: &str, options: &str, widescreen: bool) -> String {
    let width = compute_image_width(options, widescreen);
    if path.to_lowercase().ends_with(".pdf") {
        format!(
            "<iframe src=\"{}\" width=\"{}\" height=\"{}\"></iframe>",
            path, width, PDF_FRAME_HEIGHT
        )
    } else {
        format!("<img src=\"{}\" width=\"{}\">", path, width)
    }
}

/// Convert every `\includegraphics[opts]{path}` in `content`
pub fn convert_images(content: &str, widescreen: bool) -> String {
    IMAGE_RE
        .replace_all(content, |caps: &Captures| {
            let options = caps.get(1).map_or("", |m| m.as_str());
            render_image(&caps[2], options, widescreen)
        })
        .into_owned()
}

// =============================================================================
// Final cleanup
// =============================================================================

/// Structural whitespace cleanup, applied in order:
/// blank lines around center blocks, images and iframes on their own line,
/// no indentation before bullets, at most one blank line in a row.
pub fn final_cleanup(content: &str) -> String {
    let text = CENTER_BLOCK_RE.replace_all(content, "\n<center>\n${1}\n</center>\n");
    let text = IMG_TAG_RE.replace_all(&text, "\n${1}\n");
    let text = IFRAME_TAG_RE.replace_all(&text, "\n${1}\n");
    let text = DASH_INDENT_RE.replace_all(&text, "\n${1}");
    let text = GLYPH_INDENT_RE.replace_all(&text, "\n${1}");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");
    debug!("cleanup reduced body from {} to {} bytes", content.len(), text.len());
    text.into_owned()
}
