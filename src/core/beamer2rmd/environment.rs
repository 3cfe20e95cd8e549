//! Environment handling for Beamer to R Markdown conversion
//!
//! This module handles sections, code blocks, figures, centering and list
//! environments.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::markup::convert_images;
use super::utils::{extract_command_argument, strip_leading_option};

/// Maximum itemize nesting unwound by the innermost-first passes.
///
/// Deeper lists keep their outer `\begin{itemize}` markers.
pub const MAX_LIST_NESTING: usize = 5;

const ITEMIZE_BEGIN: &str = "\\begin{itemize}";
const ITEMIZE_END: &str = "\\end{itemize}";

lazy_static! {
    static ref SECTION_RE: Regex = Regex::new(r"\\section\*?\{(.*?)\}").unwrap();
    static ref LISTING_RE: Regex =
        Regex::new(r"(?s)\\begin\{lstlisting\}(.*?)\\end\{lstlisting\}").unwrap();
    static ref VERBATIM_RE: Regex =
        Regex::new(r"(?s)\\begin\{verbatim\}(.*?)\\end\{verbatim\}").unwrap();
    static ref DOUBLE_DOLLAR_RE: Regex =
        Regex::new(r"([a-zA-Z0-9_.]+)\$\$([a-zA-Z0-9_.]+)").unwrap();
    static ref FIGURE_RE: Regex =
        Regex::new(r"(?s)\\begin\{figure\}(.*?)\\end\{figure\}").unwrap();
    static ref LABEL_RE: Regex = Regex::new(r"\\label\{[^}]*\}").unwrap();
    static ref CENTER_RE: Regex =
        Regex::new(r"(?s)\\begin\{center\}(.*?)\\end\{center\}").unwrap();
    static ref ENUMERATE_RE: Regex =
        Regex::new(r"(?s)\\begin\{enumerate\}(.*?)\\end\{enumerate\}").unwrap();
    static ref ITEM_RE: Regex = Regex::new(r"\\item\s+").unwrap();
}

// =============================================================================
// Global passes
// =============================================================================

/// Rewrite `\section{X}` into `## X` everywhere in the document
pub fn convert_sections(input: &str) -> String {
    SECTION_RE.replace_all(input, "## ${1}").into_owned()
}

/// Rewrite `lstlisting` blocks into fenced code blocks tagged with `language`.
///
/// Backslashes are doubled and the `df$$col` idiom is folded back to `df$col`.
pub fn convert_listings(input: &str, language: &str) -> String {
    LISTING_RE
        .replace_all(input, |caps: &Captures| {
            let code = strip_leading_option(&caps[1]).trim();
            let code = code.replace('\\', "\\\\");
            let code = DOUBLE_DOLLAR_RE.replace_all(&code, |c: &Captures| {
                format!("{}${}", &c[1], &c[2])
            });
            format!("\n```{}\n{}\n```\n", language, code)
        })
        .into_owned()
}

/// Rewrite `verbatim` blocks into untagged fenced blocks, content untouched
pub fn convert_verbatim(input: &str) -> String {
    VERBATIM_RE
        .replace_all(input, |caps: &Captures| {
            format!("\n```\n{}\n```\n", caps[1].trim())
        })
        .into_owned()
}

// =============================================================================
// Frame body passes
// =============================================================================

/// Convert figure environments: image(s) followed by an italic centered caption
pub fn convert_figures(content: &str, widescreen: bool) -> String {
    FIGURE_RE
        .replace_all(content, |caps: &Captures| {
            render_figure(&caps[1], widescreen)
        })
        .into_owned()
}

fn render_figure(raw: &str, widescreen: bool) -> String {
    let mut body = strip_leading_option(raw.trim()).to_string();

    let mut caption = String::new();
    if let Some((span, text)) = extract_command_argument(&body, "\\caption") {
        caption = text;
        body.replace_range(span, "");
    }
    let body = LABEL_RE.replace_all(&body, "");

    let centered = body.contains("\\centering");
    let body = body.replace("\\centering", "");
    let body = convert_images(&body, widescreen);

    let caption_html = if caption.is_empty() {
        String::new()
    } else {
        format!(
            "<div style=\"text-align: center; font-style: italic; margin-top: 8px;\">{}</div>",
            caption
        )
    };

    if centered {
        format!("<center>\n{}\n{}</center>", body.trim(), caption_html)
    } else {
        format!("{}\n{}", body.trim(), caption_html)
    }
}

/// Convert paired center environments, then any stray markers
pub fn convert_centering(content: &str) -> String {
    let paired = CENTER_RE.replace_all(content, |caps: &Captures| {
        format!("<center>{}</center>", caps[1].trim())
    });
    paired
        .replace("\\begin{center}", "<center>")
        .replace("\\end{center}", "</center>")
}

/// Resolve nested itemize environments inside-out
pub fn convert_itemize(content: &str) -> String {
    let mut text = content.to_string();
    for _ in 0..MAX_LIST_NESTING {
        if !text.contains(ITEMIZE_BEGIN) {
            break;
        }
        text = convert_innermost_itemize(&text);
    }
    text
}

/// One pass: convert every itemize block that contains no other itemize
fn convert_innermost_itemize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut search = 0;

    while let Some(rel) = text[search..].find(ITEMIZE_BEGIN) {
        let begin = search + rel;
        let inner_start = begin + ITEMIZE_BEGIN.len();
        let Some(end_rel) = text[inner_start..].find(ITEMIZE_END) else {
            break;
        };
        let end = inner_start + end_rel;
        let inner = &text[inner_start..end];

        if inner.contains(ITEMIZE_BEGIN) {
            // Not innermost; the nested opener is tried next
            search = inner_start;
            continue;
        }

        out.push_str(&text[cursor..begin]);
        out.push_str(&render_bullets(inner));
        cursor = end + ITEMIZE_END.len();
        search = cursor;
    }

    out.push_str(&text[cursor..]);
    out
}

fn split_items(items_text: &str) -> Vec<&str> {
    ITEM_RE
        .split(items_text.trim())
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

fn render_bullets(items_text: &str) -> String {
    let lines: Vec<String> = split_items(items_text)
        .into_iter()
        .map(|item| format!("    - {}", item))
        .collect();
    format!("\n{}\n", lines.join("\n"))
}

/// Convert enumerate environments into `1.`..`N.` lists
pub fn convert_enumerate(content: &str) -> String {
    ENUMERATE_RE
        .replace_all(content, |caps: &Captures| {
            let lines: Vec<String> = split_items(&caps[1])
                .into_iter()
                .enumerate()
                .map(|(i, item)| format!("{}. {}", i + 1, item))
                .collect();
            format!("\n{}\n", lines.join("\n"))
        })
        .into_owned()
}

/// Any `\item` left outside a recognized list becomes a plain dash bullet
pub fn convert_stray_items(content: &str) -> String {
    ITEM_RE.replace_all(content, "- ").into_owned()
}
