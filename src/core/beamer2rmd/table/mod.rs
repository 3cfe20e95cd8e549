//! Table translation: LaTeX `table`/`tabular` environments to pipe tables
//!
//! Translation is an ordered list of independent passes. The structured
//! translator handles well-formed environments; the cleanups and the
//! line-scan recovery then repair whatever it missed or mangled.

mod parser;
mod recovery;


use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};

pub use parser::{is_separator_row, TableBlock};
pub use recovery::{collapse_duplicate_separators, recover_malformed_tables, strip_width_leaks};

use super::utils::extract_command_argument;
use super::ConversionWarning;

lazy_static! {
    static ref TABLE_RE: Regex = Regex::new(r"(?s)\\begin\{table\}(.*?)\\end\{table\}").unwrap();
    /// `\begin{table [h]}`: options inside the environment braces
    static ref TABLE_INNER_OPTS_RE: Regex =
        Regex::new(r"(?s)\\begin\{table\s*\[.*?\]\}(.*?)\\end\{table\}").unwrap();
    /// `\end{table}}`: a stray closing brace after the environment
    static ref TABLE_EXTRA_BRACE_RE: Regex =
        Regex::new(r"(?s)\\begin\{table\}(.*?)\\end\{table\}\s*\}").unwrap();
    /// Anything else opening with `\begin{table...}`
    static ref TABLE_LOOSE_RE: Regex =
        Regex::new(r"(?s)\\begin\{table.*?\}(.*?)\\end\{table\}").unwrap();
    static ref TABULAR_RE: Regex =
        Regex::new(r"(?s)\\begin\{tabular\}\{([^}]+)\}(.*?)\\end\{tabular\}").unwrap();
}

/// Keep only pipe-carrying lines, optionally dropping LaTeX command lines
fn keep_pipe_lines(content: &str, skip_commands: bool) -> String {
    let rows: Vec<&str> = content
        .lines()
        .filter(|line| line.contains('|'))
        .filter(|line| !(skip_commands && line.trim().starts_with('\\')))
        .map(str::trim)
        .collect();
    format!("\n{}\n", rows.join("\n"))
}

/// Translate the body of one table environment.
///
/// Returns `None` when nothing table-like was found; the caller keeps the
/// original text.
pub fn translate_table(raw: &str) -> Option<String> {
    let content = raw.trim();

    // A Markdown table wrapped in a LaTeX environment
    if content.contains('|') && content.lines().any(is_separator_row) {
        return Some(keep_pipe_lines(content, true));
    }

    let Some(caps) = TABULAR_RE.captures(content) else {
        if content.contains('|') {
            return Some(keep_pipe_lines(content, false));
        }
        return None;
    };

    let caption = extract_command_argument(content, "\\caption").map(|(_, text)| text);
    let block = TableBlock::parse(&caps[1], &caps[2]).with_caption(caption);
    debug!(
        "table {:?}: {} row(s), caption={:?}",
        block.column_spec,
        block.rows.len(),
        block.caption
    );
    Some(block.to_markdown())
}

fn replace_tables(re: &Regex, text: &str) -> String {
    re.replace_all(text, |caps: &Captures| {
        translate_table(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}

/// One warning per table environment that survived every translation pass
fn report_passthroughs(text: &str, location: &str, warnings: &mut Vec<ConversionWarning>) {
    for found in TABLE_LOOSE_RE.find_iter(text) {
        let opener = found.as_str().lines().next().unwrap_or_default();
        debug!("table kept verbatim in {}: {}", location, opener);
        warnings.push(ConversionWarning::table_passthrough(location, opener));
    }
}

fn replace_bare_tabulars(text: &str) -> String {
    TABULAR_RE
        .replace_all(text, |caps: &Captures| {
            format!("\n{}\n", TableBlock::parse(&caps[1], &caps[2]).render_rows())
        })
        .into_owned()
}

fn clean_emitted_tables(text: &str) -> String {
    strip_width_leaks(&collapse_duplicate_separators(text))
}

/// Document-level pass over `table` environments and their malformed
/// variants, followed by separator and width cleanups.
///
/// Unrecognized environments are left for the frame pass, which reports them.
pub fn convert_tables(text: &str) -> String {
    let mut text = replace_tables(&TABLE_RE, text);
    text = replace_tables(&TABLE_INNER_OPTS_RE, &text);
    text = replace_tables(&TABLE_EXTRA_BRACE_RE, &text);
    clean_emitted_tables(&text)
}

/// Frame-level table passes: environments again, bare tabulars, cleanups and
/// the line-scan recovery. Environments kept verbatim are reported once each.
pub fn convert_frame_tables(
    body: &str,
    location: &str,
    warnings: &mut Vec<ConversionWarning>,
) -> String {
    let mut text = replace_tables(&TABLE_RE, body);
    text = replace_tables(&TABLE_INNER_OPTS_RE, &text);
    text = replace_tables(&TABLE_LOOSE_RE, &text);
    report_passthroughs(&text, location, warnings);
    text = replace_bare_tabulars(&text);
    text = clean_emitted_tables(&text);
    recover_malformed_tables(&text)
}
