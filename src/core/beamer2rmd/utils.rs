//! Utility functions for Beamer to R Markdown conversion
//!
//! Pure helpers shared by the translators. None of them depend on
//! converter state.

use std::ops::Range;

/// Find the byte index of the brace closing the group opened at `open`.
///
/// `open` must point at a `{`. Returns `None` when the group never closes.
pub fn find_matching_brace(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Locate the first `\cmd{...}` in `text` and return its full span and the
/// brace-balanced argument.
pub fn extract_command_argument(text: &str, command: &str) -> Option<(Range<usize>, String)> {
    let mut search = 0;
    while let Some(rel) = text[search..].find(command) {
        let start = search + rel;
        let after = start + command.len();
        // Avoid matching a longer command name such as \captionof
        if text[after..].starts_with('{') {
            let close = find_matching_brace(text, after)?;
            return Some((start..close + 1, text[after + 1..close].to_string()));
        }
        search = after;
    }
    None
}

/// Strip a leading `[...]` optional argument (placement or listing options).
///
/// Only an option block that starts at the very first character counts, so
/// content that merely begins with a bracket on a later line is kept.
pub fn strip_leading_option(content: &str) -> &str {
    if content.starts_with('[') {
        let first_line_end = content.find('\n').unwrap_or(content.len());
        if let Some(close) = content[..first_line_end].find(']') {
            return &content[close + 1..];
        }
    }
    content
}

/// Count pipe characters in a line
pub fn pipe_count(line: &str) -> usize {
    line.matches('|').count()
}

/// Escape double quotes for a YAML double-quoted scalar
pub fn escape_yaml_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
