//! Tabular body parser and pipe-table renderer

/// Rule commands dropped from a tabular body before row splitting
const RULE_COMMANDS: [&str; 4] = ["\\toprule", "\\midrule", "\\bottomrule", "\\hline"];

/// A parsed `tabular` block
///
/// Row 0 is always rendered as the header row, whatever its role in the
/// source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBlock {
    /// Raw column specification from `\begin{tabular}{...}`
    pub column_spec: String,
    /// Non-empty rows, each a list of trimmed cells
    pub rows: Vec<Vec<String>>,
    /// Caption shown above the table
    pub caption: Option<String>,
}

impl TableBlock {
    /// Parse a tabular body: drop rules, split rows on `\\` and cells on `&`
    pub fn parse(column_spec: &str, body: &str) -> Self {
        let mut cleaned = body.to_string();
        for rule in RULE_COMMANDS {
            cleaned = cleaned.replace(rule, "");
        }

        let rows = cleaned
            .split("\\\\")
            .filter(|row| !row.trim().is_empty())
            .map(|row| row.split('&').map(|cell| cell.trim().to_string()).collect())
            .collect();

        TableBlock {
            column_spec: column_spec.to_string(),
            rows,
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: Option<String>) -> Self {
        self.caption = caption.filter(|c| !c.is_empty());
        self
    }

    /// Render as pipe-table lines with a separator after the first row
    pub fn render_rows(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        for (i, cells) in self.rows.iter().enumerate() {
            lines.push(format!("| {} |", cells.join(" | ")));
            if i == 0 {
                lines.push(separator_row(cells.len()));
            }
        }
        lines.join("\n")
    }

    /// Render with the optional bold caption, surrounded by newlines
    pub fn to_markdown(&self) -> String {
        let caption = match &self.caption {
            Some(text) => format!("**Table: {}**\n\n", text),
            None => String::new(),
        };
        format!("\n{}{}\n", caption, self.render_rows())
    }
}

/// `|---|---|` with one dash group per column
pub fn separator_row(columns: usize) -> String {
    format!("|{}|", vec!["---"; columns].join("|"))
}

/// Column count of a header separator row, `None` if the line is not one
pub fn separator_columns(line: &str) -> Option<usize> {
    let trimmed = line.trim();
    if !trimmed.contains('|') {
        return None;
    }
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    let mut columns = 0;
    for cell in inner.split('|') {
        let cell = cell.trim();
        let dashes = cell.trim_matches(':');
        if dashes.len() < 3 || !dashes.chars().all(|c| c == '-') {
            return None;
        }
        columns += 1;
    }
    Some(columns)
}

pub fn is_separator_row(line: &str) -> bool {
    separator_columns(line).is_some()
}
