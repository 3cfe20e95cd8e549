//! Preamble metadata and the ioslides front matter

use lazy_static::lazy_static;
use regex::Regex;

use super::context::RmdOptions;
use super::utils::escape_yaml_string;

pub const DEFAULT_TITLE: &str = "Untitled Presentation";
pub const DEFAULT_AUTHOR: &str = "Unknown Author";

lazy_static! {
    static ref TITLE_RE: Regex = Regex::new(r"\\title(?:\[(.*?)\])?\{(.*?)\}").unwrap();
    static ref AUTHOR_RE: Regex = Regex::new(r"\\author(?:\[(.*?)\])?\{(.*?)\}").unwrap();
    static ref INSTITUTE_RE: Regex = Regex::new(r"\\institute(?:\[(.*?)\])?\{(.*?)\}").unwrap();
}

/// Document metadata taken from the preamble
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub author: String,
    pub institute: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            institute: String::new(),
        }
    }
}

/// Extract title, author and institute; the long form wins over the short one.
///
/// First match wins. Missing commands fall back to the defaults.
pub fn extract_metadata(input: &str) -> Metadata {
    let long_form = |re: &Regex| {
        re.captures(input)
            .and_then(|caps| caps.get(2))
            .map(|m| m.as_str().to_string())
    };

    let defaults = Metadata::default();
    Metadata {
        title: long_form(&TITLE_RE).unwrap_or(defaults.title),
        author: long_form(&AUTHOR_RE).unwrap_or(defaults.author),
        institute: long_form(&INSTITUTE_RE).unwrap_or(defaults.institute),
    }
}

/// Build the YAML front matter and the style override
pub fn build_header(metadata: &Metadata, options: &RmdOptions) -> String {
    let mut out = String::from("---\n");
    out.push_str(&format!("title: \"{}\"\n", escape_yaml_string(&metadata.title)));
    if options.institute_as_subtitle && !metadata.institute.is_empty() {
        out.push_str(&format!(
            "subtitle: \"{}\"\n",
            escape_yaml_string(&metadata.institute)
        ));
    }
    out.push_str(&format!("author: \"{}\"\n", escape_yaml_string(&metadata.author)));
    out.push_str("date: \"`r Sys.Date()`\"\n");
    out.push_str("output: \n");
    out.push_str("  ioslides_presentation:\n");
    out.push_str("    toc: true\n");
    out.push_str("    mathjax: true\n");
    if options.widescreen {
        out.push_str("    widescreen: true\n");
    }
    if let Some(theme) = options.highlight.as_deref() {
        out.push_str(&format!("    highlight: {}\n", theme));
    }
    out.push_str("---\n");
    out.push_str("<style>\narticle {\n  color: #000000;\n}\n</style>\n");
    out
}
