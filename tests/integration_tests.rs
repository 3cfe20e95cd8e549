//! End-to-end conversion tests for beamer2rmd

use beamer2rmd::{
    compute_image_width, convert, convert_tables, convert_with_diagnostics, convert_with_options,
    RmdOptions, WarningKind,
};
use pretty_assertions::assert_eq;

fn frame(title: &str, body: &str) -> String {
    format!("\\begin{{frame}}{{{}}}\n{}\n\\end{{frame}}\n", title, body)
}

fn document(body: &str) -> String {
    format!(
        "\\documentclass{{beamer}}\n\\begin{{document}}\n{}\\end{{document}}\n",
        body
    )
}

/// Index of `needle` in `haystack`, panicking with context when absent
fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("{:?} not found in output:\n{}", needle, haystack))
}

// =============================================================================
// Front matter
// =============================================================================

mod header_tests {
    use super::*;

    #[test]
    fn test_defaults_without_metadata() {
        let output = convert(&document(&frame("A", "x")), false);
        let expected = "---\n\
title: \"Untitled Presentation\"\n\
author: \"Unknown Author\"\n\
date: \"`r Sys.Date()`\"\n\
output: \n  ioslides_presentation:\n    toc: true\n    mathjax: true\n    highlight: tango\n\
---\n\
<style>\narticle {\n  color: #000000;\n}\n</style>\n";
        assert!(output.starts_with(expected), "header was:\n{}", output);
    }

    #[test]
    fn test_metadata_long_forms() {
        let input = format!(
            "\\title[Short]{{Regression in Practice}}\n\\author[A.B.]{{Ada Byron}}\n{}",
            document(&frame("A", "x"))
        );
        let output = convert(&input, true);
        assert!(output.contains("title: \"Regression in Practice\"\n"));
        assert!(output.contains("author: \"Ada Byron\"\n"));
        assert!(output.contains("    widescreen: true\n"));
    }

    #[test]
    fn test_institute_subtitle_option() {
        let input = format!(
            "\\title[T]{{T}}\n\\institute[U]{{Some University}}\n{}",
            document(&frame("A", "x"))
        );
        let options = RmdOptions {
            institute_as_subtitle: true,
            highlight: None,
            ..RmdOptions::default()
        };
        let output = convert_with_options(&input, &options);
        assert!(output.contains("subtitle: \"Some University\"\n"));
        assert!(!output.contains("highlight:"));
    }
}

// =============================================================================
// Document structure
// =============================================================================

mod structure_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_frame_round_trip() {
        let body = format!(
            "\\section{{Intro}}\n{}{}",
            frame(
                "Overview",
                "\\begin{itemize}\n\\item First point\n\\item Second point\n\\end{itemize}"
            ),
            frame("~", "Thank you")
        );
        let output = convert(&document(&body), false);

        let front = position(&output, "---\n");
        let intro = position(&output, "\n## Intro\n");
        let overview = position(&output, "\n## Overview\n- First point\n- Second point\n");
        let closing = position(
            &output,
            "\n##\n<div style=\"display: flex; align-items: center; justify-content: center; height: 400px;\">\n\
<div style=\"font-size: 36px; text-align: center;\">Thank you</div>\n</div>\n",
        );
        assert!(front < intro && intro < overview && overview < closing);
    }

    #[test]
    fn test_braced_marker_never_centers() {
        let output = convert(
            &document(&frame("{~}", "\\textbullet still a slide")),
            false,
        );
        assert!(!output.contains("display: flex"));
    }

    #[test]
    fn test_frames_keep_document_order() {
        let body = format!("{}{}{}", frame("One", "a"), frame("Two", "b"), frame("Three", "c"));
        let output = convert(&document(&body), false);
        let one = position(&output, "## One");
        let two = position(&output, "## Two");
        let three = position(&output, "## Three");
        assert!(one < two && two < three);
    }

    #[test]
    fn test_listing_output_after_last_frame_adds_no_slide() {
        let body = format!(
            "{}\\begin{{lstlisting}}\nsummary(fit)\n## outside\n\\end{{lstlisting}}\n",
            frame("Only", "x")
        );
        let output = convert(&document(&body), false);
        assert!(!output.contains("\n## outside\n\n"));
        assert_eq!(output.matches("\n## ").count(), 1);
    }

    #[test]
    fn test_kept_tables_reported_once_each() {
        let body = frame(
            "Tables",
            "\\begin{table}\nfirst\n\\end{table}\n\\begin{table}\nsecond\n\\end{table}",
        );
        let result = convert_with_diagnostics(&document(&body), &RmdOptions::default());
        let kept = result
            .warnings
            .iter()
            .filter(|w| w.kind == WarningKind::TablePassthrough)
            .count();
        assert_eq!(kept, 2);
    }

    #[test]
    fn test_document_without_frames() {
        let result = convert_with_diagnostics("\\title{Only a title}", &RmdOptions::default());
        assert!(result.output.ends_with("</style>\n"));
        assert_eq!(result.warnings[0].kind, WarningKind::NoFrames);
    }
}

// =============================================================================
// Lists
// =============================================================================

mod list_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_enumerate_numbering_has_no_gaps() {
        let output = convert(
            &document(&frame(
                "Steps",
                "\\begin{enumerate}\n\\item Load\n\\item    \n\\item Fit\n\\item Plot\n\\end{enumerate}",
            )),
            false,
        );
        assert!(output.contains("1. Load\n2. Fit\n3. Plot"));
        assert!(!output.contains("4."));
    }

    #[test]
    fn test_itemize_item_count() {
        let output = convert(
            &document(&frame(
                "Points",
                "\\begin{itemize}\n\\item a\n\\item b\n\\item c\n\\end{itemize}",
            )),
            false,
        );
        let bullets = output.lines().filter(|l| l.starts_with("- ")).count();
        assert_eq!(bullets, 3);
    }

    #[test]
    fn test_nested_itemize_is_fully_unwound() {
        let output = convert(
            &document(&frame(
                "Nested",
                "\\begin{itemize}\n\\item Outer\n\\begin{itemize}\n\\item Inner\n\\end{itemize}\n\\end{itemize}",
            )),
            false,
        );
        assert!(!output.contains("\\begin{itemize}"));
        assert!(output.contains("- Outer"));
        assert!(output.contains("- Inner"));
    }
}

// =============================================================================
// Images
// =============================================================================

mod image_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_width_fraction() {
        assert_eq!(compute_image_width("[width=0.5\\textwidth]", false), "50%");
        assert_eq!(compute_image_width("[width=0.5\\textwidth]", true), "38%");
    }

    #[test]
    fn test_pdf_widescreen_iframe() {
        let output = convert(&document(&frame("Plot", "\\includegraphics{plot.pdf}")), true);
        assert!(output
            .contains("<iframe src=\"plot.pdf\" width=\"80%\" height=\"500px\"></iframe>"));
    }

    #[test]
    fn test_figure_with_caption() {
        let output = convert(
            &document(&frame(
                "Fig",
                "\\begin{figure}[h]\n\\centering\n\\includegraphics[width=0.8\\textwidth]{fit.png}\n\\caption{Model fit}\n\\end{figure}",
            )),
            false,
        );
        assert!(output.contains("<img src=\"fit.png\" width=\"80%\">"));
        assert!(output.contains(
            "<div style=\"text-align: center; font-style: italic; margin-top: 8px;\">Model fit</div>"
        ));
        assert!(output.contains("<center>"));
    }
}

// =============================================================================
// Tables
// =============================================================================

mod table_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_translation_is_idempotent() {
        let input = "\\begin{table}\n\\centering\n\\begin{tabular}{lr}\n\\toprule\nName & Score \\\\\n\\midrule\nAda & 90 \\\\\n\\bottomrule\n\\end{tabular}\n\\caption{Scores}\n\\end{table}";
        let once = convert_tables(input);
        assert!(once.contains("**Table: Scores**"));
        assert_eq!(convert_tables(&once), once);
    }

    #[test]
    fn test_malformed_table_gets_one_separator() {
        let output = convert(
            &document(&frame(
                "Data",
                "Name | Score | Rank\nAlice | 90 | 1\nBob | 85 | 2",
            )),
            false,
        );
        assert!(output.contains("| Name | Score | Rank |\n|---|---|---|\n| Alice | 90 | 1 |"));
        assert_eq!(output.matches("|---|---|---|").count(), 1);
    }

    #[test]
    fn test_table_inside_frame() {
        let output = convert(
            &document(&frame(
                "Results",
                "\\begin{table}\n\\begin{tabular}{|l|l|}\n\\hline\nA & B \\\\\n\\hline\n1 & 2 \\\\\n\\hline\n\\end{tabular}\n\\end{table}",
            )),
            false,
        );
        assert!(output.contains("| A | B |\n|---|---|\n| 1 | 2 |"));
        assert!(!output.contains("\\hline"));
    }
}

// =============================================================================
// Inline markup
// =============================================================================

mod markup_tests {
    use super::*;

    #[test]
    fn test_links_and_footnotes() {
        let output = convert(
            &document(&frame(
                "Links",
                "See \\href{https://r-project.org}{R}\\footnote{\\url{https://cran.r-project.org}} and \\url{https://ex.org}\\footnote{2023 data}",
            )),
            false,
        );
        assert!(output.contains("<a href=\"https://r-project.org\" target=\"_blank\">R</a>"));
        assert!(output.contains(" <a href=\"https://cran.r-project.org\" target=\"_blank\">↗</a>"));
        assert!(output.contains("<a href=\"https://ex.org\" target=\"_blank\">https://ex.org</a>"));
        assert!(output.contains(" <small>2023 data</small>"));
    }

    #[test]
    fn test_size_commands_are_stripped() {
        let output = convert(&document(&frame("Sizes", "\\small{Small {and} \\Large{big}} text")), false);
        assert!(output.contains("Small {and} big text"));
    }

    #[test]
    fn test_listing_inside_frame() {
        let output = convert(
            &document(&frame(
                "Code",
                "\\begin{lstlisting}[language=R]\nfit <- lm(y ~ x, data = df$$d)\n\\end{lstlisting}",
            )),
            false,
        );
        assert!(output.contains("```r\nfit <- lm(y ~ x, data = df$d)\n```"));
    }

    #[test]
    fn test_colors() {
        let output = convert(
            &document(&frame("C", "\\textcolor{red}{Warning} and {\\color{blue} calm}")),
            false,
        );
        assert!(output.contains("<span style=\"color:red\">Warning</span>"));
        assert!(output.contains("<span style=\"color:blue\">calm</span>"));
    }
}
