//! CLI output formatting.
//!
//! Each report has a `format_*` function returning `Vec<String>` and a
//! `print_*` wrapper that writes the lines to stdout. Format functions are
//! pure, so the exact console text is unit-tested.
//!
//! # Output Format
//!
//! ## Plan
//!
//! ```text
//! Patterns
//! 001 tone+complaint: 8 combinations → 8 pages
//! 002 complaint+business+platform: 40 combinations → 38 pages (2 duplicates)
//!
//! Planned 46 pages from 48 combinations
//! ```
//!
//! ## Build
//!
//! ```text
//! Sitemaps
//!     sitemap-main.xml (1 url)
//!     sitemap-pages-1.xml (46 urls)
//!     sitemap.xml (index of 2)
//!
//! Wrote 46 of 46 planned pages → dist
//! Fingerprint: 3f5a…
//! ```

use crate::enumerate::PatternStats;
use crate::pipeline::BuildReport;
use crate::sitemap::INDEX_FILE;
use crate::types::PageMeta;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Format non-fatal configuration warnings.
pub fn format_warnings(warnings: &[String]) -> Vec<String> {
    warnings.iter().map(|w| format!("warning: {w}")).collect()
}

/// Format the per-pattern enumeration summary.
pub fn format_plan(stats: &[PatternStats]) -> Vec<String> {
    let mut lines = vec!["Patterns".to_string()];

    for (i, s) in stats.iter().enumerate() {
        let mut line = format!(
            "{} {}: {} → {}",
            format_index(i + 1),
            s.name,
            plural(s.produced, "combination", "combinations"),
            plural(s.kept, "page", "pages"),
        );
        if s.duplicates() > 0 {
            line.push_str(&format!(
                " ({})",
                plural(s.duplicates(), "duplicate", "duplicates")
            ));
        }
        lines.push(line);
    }

    let produced: usize = stats.iter().map(|s| s.produced).sum();
    let kept: usize = stats.iter().map(|s| s.kept).sum();
    lines.push(String::new());
    lines.push(format!(
        "Planned {} from {}",
        plural(kept, "page", "pages"),
        plural(produced, "combination", "combinations")
    ));
    lines
}

/// Format the planned pages: slug header with the title beneath.
pub fn format_page_list(pages: &[PageMeta]) -> Vec<String> {
    let mut lines = Vec::with_capacity(pages.len() * 2);
    for (i, page) in pages.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), page.slug));
        lines.push(format!("{}{}", indent(1), page.title));
    }
    lines
}

/// Format the outcome of a completed build.
pub fn format_build_report(report: &BuildReport) -> Vec<String> {
    let mut lines = vec!["Sitemaps".to_string()];
    for (file_name, count) in &report.sitemap_files {
        let detail = if file_name == INDEX_FILE {
            format!("index of {count}")
        } else {
            plural(*count, "url", "urls")
        };
        lines.push(format!("{}{} ({})", indent(1), file_name, detail));
    }
    lines.push(String::new());
    lines.push(format!(
        "Wrote {} of {} planned pages → {}",
        report.written,
        report.planned,
        report.output_dir.display()
    ));
    lines.push(format!("Fingerprint: {}", report.fingerprint));
    lines
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

pub fn print_warnings(warnings: &[String]) {
    for line in format_warnings(warnings) {
        eprintln!("{}", line);
    }
}

pub fn print_plan(stats: &[PatternStats]) {
    print_lines(format_plan(stats));
}

pub fn print_page_list(pages: &[PageMeta]) {
    print_lines(format_page_list(pages));
}

pub fn print_build_report(report: &BuildReport) {
    print_lines(format_build_report(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn stats(name: &str, produced: usize, kept: usize) -> PatternStats {
        PatternStats {
            name: name.to_string(),
            produced,
            kept,
        }
    }

    #[test]
    fn format_index_pads_to_three() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn warnings_are_prefixed() {
        let lines = format_warnings(&["no patterns declared".to_string()]);
        assert_eq!(lines, vec!["warning: no patterns declared"]);
    }

    #[test]
    fn plan_lists_patterns_and_totals() {
        let lines = format_plan(&[
            stats("tone+complaint", 8, 8),
            stats("complaint+tone", 8, 6),
        ]);
        assert_eq!(
            lines,
            vec![
                "Patterns",
                "001 tone+complaint: 8 combinations → 8 pages",
                "002 complaint+tone: 8 combinations → 6 pages (2 duplicates)",
                "",
                "Planned 14 pages from 16 combinations",
            ]
        );
    }

    #[test]
    fn plan_singular_forms() {
        let lines = format_plan(&[stats("a+b", 1, 1)]);
        assert_eq!(lines[1], "001 a+b: 1 combination → 1 page");
        assert_eq!(lines[3], "Planned 1 page from 1 combination");
    }

    #[test]
    fn empty_plan_still_reports_totals() {
        let lines = format_plan(&[]);
        assert_eq!(lines, vec!["Patterns", "", "Planned 0 pages from 0 combinations"]);
    }

    #[test]
    fn page_list_shows_slug_then_title() {
        let pages = vec![PageMeta {
            slug: "harsh-shipping".to_string(),
            title: "Harsh Reviews About Shipping".to_string(),
            description: String::new(),
            url: String::new(),
            pattern: String::new(),
        }];
        assert_eq!(
            format_page_list(&pages),
            vec!["001 harsh-shipping", "    Harsh Reviews About Shipping"]
        );
    }

    #[test]
    fn build_report_lists_sitemaps() {
        let report = BuildReport {
            planned: 3,
            written: 3,
            sitemap_files: vec![
                ("sitemap-main.xml".to_string(), 1),
                ("sitemap-pages-1.xml".to_string(), 3),
                ("sitemap.xml".to_string(), 2),
            ],
            fingerprint: "abc".to_string(),
            output_dir: PathBuf::from("dist"),
        };
        assert_eq!(
            format_build_report(&report),
            vec![
                "Sitemaps",
                "    sitemap-main.xml (1 url)",
                "    sitemap-pages-1.xml (3 urls)",
                "    sitemap.xml (index of 2)",
                "",
                "Wrote 3 of 3 planned pages → dist",
                "Fingerprint: abc",
            ]
        );
    }
}
