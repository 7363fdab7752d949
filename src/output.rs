//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every document is shown by its identity (position and title) first, with
//! its route and file-level details as indented context lines. The output
//! reads as a content inventory while still pointing back at each page.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Blog (2)
//! 001 First Post
//!     Route: /blog/2026/first
//!     en · 2026-01-10 · 1 min read · rust, seo
//!     Hello from the first post.
//! 002 Work in progress [draft]
//!     Route: /blog/2026/_draft-wip
//!     en · 2026-02-01 · 1 min read
//!
//! Case Studies (1)
//! 001 Acme Redesign
//!     Route: /case-studies/acme
//!     en · 2025-06-01 · 1 min read · design
//! ```
//!
//! ## Check
//!
//! ```text
//! /case-studies/acme
//!     error  client: client is required
//!     warn   testimonial: No testimonial
//!
//! Checked 6 documents: 1 error, 1 warning
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::head::Head;
use crate::naming::DuplicateCheck;
use crate::seo::validate::ValidationResult;
use crate::types::{ContentDocument, ContentKind};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Truncate to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Scan
// ============================================================================

/// One scanned document with its derived fields.
#[derive(Debug, Clone)]
pub struct DocumentSummary<'a> {
    pub doc: &'a ContentDocument,
    pub read_minutes: u32,
    pub excerpt: String,
}

/// Inventory of the loaded content, grouped by kind in store order.
pub fn format_scan_output(summaries: &[DocumentSummary<'_>]) -> Vec<String> {
    let mut lines = Vec::new();
    for kind in ContentKind::ALL {
        let group: Vec<&DocumentSummary> =
            summaries.iter().filter(|s| s.doc.kind() == kind).collect();
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("{} ({})", kind.section_label(), group.len()));

        for (i, summary) in group.iter().enumerate() {
            let doc = summary.doc;
            let draft = if doc.is_draft() { " [draft]" } else { "" };
            lines.push(format!("{} {}{}", format_index(i + 1), doc.title(), draft));
            lines.push(format!("    Route: {}", doc.path()));

            let mut detail = format!(
                "    {} · {} · {} min read",
                doc.lang(),
                doc.date(),
                summary.read_minutes
            );
            if !doc.tags().is_empty() {
                detail.push_str(&format!(" · {}", doc.tags().join(", ")));
            }
            lines.push(detail);

            if !summary.excerpt.is_empty() {
                lines.push(format!("    {}", truncate_desc(&summary.excerpt, 60)));
            }
        }
    }
    lines
}

pub fn print_scan_output(summaries: &[DocumentSummary<'_>]) {
    for line in format_scan_output(summaries) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Issues per document (documents without issues are left out), then a
/// summary line.
pub fn format_check_output(results: &[(&ContentDocument, ValidationResult<()>)]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut errors = 0;
    let mut warnings = 0;
    for (doc, result) in results {
        errors += result.errors.len();
        warnings += result.warnings.len();
        if result.errors.is_empty() && result.warnings.is_empty() {
            continue;
        }
        lines.push(doc.path().to_string());
        for issue in &result.errors {
            lines.push(format!("    error  {}", issue));
        }
        for issue in &result.warnings {
            lines.push(format!("    warn   {}", issue));
        }
        lines.push(String::new());
    }
    lines.push(format!(
        "Checked {}: {}, {}",
        plural(results.len(), "document"),
        plural(errors, "error"),
        plural(warnings, "warning")
    ));
    lines
}

pub fn print_check_output(results: &[(&ContentDocument, ValidationResult<()>)]) {
    for line in format_check_output(results) {
        println!("{}", line);
    }
}

// ============================================================================
// Slugs, routes, head
// ============================================================================

pub fn format_duplicate_check(slug: &str, check: &DuplicateCheck) -> String {
    match &check.file_path {
        Some(path) if check.exists => format!("{slug}: taken by {path}"),
        _ => format!("{slug}: available"),
    }
}

pub fn format_routes(routes: &[String]) -> Vec<String> {
    let mut lines = routes.to_vec();
    lines.push(format!("{} routes", routes.len()));
    lines
}

pub fn print_routes(routes: &[String]) {
    for line in format_routes(routes) {
        println!("{}", line);
    }
}

/// The `<html>` attributes (if any) followed by the rendered head fragment.
pub fn format_head(head: &Head) -> Vec<String> {
    let mut lines = Vec::new();
    let attrs = head.html_attributes();
    if !attrs.is_empty() {
        lines.push(format!("<html {attrs}>"));
    }
    lines.push(head.render().into_string());
    lines
}

pub fn print_head(head: &Head) {
    for line in format_head(head) {
        println!("{}", line);
    }
}
