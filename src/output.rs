//! CLI output formatting for the build pipeline.
//!
//! Output is information-centric: each photo leads with its date and title,
//! with the source filename shown as secondary context. Excluded files get
//! their own section so nothing is silently dropped.
//!
//! ```text
//! Photos
//! 2021-06-02 hike trail (no lightbox)
//!     Source: 2021-06-02-hike-small-trail.jpg
//! 2021-06-01 sunset
//!     Source: 2021-06-01-sunset.jpg
//!
//! Skipped
//!     sunset.jpg: invalid filename: missing YYYY-MM-DD date prefix
//!
//! 1 resized, 0 cached, 1 under threshold
//! Wrote 1 index page, 2 photo pages, feed.xml
//! ```
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::model::GalleryModel;
use crate::render::RenderSummary;
use crate::resize::ResizeStats;
use crate::scan::SkippedFile;

/// Format the gallery inventory after scanning.
pub fn format_gallery_report(model: &GalleryModel) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Photos".to_string());
    if model.is_empty() {
        lines.push("    (none)".to_string());
        return lines;
    }
    for record in model.records() {
        let title = if record.title.is_empty() {
            "(untitled)".to_string()
        } else {
            record.title.clone()
        };
        let marker = if record.suppress_lightbox {
            " (no lightbox)"
        } else {
            ""
        };
        lines.push(format!("{} {}{}", record.date.format("%Y-%m-%d"), title, marker));
        lines.push(format!("    Source: {}", record.file_name));
    }
    lines
}

/// Format the skip report. Empty when nothing was skipped.
pub fn format_skip_report(skipped: &[SkippedFile]) -> Vec<String> {
    if skipped.is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::new();
    lines.push("Skipped".to_string());
    for skip in skipped {
        lines.push(format!("    {}: {}", skip.file_name, skip.reason));
    }
    lines
}

/// Format the end-of-run summary line pair.
pub fn format_build_summary(stats: &ResizeStats, summary: &RenderSummary) -> Vec<String> {
    vec![
        stats.to_string(),
        format!(
            "Wrote {} index page{}, {} photo page{}, feed.xml",
            summary.index_pages,
            plural(summary.index_pages),
            summary.photo_pages,
            plural(summary.photo_pages),
        ),
    ]
}

fn plural(n: u32) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Print the gallery inventory to stdout.
pub fn print_gallery_report(model: &GalleryModel) {
    for line in format_gallery_report(model) {
        println!("{}", line);
    }
}

/// Print the skip report to stdout (nothing when empty).
pub fn print_skip_report(skipped: &[SkippedFile]) {
    for line in format_skip_report(skipped) {
        println!("{}", line);
    }
}

/// Print the end-of-run summary to stdout.
pub fn print_build_summary(stats: &ResizeStats, summary: &RenderSummary) {
    for line in format_build_summary(stats, summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
