//! CLI output formatting for a generation run.
//!
//! # Information-First Display
//!
//! Each picture is listed by its positional index and caption, with the
//! source file and the result shown as indented context lines. Pictures
//! without a caption fall back to showing the file name, so every entry
//! stays identifiable.
//!
//! # Output Format
//!
//! ```text
//! Trip (3 pictures) → out
//!     001 Shigiddy whoo!
//!         Source: scotland.jpg
//!         Output: out/Trip (1).jpg
//!     002 (japan.jpg)
//!         Source: japan.jpg
//!         Skipped: Source image not found: /albums/trip/japan.jpg
//!     003 Fish and chips!
//!         Source: uk.jpg
//!         Output: out/Trip (3).jpg
//!
//! Rendered 2 of 3 pictures
//! ```
//!
//! # Architecture
//!
//! [`format_report`] returns `Vec<String>` for testability and
//! [`print_report`] writes it to stdout. Format functions are pure: no I/O,
//! no side effects.

use crate::album::{AlbumReport, PictureOutcome};

/// Captions longer than this are cut in the listing.
const CAPTION_DISPLAY_MAX: usize = 40;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format a picture line: captioned pictures show the caption's first line,
/// uncaptioned ones show the file name in parens.
///
/// ```text
/// 001 The Sunset        // captioned
/// 001 (sunset.jpg)      // uncaptioned: the file name IS the identity
/// ```
fn image_line(index: usize, caption: Option<&str>, filename: &str) -> String {
    match caption.and_then(|c| c.lines().map(str::trim).find(|l| !l.is_empty())) {
        Some(c) => format!(
            "{} {}",
            format_index(index),
            truncate_desc(c, CAPTION_DISPLAY_MAX)
        ),
        None => format!("{} ({})", format_index(index), filename),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "picture" } else { "pictures" }
}

// ============================================================================
// Album report
// ============================================================================

/// Format the outcome of an album run.
pub fn format_report(report: &AlbumReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "{} ({} {}) → {}",
        report.name,
        report.pictures.len(),
        plural(report.pictures.len()),
        report.output_dir.display()
    ));

    for picture in &report.pictures {
        lines.push(format!(
            "{}{}",
            indent(1),
            image_line(picture.index + 1, Some(&picture.caption), &picture.file)
        ));
        lines.push(format!("{}Source: {}", indent(2), picture.file));
        lines.push(match &picture.outcome {
            PictureOutcome::Rendered(path) => {
                format!("{}Output: {}", indent(2), path.display())
            }
            PictureOutcome::Skipped(reason) => format!("{}Skipped: {}", indent(2), reason),
        });
    }

    lines.push(String::new());
    lines.push(format!(
        "Rendered {} of {} {}",
        report.rendered(),
        report.pictures.len(),
        plural(report.pictures.len())
    ));

    lines
}

/// Print the album report to stdout.
pub fn print_report(report: &AlbumReport) {
    for line in format_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
