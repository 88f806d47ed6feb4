//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Each report leads with what happened (counts, categories, the file that
//! changed) and shows filesystem detail as indented context lines. The same
//! two-level shape is used everywhere:
//!
//! 1. **Header line**: positional index + name, or a count
//! 2. **Context lines**: indented sizes, errors, file names
//!
//! # Output Format
//!
//! ## Convert
//!
//! ```text
//! Converting 3 files from assets/images/gallery (quality 95)
//! 001 temple-gate.png → temple-gate.jpg
//!     (2048.0 KB → 512.3 KB)
//! 002 broken.png → broken.jpg
//!     Failed: Processing failed: Failed to decode …
//!
//! Converted 2 files, 1 failed
//! Output: assets/images/gallery/converted
//! ```
//!
//! ## Generate / Sections
//!
//! ```text
//! Gallery fragment: 134 images → gallery_generated.html
//!     Group Members: 12 images
//!     Temple & Premises: 30 images
//! ```
//!
//! ## Count
//!
//! ```text
//! JPG files: 130
//! PNG files: 4
//! WEBP files: 0
//! GIF files: 0
//! Total: 134
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::categorize::CategorizedGroups;
use crate::imaging::{ConvertEvent, ConvertSummary};
use crate::scan::{CountSummary, ImageKind};
use crate::splice::SpliceOutcome;
use crate::types::ImageList;
use std::path::Path;

/// How many files the count report samples.
const COUNT_SAMPLE: usize = 20;
/// How many names the list report previews.
const LIST_PREVIEW: usize = 10;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn kilobytes(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

// ============================================================================
// Convert
// ============================================================================

pub fn format_convert_start(source_dir: &Path, count: usize, quality: u32) -> Vec<String> {
    vec![format!(
        "Converting {} from {} (quality {})",
        plural(count, "file", "files"),
        source_dir.display(),
        quality
    )]
}

/// One source file's result. `index` is 1-based.
pub fn format_convert_event(index: usize, event: &ConvertEvent) -> Vec<String> {
    match event {
        ConvertEvent::Converted {
            source,
            output,
            source_bytes,
            output_bytes,
        } => vec![
            format!("{} {} → {}", format_index(index), source, output),
            format!(
                "{}({} → {})",
                indent(1),
                kilobytes(*source_bytes),
                kilobytes(*output_bytes)
            ),
        ],
        ConvertEvent::Failed {
            source,
            output,
            error,
        } => vec![
            format!("{} {} → {}", format_index(index), source, output),
            format!("{}Failed: {}", indent(1), error),
        ],
    }
}

pub fn format_convert_summary(summary: &ConvertSummary) -> Vec<String> {
    let mut headline = format!("Converted {}", plural(summary.converted, "file", "files"));
    if summary.failed > 0 {
        headline.push_str(&format!(", {} failed", summary.failed));
    }
    vec![
        String::new(),
        headline,
        format!("Output: {}", summary.output_dir.display()),
    ]
}

pub fn format_convert_cancelled(converted: usize, failed: usize) -> Vec<String> {
    vec![
        String::new(),
        format!(
            "Conversion cancelled by user ({} converted, {} failed)",
            converted, failed
        ),
    ]
}

/// Printed when `build` sees the interrupt flag between stages.
pub fn format_build_cancelled(stage: &str) -> Vec<String> {
    vec![String::new(), format!("Build cancelled by user before {}", stage)]
}

pub fn print_convert_event(index: usize, event: &ConvertEvent) {
    for line in format_convert_event(index, event) {
        println!("{}", line);
    }
}

pub fn print_convert_summary(summary: &ConvertSummary) {
    for line in format_convert_summary(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Count
// ============================================================================

/// The count report, as printed and as written to the count file.
pub fn format_count_summary(summary: &CountSummary) -> Vec<String> {
    let mut lines: Vec<String> = [
        ImageKind::Jpeg,
        ImageKind::Png,
        ImageKind::WebP,
        ImageKind::Gif,
    ]
    .iter()
    .map(|kind| format!("{} files: {}", kind, summary.count(*kind)))
    .collect();
    lines.push(format!("Total: {}", summary.total()));

    lines.push(String::new());
    lines.push("Non-JPG files:".to_string());
    for name in summary.non_jpeg() {
        lines.push(format!("{}{}", indent(1), name));
    }

    lines.push(String::new());
    lines.push(format!("All files (first {}):", COUNT_SAMPLE));
    for name in summary.files.iter().take(COUNT_SAMPLE) {
        lines.push(format!("{}{}", indent(1), name));
    }
    lines
}

pub fn print_count_summary(summary: &CountSummary, written_to: &Path) {
    for line in format_count_summary(summary) {
        println!("{}", line);
    }
    println!();
    println!("Results written to {}", written_to.display());
}

// ============================================================================
// List
// ============================================================================

pub fn format_image_list(list: &ImageList, written_to: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Found {} → {}",
        plural(list.images.len(), "image", "images"),
        written_to.display()
    )];
    for (i, name) in list.images.iter().take(LIST_PREVIEW).enumerate() {
        lines.push(format!("{}{} {}", indent(1), format_index(i + 1), name));
    }
    if list.images.len() > LIST_PREVIEW {
        lines.push(format!(
            "{}… and {} more",
            indent(1),
            list.images.len() - LIST_PREVIEW
        ));
    }
    lines
}

pub fn print_image_list(list: &ImageList, written_to: &Path) {
    for line in format_image_list(list, written_to) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate / Sections
// ============================================================================

/// Headline plus one `<name>: N images` line per non-empty category.
pub fn format_category_breakdown(
    label: &str,
    groups: &CategorizedGroups,
    written_to: &Path,
) -> Vec<String> {
    let categories = groups.non_empty().count();
    let mut lines = vec![format!(
        "{}: {} in {} → {}",
        label,
        plural(groups.total(), "image", "images"),
        plural(categories, "category", "categories"),
        written_to.display()
    )];
    for group in groups.non_empty() {
        lines.push(format!(
            "{}{}: {}",
            indent(1),
            group.rule.name,
            plural(group.images.len(), "image", "images")
        ));
    }
    lines
}

pub fn print_category_breakdown(label: &str, groups: &CategorizedGroups, written_to: &Path) {
    for line in format_category_breakdown(label, groups, written_to) {
        println!("{}", line);
    }
}

// ============================================================================
// Update
// ============================================================================

pub fn format_splice_outcome(outcome: &SpliceOutcome) -> Vec<String> {
    if outcome.changed {
        vec![format!(
            "Updated gallery in {} ({} bytes spliced)",
            outcome.document.display(),
            outcome.fragment_bytes
        )]
    } else {
        vec![format!(
            "Gallery in {} already up to date",
            outcome.document.display()
        )]
    }
}

pub fn print_splice_outcome(outcome: &SpliceOutcome) {
    for line in format_splice_outcome(outcome) {
        println!("{}", line);
    }
}

/// Printed instead of a report when the input directory holds no images.
pub fn format_no_images(dir: &Path) -> Vec<String> {
    vec![format!("No images found in {}", dir.display())]
}

pub fn print_no_images(dir: &Path) {
    for line in format_no_images(dir) {
        println!("{}", line);
    }
}
