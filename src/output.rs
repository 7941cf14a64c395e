//! CLI output formatting.
//!
//! Output leads with what the user is working on: the layout and the
//! uploads in cell order. Filesystem paths are secondary context on
//! indented `Source:` lines.
//!
//! # Output Format
//!
//! ## Uploads
//!
//! ```text
//! Layout 2x2 (3/4 images)
//! 001 beach
//!     Source: /home/me/Pictures/beach.jpg
//! 002 city
//!     Source: /home/me/Pictures/city.png
//! 003 forest
//!     Source: /home/me/Pictures/forest.jpeg
//! Skipped
//!     notes.txt: unsupported format
//!     beach.jpg: already added
//! Need 1 more image
//! ```
//!
//! ## Save
//!
//! ```text
//! Saved 942x1846 PNG
//!     Path: /home/me/Pictures/wallpaper_004.png
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>` or `String`)
//! for testability and a `print_*` wrapper that writes to stdout. Format
//! functions do no I/O.

use crate::imaging::SaveSpec;
use crate::session::{AddReport, Session};
use std::path::Path;

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

/// Display name of an upload: the file stem, or the whole path if it has none.
fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "image" } else { "images" }
}

// ============================================================================
// Session status
// ============================================================================

/// One-line readiness status for `uploaded` images against `required`.
///
/// ```text
/// Ready
/// Need 2 more images
/// Remove 1 image
/// ```
pub fn format_status(required: usize, uploaded: usize) -> String {
    match uploaded.cmp(&required) {
        std::cmp::Ordering::Equal => "Ready".to_string(),
        std::cmp::Ordering::Less => {
            let missing = required - uploaded;
            format!("Need {} more {}", missing, plural(missing))
        }
        std::cmp::Ordering::Greater => {
            let extra = uploaded - required;
            format!("Remove {} {}", extra, plural(extra))
        }
    }
}

/// Format the layout header and the upload list in cell order.
pub fn format_session(session: &Session) -> Vec<String> {
    let mut lines = vec![format!(
        "Layout {} ({}/{} images)",
        session.layout(),
        session.uploaded_count(),
        session.required_count()
    )];
    for (i, path) in session.uploads().iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), display_name(path)));
        lines.push(format!("{}Source: {}", indent(1), path.display()));
    }
    lines
}

/// Format the files [`Session::add_images`] did not add.
///
/// Returns nothing when every file was added.
pub fn format_add_report(report: &AddReport) -> Vec<String> {
    if report.rejected.is_empty() && report.duplicates.is_empty() {
        return Vec::new();
    }
    let mut lines = vec!["Skipped".to_string()];
    for path in &report.rejected {
        lines.push(format!("{}{}: unsupported format", indent(1), file_name(path)));
    }
    for path in &report.duplicates {
        lines.push(format!("{}{}: already added", indent(1), file_name(path)));
    }
    lines
}

/// Session listing, skipped files and the readiness status.
pub fn format_check_output(session: &Session, report: &AddReport) -> Vec<String> {
    let mut lines = format_session(session);
    lines.extend(format_add_report(report));
    lines.push(format_status(
        session.required_count(),
        session.uploaded_count(),
    ));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(session: &Session, report: &AddReport) {
    for line in format_check_output(session, report) {
        println!("{}", line);
    }
}

// ============================================================================
// Save output
// ============================================================================

/// Format the confirmation for a written image.
pub fn format_saved(spec: &SaveSpec, dimensions: (u32, u32)) -> Vec<String> {
    vec![
        format!("Saved {}x{} {}", dimensions.0, dimensions.1, spec.format),
        format!("{}Path: {}", indent(1), spec.path.display()),
    ]
}

/// Print save confirmation to stdout.
pub fn print_saved(spec: &SaveSpec, dimensions: (u32, u32)) {
    for line in format_saved(spec, dimensions) {
        println!("{}", line);
    }
}

/// Format the confirmation for a written config file.
pub fn format_config_written(path: &Path) -> String {
    format!("Wrote default config to {}", path.display())
}

pub fn print_config_written(path: &Path) {
    println!("{}", format_config_written(path));
}
