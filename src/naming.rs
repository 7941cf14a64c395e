//! Output filename conventions for silently saved wallpapers.
//!
//! Two patterns share the `wallpaper_` prefix:
//!
//! - **timestamp**: `wallpaper_20261016_142233.png`: local time, second
//!   resolution. Two saves in the same second produce the same name and the
//!   second overwrites the first; there is no de-duplication.
//! - **sequence**: `wallpaper_004.jpg`: one past the highest existing number
//!   for the same extension, zero-padded to three digits (wider once past 999).
//!
//! The extension is always the canonical one for the format (`png` / `jpg`).

use crate::imaging::SaveFormat;
use chrono::NaiveDateTime;

pub const FILE_PREFIX: &str = "wallpaper_";

/// Timestamp layout: `YYYYMMDD_HHMMSS`.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `wallpaper_<YYYYMMDD_HHMMSS>.<ext>`
pub fn timestamp_filename(now: NaiveDateTime, format: SaveFormat) -> String {
    format!(
        "{}{}.{}",
        FILE_PREFIX,
        now.format(TIMESTAMP_FORMAT),
        format.extension()
    )
}

/// `wallpaper_<NNN>.<ext>`
pub fn sequence_filename(number: u32, format: SaveFormat) -> String {
    format!("{}{:03}.{}", FILE_PREFIX, number, format.extension())
}

/// Extract `N` from `wallpaper_<digits>.<ext>` when `ext` matches `format`.
///
/// Handles these patterns (for PNG):
/// - `"wallpaper_001.png"` → `Some(1)`
/// - `"wallpaper_1234.png"` → `Some(1234)`
/// - `"wallpaper_001.jpg"` → `None` (other format)
/// - `"wallpaper_20261016_142233.png"` → `None` (timestamp, not a sequence)
/// - `"wallpaper_.png"`, `"wallpaper_x1.png"` → `None`
pub fn parse_sequence_number(file_name: &str, format: SaveFormat) -> Option<u32> {
    let stem = file_name
        .strip_prefix(FILE_PREFIX)?
        .strip_suffix(format.extension())?
        .strip_suffix('.')?;
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse().ok()
}

/// Next sequence number given the names already present in a folder.
///
/// Returns 1 when nothing matches.
pub fn next_sequence_number<'a>(
    file_names: impl IntoIterator<Item = &'a str>,
    format: SaveFormat,
) -> u32 {
    file_names
        .into_iter()
        .filter_map(|name| parse_sequence_number(name, format))
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}
