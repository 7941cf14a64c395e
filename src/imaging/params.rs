//! Parameter types for image operations.
//!
//! These structs describe *what* to produce, not *how* to produce it. They are
//! the interface between the high-level [`operations`](super::operations)
//! module (which decides what to composite and where to write it) and the
//! [`backend`](super::backend) (which does the decoding and encoding).
//!
//! ## Types
//!
//! - Frame geometry constants: template size, content window, corner radius.
//! - [`Quality`]: JPEG encoding quality (1–100, default 95). Clamped on construction.
//! - [`SaveFormat`]: PNG (lossless, alpha) or JPEG (lossy, opaque).
//! - [`SaveSpec`]: format + quality + destination path for one encode.
//! - [`GridLayout`]: `rows × cols` arrangement of processed images, each side 1 to [`MAX_GRID_SIDE`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Template width in pixels. Every processed image has this width.
pub const TEMPLATE_WIDTH: u32 = 471;
/// Template height in pixels. Every processed image has this height.
pub const TEMPLATE_HEIGHT: u32 = 923;
/// Width of the wallpaper window inside the frame.
pub const CONTENT_WIDTH: u32 = 393;
/// Height of the wallpaper window inside the frame.
pub const CONTENT_HEIGHT: u32 = 852;
/// Corner radius applied to the wallpaper before it is placed on the canvas.
pub const CORNER_RADIUS: u32 = 22;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

/// Output encoding for a finished composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveFormat {
    #[default]
    #[serde(rename = "PNG", alias = "png")]
    Png,
    #[serde(rename = "JPG", alias = "JPEG", alias = "jpg", alias = "jpeg")]
    Jpeg,
}

impl SaveFormat {
    /// File extension used when this crate names a file (`png` / `jpg`).
    pub fn extension(self) -> &'static str {
        match self {
            SaveFormat::Png => "png",
            SaveFormat::Jpeg => "jpg",
        }
    }

    /// Infer the format from a path's extension, case-insensitively.
    ///
    /// Returns `None` for anything other than `png`, `jpg` or `jpeg`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(SaveFormat::Png),
            "jpg" | "jpeg" => Some(SaveFormat::Jpeg),
            _ => None,
        }
    }
}

impl fmt::Display for SaveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveFormat::Png => f.write_str("PNG"),
            SaveFormat::Jpeg => f.write_str("JPEG"),
        }
    }
}

/// Everything an encoder needs to write one file.
///
/// `quality` is ignored for PNG.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveSpec {
    pub format: SaveFormat,
    pub quality: Quality,
    pub path: PathBuf,
}

/// Largest number of rows or columns in a grid.
pub const MAX_GRID_SIDE: u32 = 10;

/// Grid arrangement: `rows × cols` cells, filled row-major in upload order.
///
/// Fields are private so every layout has passed the bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    rows: u32,
    cols: u32,
}

impl GridLayout {
    /// Returns `None` unless both dimensions are within `1..=MAX_GRID_SIDE`.
    pub fn new(rows: u32, cols: u32) -> Option<Self> {
        let valid = 1..=MAX_GRID_SIDE;
        (valid.contains(&rows) && valid.contains(&cols)).then_some(Self { rows, cols })
    }

    pub fn rows(self) -> u32 {
        self.rows
    }

    pub fn cols(self) -> u32 {
        self.cols
    }

    pub fn single() -> Self {
        Self { rows: 1, cols: 1 }
    }

    /// Number of processed images needed to fill every cell.
    pub fn required_count(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn is_single(self) -> bool {
        self.required_count() == 1
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::single()
    }
}

impl fmt::Display for GridLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
