//! Pure calculation functions for frame geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate dimensions needed to cover a target area (resize before crop).
///
/// Uses a single scale factor `max(tw / sw, th / sh)` for both axes, so the
/// source aspect ratio is preserved and the result is at least as large as
/// the target in both dimensions. Each side is rounded to the nearest pixel
/// and never falls below the target.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height), both non-zero
/// * `target` - Target area dimensions (width, height)
///
/// # Returns
/// * `(width, height)` - Cover dimensions (at least one matches target)
pub fn calculate_cover_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let scale = f64::max(
        tgt_w as f64 / src_w as f64,
        tgt_h as f64 / src_h as f64,
    );

    let w = (src_w as f64 * scale).round() as u32;
    let h = (src_h as f64 * scale).round() as u32;
    (w.max(tgt_w), h.max(tgt_h))
}

/// A crop rectangle in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl CropBox {
    pub fn right(&self) -> u32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// Symmetric crop box removing equal margins from opposite edges.
///
/// When the excess is odd, the extra pixel is dropped from the right/bottom
/// (`left = floor((W - tw) / 2)`). Returns `None` if the image is smaller
/// than the target in either axis.
pub fn calculate_center_crop(image: (u32, u32), target: (u32, u32)) -> Option<CropBox> {
    let (img_w, img_h) = image;
    let (tgt_w, tgt_h) = target;

    let excess_w = img_w.checked_sub(tgt_w)?;
    let excess_h = img_h.checked_sub(tgt_h)?;

    Some(CropBox {
        left: excess_w / 2,
        top: excess_h / 2,
        width: tgt_w,
        height: tgt_h,
    })
}

/// Top-left offset that centers `inner` inside `outer` (floor division).
///
/// Saturates at zero when `inner` is larger than `outer`.
pub fn calculate_centered_offset(outer: (u32, u32), inner: (u32, u32)) -> (u32, u32) {
    (
        outer.0.saturating_sub(inner.0) / 2,
        outer.1.saturating_sub(inner.1) / 2,
    )
}

/// Row and column of the cell at `index` in a row-major grid with `cols` columns.
pub fn grid_cell(index: usize, cols: u32) -> (u32, u32) {
    let cols = cols as usize;
    ((index / cols) as u32, (index % cols) as u32)
}

/// Pixel offset of the cell at `index` when every cell is `cell` sized.
pub fn grid_cell_offset(index: usize, cols: u32, cell: (u32, u32)) -> (u32, u32) {
    let (row, col) = grid_cell(index, cols);
    (col.saturating_mul(cell.0), row.saturating_mul(cell.1))
}

/// Full grid canvas size: `(cols · cw) × (rows · ch)`, saturating at `u32::MAX`.
pub fn grid_dimensions(rows: u32, cols: u32, cell: (u32, u32)) -> (u32, u32) {
    (cols.saturating_mul(cell.0), rows.saturating_mul(cell.1))
}
