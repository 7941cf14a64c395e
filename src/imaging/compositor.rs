//! Pixel-level compositing operations.
//!
//! Inputs are taken by reference and results are freshly allocated buffers,
//! except [`paste_masked`], which draws into a canvas the caller owns.
//! Nothing here touches the filesystem.
//! Blending uses straight (non-premultiplied) alpha normalized to `0.0..=1.0`.

use super::calculations::{
    calculate_center_crop, calculate_cover_dimensions, grid_cell_offset, grid_dimensions,
};
use super::color::HexColor;
use super::params::GridLayout;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// Scale `image` uniformly so it covers `target_w × target_h`.
///
/// Resampling is Lanczos3. The result is at least as large as the target in
/// both axes; see [`calculate_cover_dimensions`] for the rounding rule.
pub fn resize_to_cover(image: &RgbaImage, target_w: u32, target_h: u32) -> RgbaImage {
    let (w, h) = calculate_cover_dimensions(image.dimensions(), (target_w, target_h));
    if (w, h) == image.dimensions() {
        return image.clone();
    }
    imageops::resize(image, w, h, FilterType::Lanczos3)
}

/// Crop the middle `target_w × target_h` region out of `image`.
///
/// Returns `None` when the image is smaller than the target in either axis.
pub fn center_crop(image: &RgbaImage, target_w: u32, target_h: u32) -> Option<RgbaImage> {
    let b = calculate_center_crop(image.dimensions(), (target_w, target_h))?;
    Some(imageops::crop_imm(image, b.left, b.top, b.width, b.height).to_image())
}

/// Whether the pixel at `(x, y)` lies inside a rounded rectangle covering a
/// `width × height` box with corner radius `radius`.
///
/// The test uses pixel centers, so a pixel is kept when its center is within
/// the quarter circle of its corner.
pub fn inside_rounded_rect(x: u32, y: u32, width: u32, height: u32, radius: u32) -> bool {
    let r = radius.min(width / 2).min(height / 2) as f64;
    if r == 0.0 {
        return x < width && y < height;
    }

    let px = x as f64 + 0.5;
    let py = y as f64 + 0.5;
    let (w, h) = (width as f64, height as f64);

    let cx = if px < r {
        r
    } else if px > w - r {
        w - r
    } else {
        return true;
    };
    let cy = if py < r {
        r
    } else if py > h - r {
        h - r
    } else {
        return true;
    };

    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= r * r
}

/// Zero the alpha of every pixel outside a rounded-rectangle mask.
///
/// Pixels inside the mask keep their original alpha.
pub fn round_corners(image: &RgbaImage, radius: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    let mut out = image.clone();
    for (x, y, px) in out.enumerate_pixels_mut() {
        if !inside_rounded_rect(x, y, w, h, radius) {
            px[3] = 0;
        }
    }
    out
}

/// A fully opaque `width × height` canvas filled with `color`.
pub fn solid_canvas(width: u32, height: u32, color: HexColor) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color.to_rgba())
}

/// Paste `src` onto `dst` at `(x, y)`, using `src`'s own alpha as the mask.
///
/// Color channels become `dst · (1 − m) + src · m` where `m` is the source
/// alpha; an opaque `dst` stays opaque. Pixels that fall outside `dst` are
/// clipped.
pub fn paste_masked(dst: &mut RgbaImage, src: &RgbaImage, x: u32, y: u32) {
    let (dw, dh) = dst.dimensions();
    for (sx, sy, s) in src.enumerate_pixels() {
        let (tx, ty) = (x + sx, y + sy);
        if tx >= dw || ty >= dh {
            continue;
        }
        let d = dst.get_pixel_mut(tx, ty);
        *d = over(*d, *s);
    }
}

/// Source-over blend of one straight-alpha pixel onto another.
pub fn over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    if sa == 0.0 {
        return dst;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    let mut out = [0u8; 4];
    for c in 0..3 {
        let sc = src[c] as f32 / 255.0;
        let dc = dst[c] as f32 / 255.0;
        let v = (sc * sa + dc * da * (1.0 - sa)) / out_a;
        out[c] = (v * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}

/// Composite `top` over `bottom` pixel by pixel, returning a new image.
///
/// Both images must have the same dimensions; `None` otherwise. Neither
/// input is modified.
pub fn alpha_composite(bottom: &RgbaImage, top: &RgbaImage) -> Option<RgbaImage> {
    if bottom.dimensions() != top.dimensions() {
        return None;
    }
    let mut out = bottom.clone();
    for (d, s) in out.pixels_mut().zip(top.pixels()) {
        *d = over(*d, *s);
    }
    Some(out)
}

/// Blend any transparency in `image` onto an opaque `background`.
pub fn flatten(image: &RgbaImage, background: HexColor) -> RgbImage {
    let bg = background.to_rgba();
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let px = over(bg, *image.get_pixel(x, y));
        Rgb([px[0], px[1], px[2]])
    })
}

/// Lay `cells` out row-major on an opaque `(cols · cw) × (rows · ch)` canvas
/// for the given `layout`.
///
/// Each cell is flattened onto `background` first (when it carries
/// transparency) and pasted at `(col · cw, row · ch)`, where `cw × ch` is the
/// size of the first cell. Cells beyond `rows · cols` are ignored; missing
/// cells leave the background showing. Callers enforce the exact count.
pub fn tile_grid(cells: &[RgbaImage], layout: GridLayout, background: HexColor) -> RgbImage {
    let cell = cells.first().map(|c| c.dimensions()).unwrap_or((0, 0));
    let (gw, gh) = grid_dimensions(layout.rows(), layout.cols(), cell);
    let mut canvas = RgbImage::from_pixel(gw, gh, background.to_rgb());

    for (i, img) in cells.iter().take(layout.required_count()).enumerate() {
        let (x, y) = grid_cell_offset(i, layout.cols(), cell);
        let opaque = flatten(img, background);
        imageops::replace(&mut canvas, &opaque, x as i64, y as i64);
    }
    canvas
}
