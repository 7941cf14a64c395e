//! Image processing, pure Rust on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (JPEG, PNG), converted to RGBA |
//! | **Resize to cover** | `imageops::resize` with `Lanczos3` |
//! | **Center crop** | `imageops::crop_imm` |
//! | **Round corners / paste / composite** | per-pixel straight-alpha blending |
//! | **Grid** | `imageops::replace` onto an opaque RGB canvas |
//! | **Encode** | `PngEncoder` (best compression) / `JpegEncoder` (quality 1–100) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Frame constants and data structures describing outputs
//! - **Color**: strict `#RRGGBB` parsing
//! - **Compositor**: Pure pixel operations on in-memory buffers
//! - **Template**: the frame overlay, loaded once and shared read-only
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: The per-wallpaper pipeline, grid assembly and [`Compositor`]

pub mod backend;
pub mod calculations;
pub mod color;
pub mod compositor;
pub mod operations;
mod params;
pub mod rust_backend;
mod template;

pub use backend::{BackendError, ImageBackend};
pub use color::{HexColor, InvalidColorError};
pub use operations::{
    CompositeError, Compositor, GridImage, ProcessedImage, compose_wallpaper, process_wallpaper,
    process_wallpaper_hex, save_image, tile_processed,
};
pub use params::{
    CONTENT_HEIGHT, CONTENT_WIDTH, CORNER_RADIUS, GridLayout, MAX_GRID_SIDE, Quality, SaveFormat,
    SaveSpec, TEMPLATE_HEIGHT, TEMPLATE_WIDTH,
};
pub use rust_backend::{RustBackend, encode_to_vec, is_supported_input};
pub use template::Template;
