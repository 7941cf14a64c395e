//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the only two operations that touch the
//! filesystem: decoding an input (template or wallpaper) and encoding a
//! finished composite. Everything between those two steps is pure pixel work
//! in [`compositor`](super::compositor).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the `MockBackend` below to drive the pipeline without
//! files on disk.

use super::params::SaveSpec;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Trait for image I/O backends.
///
/// `decode` always yields an image with an alpha channel available (callers
/// convert with `to_rgba8`), and fails with [`BackendError::NotFound`] when
/// the path does not exist. `encode` writes exactly one file at `spec.path`.
pub trait ImageBackend {
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    fn encode(&self, image: &DynamicImage, spec: &SaveSpec) -> Result<(), BackendError>;
}
