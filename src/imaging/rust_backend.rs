//! Pure Rust image backend on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG) | `image::ImageReader` with content sniffing |
//! | Encode → PNG | `PngEncoder` with best compression + adaptive filtering |
//! | Encode → JPEG | `JpegEncoder` at the requested quality, alpha dropped |

use super::backend::{BackendError, ImageBackend};
use super::params::{Quality, SaveFormat, SaveSpec};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::{DynamicImage, ImageReader};
use std::io::Write;
use std::path::Path;

/// Input extensions accepted for wallpapers.
const INPUT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Returns the set of wallpaper file extensions the pipeline accepts.
pub fn supported_input_extensions() -> &'static [&'static str] {
    INPUT_EXTENSIONS
}

/// Whether `path` has one of the [supported input extensions](supported_input_extensions),
/// compared case-insensitively.
pub fn is_supported_input(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            INPUT_EXTENSIONS
                .iter()
                .any(|supported| e.eq_ignore_ascii_case(supported))
        })
}

/// Backend using the `image` crate's pure Rust codecs.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    if !path.exists() {
        return Err(BackendError::NotFound(path.to_path_buf()));
    }
    let io_err = |source| BackendError::Io {
        path: path.to_path_buf(),
        source,
    };
    ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?
        .decode()
        .map_err(|e| BackendError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Encode `image` into `writer`.
///
/// PNG keeps the alpha channel and uses the slowest, smallest compression.
/// JPEG discards alpha without blending, so transparent regions must already
/// have been flattened onto an opaque background.
pub fn encode_to_writer<W: Write>(
    image: &DynamicImage,
    format: SaveFormat,
    quality: Quality,
    writer: W,
) -> Result<(), BackendError> {
    match format {
        SaveFormat::Png => {
            let encoder = PngEncoder::new_with_quality(
                writer,
                CompressionType::Best,
                PngFilterType::Adaptive,
            );
            image
                .write_with_encoder(encoder)
                .map_err(|e| BackendError::Encode(format!("PNG encode failed: {e}")))
        }
        SaveFormat::Jpeg => {
            let opaque = DynamicImage::ImageRgb8(image.to_rgb8());
            let encoder = JpegEncoder::new_with_quality(writer, quality.value());
            opaque
                .write_with_encoder(encoder)
                .map_err(|e| BackendError::Encode(format!("JPEG encode failed: {e}")))
        }
    }
}

/// Encode `image` into an in-memory buffer.
pub fn encode_to_vec(
    image: &DynamicImage,
    format: SaveFormat,
    quality: Quality,
) -> Result<Vec<u8>, BackendError> {
    let mut bytes = Vec::new();
    encode_to_writer(image, format, quality, &mut bytes)?;
    Ok(bytes)
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        load_image(path)
    }

    /// Encodes fully in memory first, so a failed encode leaves nothing at `spec.path`.
    fn encode(&self, image: &DynamicImage, spec: &SaveSpec) -> Result<(), BackendError> {
        let bytes = encode_to_vec(image, spec.format, spec.quality)?;
        std::fs::write(&spec.path, bytes).map_err(|source| BackendError::Io {
            path: spec.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageEncoder, Rgba, RgbaImage, RgbImage};
    use std::io::BufWriter;

    /// Create a small valid JPEG file with the given dimensions.
    fn create_test_jpeg(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let file = std::fs::File::create(path).unwrap();
        let writer = BufWriter::new(file);
        JpegEncoder::new(writer)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
    }

    fn gradient_rgba(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7 % 256) as u8, (y * 3 % 256) as u8, 200, ((x + y) % 256) as u8])
        }))
    }

    #[test]
    fn supported_extensions_are_jpeg_and_png() {
        assert_eq!(supported_input_extensions(), &["jpg", "jpeg", "png"]);
        assert!(is_supported_input(Path::new("a/B.JPG")));
        assert!(is_supported_input(Path::new("a/b.Png")));
        assert!(!is_supported_input(Path::new("a/b.gif")));
        assert!(!is_supported_input(Path::new("a/jpg")));
    }

    #[test]
    fn decode_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 200, 150);

        let img = RustBackend::new().decode(&path).unwrap();
        assert_eq!(img.dimensions(), (200, 150));
        // Alpha is available after conversion even though JPEG has none
        assert_eq!(img.to_rgba8().get_pixel(0, 0)[3], 255);
    }

    #[test]
    fn decode_nonexistent_file_is_not_found() {
        let result = RustBackend::new().decode(Path::new("/nonexistent/image.jpg"));
        assert!(matches!(result, Err(BackendError::NotFound(_))));
    }

    #[test]
    fn decode_garbage_is_decode_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        let result = RustBackend::new().decode(&path);
        assert!(matches!(result, Err(BackendError::Decode { .. })));
    }

    #[test]
    fn png_round_trip_is_lossless() {
        let original = gradient_rgba(37, 23);
        let bytes = encode_to_vec(&original, SaveFormat::Png, Quality::default()).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.to_rgba8(), original.to_rgba8());
    }

    #[test]
    fn jpeg_output_is_opaque_and_close() {
        let original = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            32,
            32,
            Rgba([120, 60, 200, 255]),
        ));
        let bytes = encode_to_vec(&original, SaveFormat::Jpeg, Quality::new(95)).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert!(!decoded.color().has_alpha());
        let px = decoded.to_rgb8().get_pixel(16, 16).0;
        for (got, want) in px.iter().zip([120u8, 60, 200]) {
            assert!(got.abs_diff(want) <= 6, "channel {got} too far from {want}");
        }
    }

    #[test]
    fn failed_encode_leaves_no_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("too_wide.jpg");

        // JPEG dimensions are limited to 65535
        let err = RustBackend::new()
            .encode(
                &DynamicImage::new_rgb8(70_000, 1),
                &SaveSpec {
                    format: SaveFormat::Jpeg,
                    quality: Quality::default(),
                    path: path.clone(),
                },
            )
            .unwrap_err();

        assert!(matches!(err, BackendError::Encode(_)));
        assert!(!path.exists());
    }

    #[test]
    fn encode_writes_file_at_spec_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.jpg");

        RustBackend::new()
            .encode(
                &gradient_rgba(16, 16),
                &SaveSpec {
                    format: SaveFormat::Jpeg,
                    quality: Quality::new(70),
                    path: path.clone(),
                },
            )
            .unwrap();

        assert!(path.exists());
        assert_eq!(image::image_dimensions(&path).unwrap(), (16, 16));
    }

    #[test]
    fn encode_into_missing_directory_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("no/such/dir/out.png");

        let result = RustBackend::new().encode(
            &gradient_rgba(4, 4),
            &SaveSpec {
                format: SaveFormat::Png,
                quality: Quality::default(),
                path: path.clone(),
            },
        );
        assert!(matches!(result, Err(BackendError::Io { path: p, .. }) if p == path));
    }
}
