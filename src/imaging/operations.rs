//! High-level image operations.
//!
//! These functions combine the pure [`compositor`](super::compositor) steps
//! with backend I/O. The per-wallpaper pipeline is:
//!
//! ```text
//! decode (RGBA) → resize to cover 393×852 → center crop 393×852
//!   → round corners (22 px) → paste centered on a 471×923 background canvas
//!   → template composited on top
//! ```
//!
//! Several processed wallpapers can then be tiled into a grid. [`Compositor`]
//! bundles the backend, template and background color for callers that
//! process many wallpapers in one session.

use super::backend::{BackendError, ImageBackend};
use super::calculations::calculate_centered_offset;
use super::color::{HexColor, InvalidColorError};
use super::compositor::{
    alpha_composite, center_crop, paste_masked, resize_to_cover, round_corners, solid_canvas,
    tile_grid,
};
use super::params::{
    CONTENT_HEIGHT, CONTENT_WIDTH, CORNER_RADIUS, GridLayout, MAX_GRID_SIDE, SaveSpec,
    TEMPLATE_HEIGHT, TEMPLATE_WIDTH,
};
use super::rust_backend::RustBackend;
use super::template::Template;
use image::{DynamicImage, RgbImage, RgbaImage};
use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompositeError {
    #[error("image not found: {0}")]
    NotFound(PathBuf),
    #[error(transparent)]
    InvalidColor(#[from] InvalidColorError),
    #[error(transparent)]
    Backend(BackendError),
    #[error("template is {actual:?}, expected {expected:?}")]
    TemplateDimensions {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("image has zero width or height: {0}")]
    EmptySource(PathBuf),
    #[error("image {actual:?} is smaller than crop target {target:?}")]
    TooSmall {
        actual: (u32, u32),
        target: (u32, u32),
    },
    #[error("invalid grid layout {rows}x{cols}: rows and columns must be 1-{max}", max = MAX_GRID_SIDE)]
    InvalidLayout { rows: u32, cols: u32 },
    #[error("{layout} grid needs {required} images, got {supplied}")]
    GridCount {
        layout: GridLayout,
        required: usize,
        supplied: usize,
    },
}

impl From<BackendError> for CompositeError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound(path) => CompositeError::NotFound(path),
            other => CompositeError::Backend(other),
        }
    }
}

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, CompositeError>;

/// One wallpaper composited into the frame: always `TEMPLATE_WIDTH × TEMPLATE_HEIGHT` RGBA.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedImage {
    image: RgbaImage,
}

impl ProcessedImage {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn into_dynamic(self) -> DynamicImage {
        DynamicImage::ImageRgba8(self.image)
    }
}

/// Several processed wallpapers tiled row-major; always opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct GridImage {
    image: RgbImage,
    layout: GridLayout,
}

impl GridImage {
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn into_dynamic(self) -> DynamicImage {
        DynamicImage::ImageRgb8(self.image)
    }
}

/// Run the in-memory part of the pipeline on an already decoded wallpaper.
///
/// `origin` is only used to label errors.
pub fn compose_wallpaper(
    wallpaper: &RgbaImage,
    origin: &Path,
    template: &Template,
    background: HexColor,
) -> Result<ProcessedImage> {
    if wallpaper.width() == 0 || wallpaper.height() == 0 {
        return Err(CompositeError::EmptySource(origin.to_path_buf()));
    }

    let resized = resize_to_cover(wallpaper, CONTENT_WIDTH, CONTENT_HEIGHT);
    tracing::debug!(
        width = resized.width(),
        height = resized.height(),
        "resized to cover"
    );

    let cropped = center_crop(&resized, CONTENT_WIDTH, CONTENT_HEIGHT).ok_or(
        CompositeError::TooSmall {
            actual: resized.dimensions(),
            target: (CONTENT_WIDTH, CONTENT_HEIGHT),
        },
    )?;
    let rounded = round_corners(&cropped, CORNER_RADIUS);

    let mut canvas = solid_canvas(TEMPLATE_WIDTH, TEMPLATE_HEIGHT, background);
    let (x, y) = calculate_centered_offset(
        (TEMPLATE_WIDTH, TEMPLATE_HEIGHT),
        (CONTENT_WIDTH, CONTENT_HEIGHT),
    );
    paste_masked(&mut canvas, &rounded, x, y);

    let image = alpha_composite(&canvas, template.image()).ok_or(
        CompositeError::TemplateDimensions {
            expected: canvas.dimensions(),
            actual: template.dimensions(),
        },
    )?;
    Ok(ProcessedImage { image })
}

/// Decode `source` and composite it into the frame.
///
/// Fails with [`CompositeError::NotFound`] when `source` does not exist.
#[tracing::instrument(skip(backend, template))]
pub fn process_wallpaper(
    backend: &impl ImageBackend,
    source: &Path,
    template: &Template,
    background: HexColor,
) -> Result<ProcessedImage> {
    let wallpaper = backend.decode(source)?.to_rgba8();
    tracing::debug!(
        width = wallpaper.width(),
        height = wallpaper.height(),
        "decoded wallpaper"
    );
    compose_wallpaper(&wallpaper, source, template, background)
}

/// [`process_wallpaper`] with the background given as a `#RRGGBB` string.
///
/// The color is validated before the source is read or any canvas exists.
pub fn process_wallpaper_hex(
    backend: &impl ImageBackend,
    source: &Path,
    template: &Template,
    background_hex: &str,
) -> Result<ProcessedImage> {
    let background = HexColor::parse(background_hex)?;
    process_wallpaper(backend, source, template, background)
}

/// Tile processed wallpapers into a `layout` grid.
///
/// Fewer images than cells is an error. Surplus images are dropped.
pub fn tile_processed(
    images: &[ProcessedImage],
    layout: GridLayout,
    background: HexColor,
) -> Result<GridImage> {
    let required = layout.required_count();
    if images.len() < required {
        return Err(CompositeError::GridCount {
            layout,
            required,
            supplied: images.len(),
        });
    }
    if images.len() > required {
        tracing::warn!(
            %layout,
            supplied = images.len(),
            "dropping images beyond grid capacity"
        );
    }

    let cells: Vec<RgbaImage> = images[..required]
        .iter()
        .map(|p| p.image.clone())
        .collect();
    let image = tile_grid(&cells, layout, background);
    Ok(GridImage { image, layout })
}

/// Encode a finished composite to `spec.path`.
pub fn save_image(backend: &impl ImageBackend, image: &DynamicImage, spec: &SaveSpec) -> Result<()> {
    backend.encode(image, spec)?;
    tracing::info!(path = %spec.path.display(), format = %spec.format, "saved");
    Ok(())
}

/// Backend, template and background color for one session.
///
/// The template is read on first use and then shared read-only by every
/// subsequent call.
pub struct Compositor<B: ImageBackend = RustBackend> {
    backend: B,
    template_path: PathBuf,
    template: OnceCell<Template>,
    background: HexColor,
}

impl Compositor<RustBackend> {
    pub fn new(template_path: impl Into<PathBuf>, background: HexColor) -> Self {
        Self::with_backend(RustBackend::new(), template_path, background)
    }
}

impl<B: ImageBackend> Compositor<B> {
    pub fn with_backend(backend: B, template_path: impl Into<PathBuf>, background: HexColor) -> Self {
        Self {
            backend,
            template_path: template_path.into(),
            template: OnceCell::new(),
            background,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn background(&self) -> HexColor {
        self.background
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// The template, loading it on first call.
    pub fn template(&self) -> Result<&Template> {
        if let Some(template) = self.template.get() {
            return Ok(template);
        }
        let loaded = Template::load(&self.backend, &self.template_path)?;
        Ok(self.template.get_or_init(|| loaded))
    }

    pub fn process(&self, source: &Path) -> Result<ProcessedImage> {
        let template = self.template()?;
        process_wallpaper(&self.backend, source, template, self.background)
    }

    pub fn tile(&self, images: &[ProcessedImage], layout: GridLayout) -> Result<GridImage> {
        tile_processed(images, layout, self.background)
    }

    /// Process every source in order and assemble the final image.
    ///
    /// The count is checked against `layout` before anything is decoded. A
    /// 1×1 layout yields the processed RGBA image itself; larger layouts
    /// yield an opaque grid.
    #[tracing::instrument(skip(self, sources), fields(count = sources.len()))]
    pub fn render(&self, sources: &[PathBuf], layout: GridLayout) -> Result<DynamicImage> {
        let required = layout.required_count();
        if sources.len() != required {
            return Err(CompositeError::GridCount {
                layout,
                required,
                supplied: sources.len(),
            });
        }

        let mut processed = Vec::with_capacity(required);
        for (i, source) in sources.iter().enumerate() {
            tracing::debug!(index = i + 1, total = required, "processing");
            processed.push(self.process(source)?);
        }

        if layout.is_single() {
            return Ok(processed.remove(0).into_dynamic());
        }
        Ok(self.tile(&processed, layout)?.into_dynamic())
    }

    pub fn save(&self, image: &DynamicImage, spec: &SaveSpec) -> Result<()> {
        save_image(&self.backend, image, spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::imaging::params::{Quality, SaveFormat};
    use image::Rgba;

    const TEMPLATE: &str = "/assets/template.png";

    /// Template with an opaque 10 px white border and a transparent window.
    fn frame_template() -> RgbaImage {
        RgbaImage::from_fn(TEMPLATE_WIDTH, TEMPLATE_HEIGHT, |x, y| {
            let border = x < 10 || y < 10 || x >= TEMPLATE_WIDTH - 10 || y >= TEMPLATE_HEIGHT - 10;
            if border {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        })
    }

    fn backend_with_template() -> MockBackend {
        MockBackend::new().with_image(TEMPLATE, DynamicImage::ImageRgba8(frame_template()))
    }

    fn compositor(backend: MockBackend) -> Compositor<MockBackend> {
        Compositor::with_backend(backend, TEMPLATE, HexColor::parse("#0000FF").unwrap())
    }

    #[test]
    fn processed_size_is_fixed_for_any_aspect() {
        let template = Template::from_image(frame_template()).unwrap();
        for (w, h) in [(1920, 1080), (1080, 1920), (100, 100), (3, 4000), (4000, 3)] {
            let src = RgbaImage::from_pixel(w, h, Rgba([200, 0, 0, 255]));
            let out =
                compose_wallpaper(&src, Path::new("src.png"), &template, HexColor::BLACK).unwrap();
            assert_eq!(out.dimensions(), (471, 923), "source {w}x{h}");
        }
    }

    #[test]
    fn layers_background_wallpaper_and_template() {
        let template = Template::from_image(frame_template()).unwrap();
        let src = RgbaImage::from_pixel(800, 1200, Rgba([200, 0, 0, 255]));
        let bg = HexColor::parse("#00FF00").unwrap();
        let out = compose_wallpaper(&src, Path::new("src.png"), &template, bg).unwrap();
        let img = out.image();

        // Template border wins
        assert_eq!(*img.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        // Background between border and content window (content starts at 39, 35)
        assert_eq!(*img.get_pixel(20, 20), Rgba([0, 255, 0, 255]));
        // Rounded corner of the window shows background
        assert_eq!(*img.get_pixel(39, 35), Rgba([0, 255, 0, 255]));
        // Window center shows the wallpaper
        assert_eq!(*img.get_pixel(235, 461), Rgba([200, 0, 0, 255]));
        // Fully opaque everywhere
        assert!(img.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn template_is_unchanged_after_processing() {
        let template = Template::from_image(frame_template()).unwrap();
        let before = template.clone();
        let src = RgbaImage::from_pixel(50, 50, Rgba([1, 2, 3, 255]));
        compose_wallpaper(&src, Path::new("a.png"), &template, HexColor::BLACK).unwrap();
        assert_eq!(template, before);
    }

    #[test]
    fn empty_source_is_rejected() {
        let template = Template::from_image(frame_template()).unwrap();
        let err = compose_wallpaper(
            &RgbaImage::new(0, 10),
            Path::new("empty.png"),
            &template,
            HexColor::BLACK,
        )
        .unwrap_err();
        assert!(matches!(err, CompositeError::EmptySource(_)));
    }

    #[test]
    fn process_missing_source_is_not_found() {
        let c = compositor(backend_with_template());
        let err = c.process(Path::new("/missing.jpg")).unwrap_err();
        assert!(matches!(err, CompositeError::NotFound(p) if p == Path::new("/missing.jpg")));
    }

    #[test]
    fn invalid_hex_fails_before_decoding() {
        let backend = backend_with_template();
        let template = Template::from_image(frame_template()).unwrap();
        let err = process_wallpaper_hex(&backend, Path::new("/a.jpg"), &template, "#GG0000")
            .unwrap_err();
        assert!(matches!(err, CompositeError::InvalidColor(_)));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn template_loads_once() {
        let backend = backend_with_template()
            .with_solid("/a.jpg", (100, 200), [1, 1, 1, 255])
            .with_solid("/b.jpg", (300, 200), [2, 2, 2, 255]);
        let c = compositor(backend);

        c.process(Path::new("/a.jpg")).unwrap();
        c.process(Path::new("/b.jpg")).unwrap();

        let template_decodes = c
            .backend()
            .get_operations()
            .iter()
            .filter(|op| matches!(op, RecordedOp::Decode(p) if p == TEMPLATE))
            .count();
        assert_eq!(template_decodes, 1);
    }

    #[test]
    fn missing_template_is_not_found() {
        let c = Compositor::with_backend(
            MockBackend::new().with_solid("/a.jpg", (10, 10), [0, 0, 0, 255]),
            "/no-template.png",
            HexColor::BLACK,
        );
        let err = c.process(Path::new("/a.jpg")).unwrap_err();
        assert!(matches!(err, CompositeError::NotFound(p) if p == Path::new("/no-template.png")));
    }

    #[test]
    fn tile_rejects_partial_grid() {
        let template = Template::from_image(frame_template()).unwrap();
        let one = compose_wallpaper(
            &RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255])),
            Path::new("a"),
            &template,
            HexColor::BLACK,
        )
        .unwrap();
        let err = tile_processed(&[one], GridLayout::new(1, 2).unwrap(), HexColor::BLACK)
            .unwrap_err();
        assert!(matches!(
            err,
            CompositeError::GridCount {
                required: 2,
                supplied: 1,
                ..
            }
        ));
    }

    #[test]
    fn invalid_layout_reports_bounds() {
        let err = CompositeError::InvalidLayout { rows: 1, cols: 11 };
        assert_eq!(
            err.to_string(),
            "invalid grid layout 1x11: rows and columns must be 1-10"
        );
    }

    #[test]
    fn render_grid_has_cols_by_rows_size() {
        let backend = backend_with_template()
            .with_solid("/1.jpg", (100, 200), [10, 0, 0, 255])
            .with_solid("/2.jpg", (200, 100), [20, 0, 0, 255])
            .with_solid("/3.jpg", (50, 50), [30, 0, 0, 255])
            .with_solid("/4.jpg", (640, 480), [40, 0, 0, 255]);
        let c = compositor(backend);
        let sources: Vec<PathBuf> = ["/1.jpg", "/2.jpg", "/3.jpg", "/4.jpg"]
            .iter()
            .map(PathBuf::from)
            .collect();

        let out = c.render(&sources, GridLayout::new(2, 2).unwrap()).unwrap();
        assert_eq!((out.width(), out.height()), (942, 1846));
        assert!(!out.color().has_alpha());

        // Window center of cell 3 (row 1, col 0) shows the third wallpaper
        let rgb = out.to_rgb8();
        assert_eq!(rgb.get_pixel(235, 923 + 461).0, [30, 0, 0]);
        assert_eq!(rgb.get_pixel(471 + 235, 461).0, [20, 0, 0]);
    }

    #[test]
    fn render_single_returns_rgba_frame() {
        let backend = backend_with_template().with_solid("/1.jpg", (10, 10), [1, 1, 1, 255]);
        let c = compositor(backend);
        let out = c
            .render(&[PathBuf::from("/1.jpg")], GridLayout::single())
            .unwrap();
        assert_eq!((out.width(), out.height()), (471, 923));
        assert!(out.color().has_alpha());
    }

    #[test]
    fn render_count_mismatch_touches_nothing() {
        let c = compositor(backend_with_template());
        let err = c
            .render(&[PathBuf::from("/1.jpg")], GridLayout::new(1, 2).unwrap())
            .unwrap_err();
        assert!(matches!(err, CompositeError::GridCount { .. }));
        assert!(c.backend().get_operations().is_empty());
    }

    #[test]
    fn save_delegates_to_backend() {
        let c = compositor(MockBackend::new());
        c.save(
            &DynamicImage::new_rgb8(942, 923),
            &SaveSpec {
                format: SaveFormat::Png,
                quality: Quality::default(),
                path: "/out/wallpaper_001.png".into(),
            },
        )
        .unwrap();
        assert!(matches!(
            &c.backend().get_operations()[0],
            RecordedOp::Encode { path, format: SaveFormat::Png, width: 942, .. }
                if path == "/out/wallpaper_001.png"
        ));
    }
}
