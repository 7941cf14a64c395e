//! The phone-frame template.
//!
//! A template is loaded once and then only ever borrowed: compositing copies
//! the canvas underneath it, never the template itself, so a single
//! [`Template`] can be shared by every wallpaper processed in a session.

use super::backend::ImageBackend;
use super::operations::{CompositeError, Result};
use super::params::{TEMPLATE_HEIGHT, TEMPLATE_WIDTH};
use image::RgbaImage;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    image: RgbaImage,
}

impl Template {
    /// Read the template at `path`, keeping (or adding) its alpha channel.
    ///
    /// Fails with [`CompositeError::NotFound`] when the file is missing and
    /// [`CompositeError::TemplateDimensions`] when it is not
    /// `TEMPLATE_WIDTH × TEMPLATE_HEIGHT`.
    #[tracing::instrument(skip(backend))]
    pub fn load(backend: &impl ImageBackend, path: &Path) -> Result<Self> {
        let image = backend.decode(path)?.to_rgba8();
        let template = Self::from_image(image)?;
        tracing::debug!("template loaded");
        Ok(template)
    }

    pub fn from_image(image: RgbaImage) -> Result<Self> {
        let actual = image.dimensions();
        if actual != (TEMPLATE_WIDTH, TEMPLATE_HEIGHT) {
            return Err(CompositeError::TemplateDimensions {
                expected: (TEMPLATE_WIDTH, TEMPLATE_HEIGHT),
                actual,
            });
        }
        Ok(Self { image })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;

    #[test]
    fn load_accepts_reference_size() {
        let backend = MockBackend::new().with_solid(
            "/t.png",
            (TEMPLATE_WIDTH, TEMPLATE_HEIGHT),
            [0, 0, 0, 0],
        );
        let t = Template::load(&backend, Path::new("/t.png")).unwrap();
        assert_eq!(t.dimensions(), (471, 923));
    }

    #[test]
    fn load_missing_is_not_found() {
        let err = Template::load(&MockBackend::new(), Path::new("/nope.png")).unwrap_err();
        assert!(matches!(err, CompositeError::NotFound(p) if p == Path::new("/nope.png")));
    }

    #[test]
    fn wrong_size_is_rejected() {
        let err = Template::from_image(RgbaImage::new(470, 923)).unwrap_err();
        assert!(matches!(
            err,
            CompositeError::TemplateDimensions {
                expected: (471, 923),
                actual: (470, 923)
            }
        ));
    }
}
