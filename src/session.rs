//! Per-run working state: the ordered upload list, the chosen grid layout,
//! and the most recent render.
//!
//! A [`Session`] is an ordinary value owned by the caller. Pipeline calls
//! borrow it, so nothing is reached through globals. Uploads keep their
//! insertion order, which is also the row-major order of grid cells.

use crate::imaging::{CompositeError, Compositor, GridLayout, ImageBackend, SaveSpec, is_supported_input};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("layout needs {required} images but {uploaded} are uploaded")]
    CountMismatch { required: usize, uploaded: usize },
    #[error("no upload at index {index} (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("nothing has been rendered yet")]
    NothingRendered,
    #[error(transparent)]
    Composite(#[from] CompositeError),
}

/// Outcome of [`Session::add_images`], in input order per bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddReport {
    pub added: Vec<PathBuf>,
    /// Already in the upload list (or repeated within the same call).
    pub duplicates: Vec<PathBuf>,
    /// Not a `.jpg`, `.jpeg` or `.png` file.
    pub rejected: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    uploads: Vec<PathBuf>,
    layout: GridLayout,
    last_render: Option<DynamicImage>,
}

impl Session {
    pub fn new(layout: GridLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Append images to the upload list.
    ///
    /// Paths already present are skipped, as are files whose extension is
    /// not a supported input format. Existence is not checked here; a
    /// missing file surfaces when the session is processed.
    pub fn add_images<I, P>(&mut self, paths: I) -> AddReport
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut report = AddReport::default();
        for path in paths {
            let path = path.into();
            if !is_supported_input(&path) {
                tracing::warn!(path = %path.display(), "skipping unsupported file");
                report.rejected.push(path);
            } else if self.uploads.contains(&path) {
                report.duplicates.push(path);
            } else {
                self.uploads.push(path.clone());
                report.added.push(path);
            }
        }
        report
    }

    /// Remove and return the upload at `index`.
    pub fn remove(&mut self, index: usize) -> Result<PathBuf, SessionError> {
        if index >= self.uploads.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: self.uploads.len(),
            });
        }
        Ok(self.uploads.remove(index))
    }

    /// Drop every upload and the last render.
    pub fn clear(&mut self) {
        self.uploads.clear();
        self.last_render = None;
    }

    /// Change the layout. A different layout drops the last render, which
    /// no longer matches it; uploads are kept.
    pub fn set_layout(&mut self, layout: GridLayout) {
        if layout != self.layout {
            self.last_render = None;
        }
        self.layout = layout;
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    pub fn uploads(&self) -> &[PathBuf] {
        &self.uploads
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.uploads.iter().any(|p| p == path)
    }

    pub fn required_count(&self) -> usize {
        self.layout.required_count()
    }

    pub fn uploaded_count(&self) -> usize {
        self.uploads.len()
    }

    /// True when the upload count matches the layout exactly.
    pub fn is_ready(&self) -> bool {
        self.uploaded_count() == self.required_count()
    }

    pub fn last_render(&self) -> Option<&DynamicImage> {
        self.last_render.as_ref()
    }

    /// Render the uploads with `compositor` and keep the result.
    ///
    /// On any error the upload list and the previous render are left as
    /// they were.
    pub fn process<B: ImageBackend>(
        &mut self,
        compositor: &Compositor<B>,
    ) -> Result<&DynamicImage, SessionError> {
        if !self.is_ready() {
            return Err(SessionError::CountMismatch {
                required: self.required_count(),
                uploaded: self.uploaded_count(),
            });
        }
        let image = compositor.render(&self.uploads, self.layout)?;
        Ok(&*self.last_render.insert(image))
    }

    /// Encode the last render to `spec`.
    pub fn save<B: ImageBackend>(
        &self,
        compositor: &Compositor<B>,
        spec: &SaveSpec,
    ) -> Result<(), SessionError> {
        let image = self.last_render.as_ref().ok_or(SessionError::NothingRendered)?;
        compositor.save(image, spec)?;
        Ok(())
    }
}
