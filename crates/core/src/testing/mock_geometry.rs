//! Mock geometry extractor for testing.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::geometry::{GeometryError, GeometryExtractor, PageBoxes, PdfBox, MM_PER_POINT};

/// Mock implementation of the GeometryExtractor trait.
///
/// Returns a configured trim box for every file, without reading it.
#[derive(Debug, Default)]
pub struct MockGeometryExtractor {
    trim_box: Mutex<Option<PdfBox>>,
    error: Mutex<Option<String>>,
    calls: Mutex<Vec<PathBuf>>,
}

impl MockGeometryExtractor {
    /// Extractor that reports no trim box.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor that reports a trim box of `width` x `height` millimeters.
    pub fn with_trim_mm(width: f64, height: f64) -> Self {
        let extractor = Self::new();
        extractor.set_trim_box(Some(PdfBox::new(
            0.0,
            0.0,
            width / MM_PER_POINT,
            height / MM_PER_POINT,
        )));
        extractor
    }

    pub fn set_trim_box(&self, trim_box: Option<PdfBox>) {
        *self.trim_box.lock().unwrap_or_else(PoisonError::into_inner) = trim_box;
    }

    /// Make every call fail as malformed geometry.
    pub fn set_error(&self, reason: &str) {
        *self.error.lock().unwrap_or_else(PoisonError::into_inner) = Some(reason.to_string());
    }

    /// Paths inspected so far.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, path: &Path) -> Result<Option<PdfBox>, GeometryError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_path_buf());

        if let Some(reason) = self
            .error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(GeometryError::Malformed(reason));
        }
        Ok(*self.trim_box.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl GeometryExtractor for MockGeometryExtractor {
    fn trim_box(&self, path: &Path) -> Result<Option<PdfBox>, GeometryError> {
        self.record(path)
    }

    fn all_boxes(&self, path: &Path) -> Result<PageBoxes, GeometryError> {
        let trim_box = self.record(path)?;
        Ok(PageBoxes {
            trim_box,
            ..PageBoxes::default()
        })
    }
}
