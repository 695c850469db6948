use std::path::PathBuf;
use thiserror::Error;

/// Errors reading page geometry. A page without a trim box is not an error.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("Not a PDF file: {path}")]
    NotAPdf { path: PathBuf },

    #[error("Failed to parse PDF {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("PDF has no pages: {path}")]
    NoPages { path: PathBuf },

    #[error("Malformed page geometry: {0}")]
    Malformed(String),
}
