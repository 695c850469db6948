//! Trait definitions for the staging module.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use super::error::StagingError;
use crate::credentials::Credential;

/// Somewhere artwork PDFs can be fetched from.
#[async_trait]
pub trait ArtworkSource: Send + Sync {
    /// Returns the name of this source implementation.
    fn name(&self) -> &str;

    /// Downloads the artwork behind `url` into `destination`.
    ///
    /// Parent directories are created as needed. Returns the number of
    /// bytes written.
    async fn fetch(
        &self,
        url: &str,
        destination: &Path,
        credential: Option<&Credential>,
    ) -> Result<u64, StagingError>;
}

#[async_trait]
impl<T: ArtworkSource + ?Sized> ArtworkSource for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch(
        &self,
        url: &str,
        destination: &Path,
        credential: Option<&Credential>,
    ) -> Result<u64, StagingError> {
        (**self).fetch(url, destination, credential).await
    }
}
