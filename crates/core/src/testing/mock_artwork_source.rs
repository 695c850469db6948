//! Mock artwork source for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::credentials::Credential;
use crate::staging::{ArtworkSource, StagingError};

/// Bytes written for every successful fetch unless overridden.
pub const MOCK_ARTWORK: &[u8] = b"%PDF-1.5\n%mock artwork\n";

/// A recorded fetch for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedFetch {
    pub url: String,
    pub destination: PathBuf,
    /// Token the fetch was made with.
    pub credential: Option<String>,
}

/// Mock implementation of the ArtworkSource trait.
///
/// Writes fixed content to the destination instead of downloading.
/// Individual URLs can be made to fail with a 404.
///
/// # Example
///
/// ```rust,ignore
/// use labelbridge_core::testing::MockArtworkSource;
///
/// let source = MockArtworkSource::new();
/// source.fail_url("https://api.example.com/designs/d1").await;
///
/// // Run the processor...
///
/// assert_eq!(source.fetch_count().await, 4);
/// ```
#[derive(Debug)]
pub struct MockArtworkSource {
    fetches: Arc<RwLock<Vec<RecordedFetch>>>,
    failing_urls: Arc<RwLock<HashSet<String>>>,
    content: Arc<RwLock<Vec<u8>>>,
}

impl Default for MockArtworkSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockArtworkSource {
    /// Create a new mock source.
    pub fn new() -> Self {
        Self {
            fetches: Arc::new(RwLock::new(Vec::new())),
            failing_urls: Arc::new(RwLock::new(HashSet::new())),
            content: Arc::new(RwLock::new(MOCK_ARTWORK.to_vec())),
        }
    }

    /// Get all recorded fetches.
    pub async fn recorded_fetches(&self) -> Vec<RecordedFetch> {
        self.fetches.read().await.clone()
    }

    /// Get the number of fetches attempted.
    pub async fn fetch_count(&self) -> usize {
        self.fetches.read().await.len()
    }

    /// Make fetches of `url` fail.
    pub async fn fail_url(&self, url: &str) {
        self.failing_urls.write().await.insert(url.to_string());
    }

    /// Set the bytes written for successful fetches.
    pub async fn set_content(&self, content: Vec<u8>) {
        *self.content.write().await = content;
    }
}

#[async_trait]
impl ArtworkSource for MockArtworkSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(
        &self,
        url: &str,
        destination: &Path,
        credential: Option<&Credential>,
    ) -> Result<u64, StagingError> {
        self.fetches.write().await.push(RecordedFetch {
            url: url.to_string(),
            destination: destination.to_path_buf(),
            credential: credential.map(|c| c.token().to_string()),
        });

        if self.failing_urls.read().await.contains(url) {
            return Err(StagingError::DownloadStatus {
                url: url.to_string(),
                status: 404,
            });
        }

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = self.content.read().await.clone();
        tokio::fs::write(destination, &content).await?;
        Ok(content.len() as u64)
    }
}
