//! Artwork downloads from the order API.
//!
//! An artwork href does not point at the PDF itself. It returns a small
//! JSON descriptor `{"url": "..."}` whose `url` is a pre-signed link to
//! the file. Only the first request carries the credential.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use tokio::fs;
use tracing::debug;

use super::error::StagingError;
use super::traits::ArtworkSource;
use crate::config::OrderSourceConfig;
use crate::credentials::Credential;

#[derive(Debug, Deserialize)]
struct ArtworkDescriptor {
    url: Option<String>,
}

/// [`ArtworkSource`] backed by reqwest.
pub struct HttpArtworkSource {
    client: Client,
}

impl HttpArtworkSource {
    pub fn new(timeout: Duration) -> Result<Self, StagingError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StagingError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    pub fn from_config(config: &OrderSourceConfig) -> Result<Self, StagingError> {
        Self::new(Duration::from_secs(config.timeout_secs as u64))
    }

    /// Uses a preconfigured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn get(
        &self,
        url: &str,
        credential: Option<&Credential>,
    ) -> Result<reqwest::Response, StagingError> {
        let mut request = self.client.get(url);
        if let Some(credential) = credential {
            request = request.header(header::AUTHORIZATION, credential.token());
        }

        let response = request.send().await.map_err(|e| request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StagingError::DownloadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

fn request_error(url: &str, e: reqwest::Error) -> StagingError {
    if e.is_timeout() {
        StagingError::Timeout {
            url: url.to_string(),
        }
    } else {
        StagingError::Download {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl ArtworkSource for HttpArtworkSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(
        &self,
        url: &str,
        destination: &Path,
        credential: Option<&Credential>,
    ) -> Result<u64, StagingError> {
        let descriptor: ArtworkDescriptor = self
            .get(url, credential)
            .await?
            .json()
            .await
            .map_err(|e| StagingError::Download {
                url: url.to_string(),
                reason: format!("invalid artwork descriptor: {}", e),
            })?;

        let file_url = descriptor
            .url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| StagingError::MissingFileUrl {
                url: url.to_string(),
            })?;

        debug!(href = %url, "Downloading artwork file");
        let bytes = self
            .get(&file_url, None)
            .await?
            .bytes()
            .await
            .map_err(|e| request_error(&file_url, e))?;

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StagingError::DirectoryCreationFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        fs::write(destination, &bytes)
            .await
            .map_err(|e| StagingError::WriteFailed {
                path: destination.to_path_buf(),
                source: e,
            })?;

        Ok(bytes.len() as u64)
    }
}
