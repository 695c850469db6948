//! Configuration for the staging module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where staged orders and artwork are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagingConfig {
    /// Per-design working folders (artwork and record JSON).
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Finished archives, one zip per design.
    #[serde(default = "default_outbox_dir")]
    pub outbox_dir: PathBuf,

    /// Extra copy of each design PDF (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_dir: Option<PathBuf>,

    /// Whether to verify SHA-256 checksums after copying to the secondary dir.
    #[serde(default)]
    pub verify_copies: bool,

    /// Buffer size for file copies in bytes.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_outbox_dir() -> PathBuf {
    PathBuf::from("outbox")
}

fn default_buffer_size() -> usize {
    256 * 1024
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            outbox_dir: default_outbox_dir(),
            secondary_dir: None,
            verify_copies: false,
            buffer_size: default_buffer_size(),
        }
    }
}

impl StagingConfig {
    /// Config rooted at `root`, with `downloads/` and `outbox/` below it.
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            download_dir: root.join("downloads"),
            outbox_dir: root.join("outbox"),
            ..Self::default()
        }
    }

    /// Sets the secondary copy directory.
    pub fn with_secondary_dir(mut self, path: PathBuf) -> Self {
        self.secondary_dir = Some(path);
        self
    }

    /// Enables checksum verification of secondary copies.
    pub fn with_copy_verification(mut self, enabled: bool) -> Self {
        self.verify_copies = enabled;
        self
    }
}
