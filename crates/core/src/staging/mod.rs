//! File staging for accepted orders.
//!
//! Every design of an order gets its own working folder below the download
//! directory, named `{reference}_{index}`. Artwork PDFs are downloaded into
//! it, the normalized record is written next to them as JSON, and the folder
//! is then zipped into the outbox for the downstream system to pick up.
//!
//! # Example
//!
//! ```ignore
//! use labelbridge_core::staging::{FsStager, StagingConfig};
//!
//! let stager = FsStager::new(StagingConfig::default());
//! let json = stager.write_record(&record, "PC-123456", 1).await?;
//! let archive = stager.archive_design("PC-123456", 1).await?;
//! ```

mod config;
mod error;
mod fs_stager;
mod http_source;
mod traits;
mod types;

pub use config::StagingConfig;
pub use error::StagingError;
pub use fs_stager::FsStager;
pub use http_source::HttpArtworkSource;
pub use traits::ArtworkSource;
pub use types::{artwork_file_name, design_stem, secondary_file_name, ArtworkKind, CopiedFile};
