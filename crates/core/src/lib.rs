pub mod config;
pub mod credentials;
pub mod geometry;
pub mod intake;
pub mod metrics;
pub mod normalizer;
pub mod order;
pub mod staging;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, load_config_with_env, validate_config, Config, ConfigError,
    LogFormat, LoggingConfig, NormalizerConfig, OrderSourceConfig, ServerConfig,
};
pub use credentials::{Credential, CredentialCache};
pub use geometry::{GeometryError, GeometryExtractor, LopdfGeometryExtractor};
pub use intake::{IntakeError, IntakeReport, OrderProcessor};
pub use normalizer::{NormalizeError, NormalizedOrderRecord, Normalizer, NormalizerSettings};
pub use order::OrderItem;
pub use staging::{ArtworkSource, FsStager, HttpArtworkSource, StagingConfig, StagingError};
