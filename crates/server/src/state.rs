use std::sync::Arc;
use std::time::Duration;

use labelbridge_core::{
    ArtworkSource, Config, CredentialCache, FsStager, GeometryExtractor, Normalizer,
    NormalizerSettings, OrderProcessor,
};

/// Processor with its collaborators behind trait objects.
pub type SharedProcessor = OrderProcessor<Arc<dyn ArtworkSource>, Arc<dyn GeometryExtractor>>;

/// Shared application state
pub struct AppState {
    config: Config,
    credentials: CredentialCache,
    processor: SharedProcessor,
}

impl AppState {
    pub fn new(config: Config, processor: SharedProcessor) -> Self {
        let credentials =
            CredentialCache::new(Duration::from_secs(config.order_source.token_max_age_secs));
        Self {
            config,
            credentials,
            processor,
        }
    }

    /// Wires the processor from configuration.
    pub fn from_config(
        config: Config,
        source: Arc<dyn ArtworkSource>,
        geometry: Arc<dyn GeometryExtractor>,
    ) -> Result<Self, labelbridge_core::normalizer::WindingError> {
        let settings = NormalizerSettings::try_from(&config.normalizer)?;
        let processor = OrderProcessor::new(
            Normalizer::new(settings),
            FsStager::new(config.staging.clone()),
            source,
            geometry,
        )
        .with_tolerance(config.normalizer.dimension_tolerance_mm);

        Ok(Self::new(config, processor))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialCache {
        &self.credentials
    }

    pub fn processor(&self) -> &SharedProcessor {
        &self.processor
    }
}
