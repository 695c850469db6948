use thiserror::Error;

use crate::normalizer::NormalizeError;
use crate::staging::StagingError;

/// Why an order could not be staged.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// The order data could not be mapped. Nothing was written.
    #[error("Order {reference} rejected: {source}")]
    Normalize {
        reference: String,
        #[source]
        source: NormalizeError,
    },

    /// Writing or archiving a record failed.
    #[error("Order {reference} could not be staged: {source}")]
    Staging {
        reference: String,
        #[source]
        source: StagingError,
    },
}

impl IntakeError {
    pub fn reference(&self) -> &str {
        match self {
            Self::Normalize { reference, .. } | Self::Staging { reference, .. } => reference,
        }
    }

    /// Metric label of the failing stage.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Normalize { .. } => "normalize",
            Self::Staging { .. } => "staging",
        }
    }
}
