//! Error types for order normalization.

use thiserror::Error;

use super::winding::WindingError;

/// Reasons an order cannot be normalized. Any of these aborts the whole order.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A field the downstream record needs is absent.
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// A field is present but cannot be interpreted.
    #[error("Invalid value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    /// The order carries no designs, so there is nothing to stage.
    #[error("Order has no designs")]
    NoDesigns,

    #[error(transparent)]
    Winding(#[from] WindingError),
}

impl NormalizeError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn invalid(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidField {
            field,
            value: value.to_string(),
        }
    }
}
