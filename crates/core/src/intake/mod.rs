//! Order intake.
//!
//! [`OrderProcessor`] takes one order item from the order API and carries it
//! through normalization, artwork download, trim box reconciliation and
//! staging. Orders are independent of each other; one failing order never
//! affects another.

mod error;
mod processor;
mod reconcile;
mod types;

pub use error::IntakeError;
pub use processor::{OrderProcessor, DEFAULT_TOLERANCE_MM};
pub use reconcile::{reconcile_dimensions, DimensionCheck};
pub use types::{ArtworkStatus, IntakeReport, StagedDesign};
