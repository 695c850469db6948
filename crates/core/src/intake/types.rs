//! Types for the intake module.

use serde::Serialize;
use std::path::PathBuf;

use super::reconcile::DimensionCheck;
use crate::normalizer::NormalizedOrderRecord;

/// What happened to one artwork file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ArtworkStatus {
    Downloaded { path: PathBuf, bytes: u64 },
    Failed { reason: String },
    /// The order carries no link for this file.
    NoLink,
    /// Downloads were skipped for the whole order.
    Skipped,
}

impl ArtworkStatus {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Downloaded { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Outcome for one design of an order.
#[derive(Debug, Clone, Serialize)]
pub struct StagedDesign {
    /// 1-based design position.
    pub index: usize,
    pub record: NormalizedOrderRecord,
    pub json_path: PathBuf,
    pub archive_path: PathBuf,
    pub design: ArtworkStatus,
    pub jobsheet: ArtworkStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_copy: Option<PathBuf>,
    /// Present when the design artwork was downloaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_check: Option<DimensionCheck>,
}

/// Outcome of staging one order.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeReport {
    pub reference: String,
    pub order_id: Option<String>,
    pub designs: Vec<StagedDesign>,
    pub duration_ms: u64,
}

impl IntakeReport {
    pub fn records_staged(&self) -> usize {
        self.designs.len()
    }

    pub fn failed_downloads(&self) -> usize {
        self.designs
            .iter()
            .flat_map(|d| [&d.design, &d.jobsheet])
            .filter(|s| matches!(s, ArtworkStatus::Failed { .. }))
            .count()
    }
}
