//! Trim box versus ordered dimensions.

use serde::{Deserialize, Serialize};

use crate::geometry::BoxDetails;

/// Result of comparing an artwork's trim box with the record's dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DimensionCheck {
    /// Trim box equals width x height.
    Matches,
    /// Trim box equals height x width; the artwork is delivered turned a quarter.
    MatchesRotated,
    /// Trim box matches neither orientation.
    Mismatch {
        expected_mm: (f64, f64),
        trim_mm: (f64, f64),
    },
    /// The artwork declares no trim box.
    NoTrimBox,
    /// The artwork could not be parsed.
    Unreadable { reason: String },
}

impl DimensionCheck {
    /// Metric label.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Matches => "matches",
            Self::MatchesRotated => "matches_rotated",
            Self::Mismatch { .. } => "mismatch",
            Self::NoTrimBox => "no_trim_box",
            Self::Unreadable { .. } => "unreadable",
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matches | Self::MatchesRotated)
    }
}

/// Compares `trim` against `width` x `height` (mm) within `tolerance_mm`.
pub fn reconcile_dimensions(
    width: f64,
    height: f64,
    trim: Option<&BoxDetails>,
    tolerance_mm: f64,
) -> DimensionCheck {
    let Some(trim) = trim else {
        return DimensionCheck::NoTrimBox;
    };

    let close = |a: f64, b: f64| (a - b).abs() <= tolerance_mm;

    if close(trim.width_mm, width) && close(trim.height_mm, height) {
        DimensionCheck::Matches
    } else if close(trim.width_mm, height) && close(trim.height_mm, width) {
        DimensionCheck::MatchesRotated
    } else {
        DimensionCheck::Mismatch {
            expected_mm: (width, height),
            trim_mm: (trim.width_mm, trim.height_mm),
        }
    }
}
