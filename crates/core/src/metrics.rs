//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Intake (orders received, failed, records staged)
//! - Normalization fallbacks (unknown winding and shape tokens)
//! - Artwork downloads and trim box checks

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Intake
// =============================================================================

/// Orders handed to the intake pipeline.
pub static ORDERS_RECEIVED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "labelbridge_orders_received_total",
        "Total orders received for intake",
    )
    .unwrap()
});

/// Orders that could not be staged, by stage.
pub static ORDERS_FAILED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "labelbridge_orders_failed_total",
            "Total orders that failed intake",
        ),
        &["stage"], // "normalize", "staging"
    )
    .unwrap()
});

/// Records written and archived.
pub static RECORDS_STAGED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "labelbridge_records_staged_total",
        "Total normalized records staged",
    )
    .unwrap()
});

/// Intake duration in seconds.
pub static INTAKE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "labelbridge_intake_duration_seconds",
            "Duration of order intake",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["result"], // "success", "failed"
    )
    .unwrap()
});

// =============================================================================
// Normalization
// =============================================================================

/// Output directions that fell back to the default winding.
pub static WINDING_FALLBACKS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "labelbridge_winding_fallbacks_total",
        "Unrecognized output directions replaced by the fallback winding",
    )
    .unwrap()
});

/// Shape tokens treated as irregular because they were not recognized.
pub static UNKNOWN_SHAPES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "labelbridge_unknown_shapes_total",
        "Unrecognized shape tokens treated as irregular",
    )
    .unwrap()
});

// =============================================================================
// Artwork
// =============================================================================

/// Artwork downloads by kind and result.
pub static ARTWORK_DOWNLOADS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "labelbridge_artwork_downloads_total",
            "Artwork downloads by kind and result",
        ),
        &["kind", "result"], // kind: "design", "jobsheet"; result: "success", "failed"
    )
    .unwrap()
});

/// Trim box checks by outcome.
pub static DIMENSION_CHECKS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "labelbridge_dimension_checks_total",
            "Trim box checks against ordered dimensions",
        ),
        &["outcome"],
    )
    .unwrap()
});

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Intake
        Box::new(ORDERS_RECEIVED.clone()),
        Box::new(ORDERS_FAILED.clone()),
        Box::new(RECORDS_STAGED.clone()),
        Box::new(INTAKE_DURATION.clone()),
        // Normalization
        Box::new(WINDING_FALLBACKS.clone()),
        Box::new(UNKNOWN_SHAPES.clone()),
        // Artwork
        Box::new(ARTWORK_DOWNLOADS.clone()),
        Box::new(DIMENSION_CHECKS.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::Registry;

    #[test]
    fn test_all_metrics_register() {
        let registry = Registry::new();
        for metric in all_metrics() {
            registry.register(metric).unwrap();
        }

        ORDERS_RECEIVED.inc();
        ORDERS_FAILED.with_label_values(&["normalize"]).inc();
        ARTWORK_DOWNLOADS
            .with_label_values(&["design", "success"])
            .inc();

        let names: Vec<String> = registry
            .gather()
            .iter()
            .map(|family| family.get_name().to_string())
            .collect();
        assert!(names.contains(&"labelbridge_orders_received_total".to_string()));
        assert!(names.contains(&"labelbridge_orders_failed_total".to_string()));
        assert!(names.contains(&"labelbridge_artwork_downloads_total".to_string()));
    }
}
