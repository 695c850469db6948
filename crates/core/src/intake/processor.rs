//! Order intake pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use super::error::IntakeError;
use super::reconcile::{reconcile_dimensions, DimensionCheck};
use super::types::{ArtworkStatus, IntakeReport, StagedDesign};
use crate::credentials::Credential;
use crate::geometry::GeometryExtractor;
use crate::metrics;
use crate::normalizer::{NormalizedOrderRecord, Normalizer};
use crate::order::OrderItem;
use crate::staging::{
    artwork_file_name, secondary_file_name, ArtworkKind, ArtworkSource, FsStager,
};

/// Default trim box tolerance in millimeters.
pub const DEFAULT_TOLERANCE_MM: f64 = 1.0;

/// Runs one order from raw item to archived records.
///
/// Normalization happens first and touches nothing on disk, so a rejected
/// order leaves no trace. Artwork problems are logged and reported but never
/// stop the order; only failures writing the records themselves do. Records
/// are all written before any archive reaches the outbox, and a failed order
/// takes its archives back out.
pub struct OrderProcessor<S, G> {
    normalizer: Normalizer,
    stager: FsStager,
    source: S,
    geometry: Arc<G>,
    tolerance_mm: f64,
}

impl<S: ArtworkSource, G: GeometryExtractor + 'static> OrderProcessor<S, G> {
    pub fn new(normalizer: Normalizer, stager: FsStager, source: S, geometry: G) -> Self {
        Self {
            normalizer,
            stager,
            source,
            geometry: Arc::new(geometry),
            tolerance_mm: DEFAULT_TOLERANCE_MM,
        }
    }

    /// Sets the trim box tolerance.
    pub fn with_tolerance(mut self, tolerance_mm: f64) -> Self {
        self.tolerance_mm = tolerance_mm;
        self
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn stager(&self) -> &FsStager {
        &self.stager
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Normalizes, downloads, checks and stages one order.
    pub async fn process(
        &self,
        order: &OrderItem,
        credential: Option<&Credential>,
    ) -> Result<IntakeReport, IntakeError> {
        let started = Instant::now();
        let reference = order.reference();
        metrics::ORDERS_RECEIVED.inc();

        match self.stage(order, reference, credential).await {
            Ok(designs) => {
                let duration = started.elapsed();
                metrics::INTAKE_DURATION
                    .with_label_values(&["success"])
                    .observe(duration.as_secs_f64());
                info!(
                    order = %reference,
                    designs = designs.len(),
                    duration_ms = duration.as_millis() as u64,
                    "Order staged"
                );
                Ok(IntakeReport {
                    reference: reference.to_string(),
                    order_id: order.order_id().map(str::to_string),
                    designs,
                    duration_ms: duration.as_millis() as u64,
                })
            }
            Err(e) => {
                metrics::ORDERS_FAILED.with_label_values(&[e.stage()]).inc();
                metrics::INTAKE_DURATION
                    .with_label_values(&["failed"])
                    .observe(started.elapsed().as_secs_f64());
                error!(order = %reference, stage = e.stage(), error = %e, "Order intake failed");
                Err(e)
            }
        }
    }

    async fn stage(
        &self,
        order: &OrderItem,
        reference: &str,
        credential: Option<&Credential>,
    ) -> Result<Vec<StagedDesign>, IntakeError> {
        let records = self
            .normalizer
            .normalize(order)
            .map_err(|source| IntakeError::Normalize {
                reference: reference.to_string(),
                source,
            })?;

        let order_id = order.order_id();
        if order_id.is_none() {
            warn!(order = %reference, "Order has no self link, skipping artwork downloads");
        }
        if credential.is_none() {
            debug!(order = %reference, "No order API credential, downloading anonymously");
        }

        // Every record is written before anything reaches the outbox.
        let mut staged = Vec::with_capacity(records.len());
        for (i, (record, design)) in records.into_iter().zip(&order.designs).enumerate() {
            let index = i + 1;
            let folder = self.stager.design_folder(reference, index);

            let (design_status, jobsheet_status) = match order_id {
                Some(order_id) => {
                    let design_status = self
                        .download(
                            reference,
                            ArtworkKind::Design,
                            design.href.as_deref(),
                            folder.join(artwork_file_name(order_id, ArtworkKind::Design, index)),
                            credential,
                        )
                        .await;
                    let jobsheet_status = self
                        .download(
                            reference,
                            ArtworkKind::Jobsheet,
                            order.jobsheet_href(),
                            folder.join(artwork_file_name(order_id, ArtworkKind::Jobsheet, index)),
                            credential,
                        )
                        .await;
                    (design_status, jobsheet_status)
                }
                None => (ArtworkStatus::Skipped, ArtworkStatus::Skipped),
            };

            let mut secondary_copy = None;
            let mut dimension_check = None;
            if let (Some(path), Some(order_id)) = (design_status.path(), order_id) {
                secondary_copy = self
                    .copy_to_secondary(reference, path, &secondary_file_name(order_id, index))
                    .await;
                dimension_check = Some(self.check_dimensions(reference, index, &record, path).await);
            }

            let json_path = self
                .stager
                .write_record(&record, reference, index)
                .await
                .map_err(|source| IntakeError::Staging {
                    reference: reference.to_string(),
                    source,
                })?;

            staged.push(StagedDesign {
                index,
                record,
                json_path,
                archive_path: self.stager.archive_path(reference, index),
                design: design_status,
                jobsheet: jobsheet_status,
                secondary_copy,
                dimension_check,
            });
        }

        let mut archived: Vec<PathBuf> = Vec::with_capacity(staged.len());
        for design in &mut staged {
            match self.stager.archive_design(reference, design.index).await {
                Ok(path) => {
                    design.archive_path = path.clone();
                    archived.push(path);
                }
                Err(source) => {
                    // A half-written archive must not be picked up either
                    if tokio::fs::metadata(&design.archive_path)
                        .await
                        .is_ok_and(|m| m.is_file())
                    {
                        archived.push(design.archive_path.clone());
                    }
                    self.discard_archives(reference, &archived).await;
                    return Err(IntakeError::Staging {
                        reference: reference.to_string(),
                        source,
                    });
                }
            }
        }
        metrics::RECORDS_STAGED.inc_by(staged.len() as u64);

        Ok(staged)
    }

    async fn discard_archives(&self, reference: &str, archives: &[PathBuf]) {
        for path in archives {
            match tokio::fs::remove_file(path).await {
                Ok(()) => {
                    debug!(order = %reference, path = %path.display(), "Removed archive of failed order");
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    error!(
                        order = %reference,
                        path = %path.display(),
                        error = %e,
                        "Failed to remove archive of failed order"
                    );
                }
            }
        }
    }

    async fn download(
        &self,
        reference: &str,
        kind: ArtworkKind,
        href: Option<&str>,
        destination: PathBuf,
        credential: Option<&Credential>,
    ) -> ArtworkStatus {
        let Some(href) = href.filter(|h| !h.is_empty()) else {
            debug!(order = %reference, %kind, "No artwork link");
            return ArtworkStatus::NoLink;
        };

        match self.source.fetch(href, &destination, credential).await {
            Ok(bytes) => {
                metrics::ARTWORK_DOWNLOADS
                    .with_label_values(&[kind.as_str(), "success"])
                    .inc();
                info!(
                    order = %reference,
                    %kind,
                    path = %destination.display(),
                    bytes,
                    "Artwork downloaded"
                );
                ArtworkStatus::Downloaded {
                    path: destination,
                    bytes,
                }
            }
            Err(e) => {
                metrics::ARTWORK_DOWNLOADS
                    .with_label_values(&[kind.as_str(), "failed"])
                    .inc();
                warn!(order = %reference, %kind, href, error = %e, "Artwork download failed");
                ArtworkStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn copy_to_secondary(
        &self,
        reference: &str,
        path: &Path,
        file_name: &str,
    ) -> Option<PathBuf> {
        match self.stager.copy_to_secondary(path, file_name).await {
            Ok(copied) => copied.map(|c| c.destination),
            Err(e) => {
                warn!(order = %reference, error = %e, "Secondary copy failed");
                None
            }
        }
    }

    /// Artwork can be large, so the PDF is parsed on the blocking pool.
    async fn check_dimensions(
        &self,
        reference: &str,
        index: usize,
        record: &NormalizedOrderRecord,
        artwork: &Path,
    ) -> DimensionCheck {
        let geometry = Arc::clone(&self.geometry);
        let path = artwork.to_path_buf();
        let trim = tokio::task::spawn_blocking(move || geometry.trim_box(&path)).await;

        let check = match trim {
            Ok(Ok(trim)) => reconcile_dimensions(
                record.width,
                record.height,
                trim.map(|t| t.details()).as_ref(),
                self.tolerance_mm,
            ),
            Ok(Err(e)) => DimensionCheck::Unreadable {
                reason: e.to_string(),
            },
            Err(e) => DimensionCheck::Unreadable {
                reason: format!("geometry task failed: {}", e),
            },
        };

        metrics::DIMENSION_CHECKS
            .with_label_values(&[check.outcome()])
            .inc();

        match &check {
            DimensionCheck::Matches | DimensionCheck::MatchesRotated => {
                debug!(order = %reference, design = index, outcome = check.outcome(), "Trim box checked");
            }
            DimensionCheck::Mismatch {
                expected_mm,
                trim_mm,
            } => {
                warn!(
                    order = %reference,
                    design = index,
                    expected = ?expected_mm,
                    trim = ?trim_mm,
                    "Trim box does not match ordered dimensions"
                );
            }
            DimensionCheck::NoTrimBox => {
                warn!(order = %reference, design = index, "Artwork has no trim box");
            }
            DimensionCheck::Unreadable { reason } => {
                warn!(order = %reference, design = index, reason = %reason, "Artwork geometry unreadable");
            }
        }

        check
    }
}
