use rayon::prelude::*;
use serde::Serialize;
use walkmate_geometry::{Homography, Point2};

use crate::{
    config::DistanceConfig,
    distance::{measure_object, DistanceReport},
    error::DistanceError,
    object::{DetectedObject, RawDetection, SkippedObject},
    reference::ReferenceSelector,
    viewer::{ImageSize, ViewerPosition},
};

/// The detections of one image.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionBatch {
    /// Size of the source image, used to place the viewer.
    pub image_size: ImageSize,
    /// The raw detection records in detector order.
    pub detections: Vec<RawDetection>,
}

/// Result of processing one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    /// Identifier of the object used as calibration reference.
    pub reference_id: usize,
    /// The viewer position on the ground plane.
    pub viewer_cm: Point2,
    /// One report per processed object, in input order.
    pub reports: Vec<DistanceReport>,
    /// The records that were dropped, with the reason.
    pub skipped: Vec<SkippedObject>,
}

impl BatchResult {
    /// Number of records that were dropped.
    pub fn num_skipped(&self) -> usize {
        self.skipped.len()
    }
}

/// Compute the ground-plane distances of a batch using the configured reference policy.
///
/// # Arguments
///
/// * `config` - The distance configuration.
/// * `batch` - The detections of one image.
///
/// # Errors
///
/// * [`DistanceError::InvalidConfig`] if the configuration is not usable.
/// * [`DistanceError::NoValidObjects`] if no record survives validation.
/// * [`DistanceError::DegenerateGeometry`] if the reference does not define a
///   transform or the viewer does not map onto the ground plane.
pub fn process_batch(
    config: &DistanceConfig,
    batch: &DetectionBatch,
) -> Result<BatchResult, DistanceError> {
    process_batch_with(&config.reference_policy, config, batch)
}

/// Compute the ground-plane distances of a batch with a custom reference policy.
///
/// Records with missing or non-finite coordinates, and objects with a corner that
/// does not map to a finite ground-plane point or lies beyond the horizon, are
/// skipped and listed in [`BatchResult::skipped`]. Any other failure aborts the batch.
pub fn process_batch_with<S: ReferenceSelector + ?Sized>(
    selector: &S,
    config: &DistanceConfig,
    batch: &DetectionBatch,
) -> Result<BatchResult, DistanceError> {
    config.validate()?;

    let viewer = config
        .viewer_position
        .map(ViewerPosition::from)
        .unwrap_or_else(|| ViewerPosition::from_image_size(batch.image_size));

    // validate the records once, downstream only sees complete objects
    let mut objects: Vec<DetectedObject> = Vec::with_capacity(batch.detections.len());
    let mut skipped = Vec::new();
    for (index, raw) in batch.detections.iter().enumerate() {
        match raw.validate(index) {
            Ok(object) => objects.push(object),
            Err(reason) => {
                let id = raw.id.unwrap_or(index);
                log::warn!("skipping detection {} ({}): {}", id, raw.label, reason);
                skipped.push(SkippedObject {
                    id,
                    label: raw.label.clone(),
                    reason,
                });
            }
        }
    }

    let reference = selector.select(&viewer, &objects)?;
    let homography = Homography::from_reference_quad(reference.vertices(), config.block_side_cm)?;
    let viewer_cm = homography.map_point(&viewer.as_point())?;

    let mut reports = Vec::with_capacity(objects.len());
    for object in objects.iter() {
        match measure_object(&homography, &viewer, &viewer_cm, object) {
            Ok(report) => reports.push(report),
            Err(reason) => {
                log::warn!(
                    "skipping detection {} ({}): {}",
                    object.id(),
                    object.label(),
                    reason
                );
                skipped.push(SkippedObject {
                    id: object.id(),
                    label: object.label().to_string(),
                    reason,
                });
            }
        }
    }

    log::debug!(
        "measured {} objects, skipped {}, reference {}",
        reports.len(),
        skipped.len(),
        reference.id()
    );

    Ok(BatchResult {
        reference_id: reference.id(),
        viewer_cm,
        reports,
        skipped,
    })
}

/// Process independent batches in parallel.
///
/// Returns one result per batch, in the same order as `batches`.
pub fn process_batches(
    config: &DistanceConfig,
    batches: &[DetectionBatch],
) -> Vec<Result<BatchResult, DistanceError>> {
    batches
        .par_iter()
        .map(|batch| process_batch(config, batch))
        .collect()
}
