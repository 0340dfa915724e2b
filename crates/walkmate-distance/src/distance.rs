use serde::Serialize;
use walkmate_geometry::{linalg::distance2, Homography, Point2, Quad};

use crate::{
    object::{DetectedObject, SkipReason},
    viewer::ViewerPosition,
};

/// Ground-plane distance from the viewer to one object.
///
/// All values are in the unit of the configured block side length (centimeters by
/// default), except `distance_m`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceReport {
    /// Identifier of the object.
    pub id: usize,
    /// Class label of the object.
    pub label: String,
    /// Detector confidence.
    pub confidence: f64,
    /// The object's corner nearest to the viewer, on the ground plane.
    pub closest_point_cm: Point2,
    /// Straight-line distance from the viewer to the closest point.
    pub distance_cm: f64,
    /// Lateral component of the distance, `|dx|`.
    pub lateral_cm: f64,
    /// Forward component of the distance, `|dy|`.
    pub forward_cm: f64,
    /// Straight-line distance in meters.
    pub distance_m: f64,
}

/// Find the point of a mapped quad nearest to the mapped viewer.
///
/// Returns the point and its distance to the viewer. Ties go to the first corner.
pub fn closest_approach(viewer_cm: &Point2, vertices_cm: &Quad) -> (Point2, f64) {
    let mut closest = (vertices_cm[0], distance2(&vertices_cm[0], viewer_cm));
    for v in vertices_cm.iter().skip(1) {
        let d = distance2(v, viewer_cm);
        if d < closest.1 {
            closest = (*v, d);
        }
    }
    closest
}

/// Measure the ground-plane distance from the viewer to an object.
///
/// # Arguments
///
/// * `homography` - The image-to-ground transform of the batch.
/// * `viewer` - The viewer position in pixels.
/// * `viewer_cm` - The viewer position already mapped to the ground plane.
/// * `object` - The object to measure.
///
/// # Errors
///
/// * [`SkipReason::NonFiniteProjection`] if one of the object's corners does not
///   map to a finite ground-plane point.
/// * [`SkipReason::BeyondHorizon`] if one of the object's corners lies across the
///   vanishing line from the viewer, where the mapping folds back behind it.
pub fn measure_object(
    homography: &Homography,
    viewer: &ViewerPosition,
    viewer_cm: &Point2,
    object: &DetectedObject,
) -> Result<DistanceReport, SkipReason> {
    let mut vertices_cm = [[0.0; 2]; 4];
    for (vertex, (src, dst)) in object
        .vertices()
        .iter()
        .zip(vertices_cm.iter_mut())
        .enumerate()
    {
        *dst = homography
            .map_point(src)
            .map_err(|_| SkipReason::NonFiniteProjection { vertex })?;
        if !homography.same_side_of_horizon(src, &viewer.as_point()) {
            return Err(SkipReason::BeyondHorizon { vertex });
        }
    }

    let (closest, distance_cm) = closest_approach(viewer_cm, &vertices_cm);

    Ok(DistanceReport {
        id: object.id(),
        label: object.label().to_string(),
        confidence: object.confidence(),
        closest_point_cm: closest,
        distance_cm,
        lateral_cm: (closest[0] - viewer_cm[0]).abs(),
        forward_cm: (closest[1] - viewer_cm[1]).abs(),
        distance_m: distance_cm / 100.0,
    })
}
