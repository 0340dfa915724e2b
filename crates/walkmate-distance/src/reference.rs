//! Choice of the detection used to calibrate the ground plane.
//!
//! The default policy picks the object whose centroid is closest to the viewer in
//! pixel space, on the assumption that the nearest block is seen most face-on and
//! is the least distorted by perspective. This is a heuristic, not a guarantee: a
//! close block at the frame border can be more skewed than a farther centered one.
//! Other policies can be plugged in through [`ReferenceSelector`].

use serde::{Deserialize, Serialize};
use walkmate_geometry::linalg::distance2;

use crate::{error::DistanceError, object::DetectedObject, viewer::ViewerPosition};

/// A policy that chooses the calibration reference among the objects of one image.
pub trait ReferenceSelector {
    /// Choose the reference object.
    ///
    /// # Errors
    ///
    /// [`DistanceError::NoValidObjects`] when `objects` is empty.
    fn select<'a>(
        &self,
        viewer: &ViewerPosition,
        objects: &'a [DetectedObject],
    ) -> Result<&'a DetectedObject, DistanceError>;
}

/// Select the object whose centroid is nearest to the viewer in pixels.
///
/// Ties go to the first object in input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestToViewer;

impl ReferenceSelector for NearestToViewer {
    fn select<'a>(
        &self,
        viewer: &ViewerPosition,
        objects: &'a [DetectedObject],
    ) -> Result<&'a DetectedObject, DistanceError> {
        let viewer = viewer.as_point();

        let mut best: Option<(&DetectedObject, f64)> = None;
        for object in objects {
            let d = distance2(&object.centroid(), &viewer);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((object, d)),
            }
        }

        let (reference, d) = best.ok_or(DistanceError::NoValidObjects)?;
        log::debug!(
            "reference object {} ({}) at {:.1} px from the viewer",
            reference.id(),
            reference.label(),
            d
        );

        Ok(reference)
    }
}

/// The reference selection policies available from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePolicy {
    /// See [`NearestToViewer`].
    #[default]
    NearestToViewer,
}

impl ReferenceSelector for ReferencePolicy {
    fn select<'a>(
        &self,
        viewer: &ViewerPosition,
        objects: &'a [DetectedObject],
    ) -> Result<&'a DetectedObject, DistanceError> {
        match self {
            ReferencePolicy::NearestToViewer => NearestToViewer.select(viewer, objects),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(id: usize, x: f64, y: f64, side: f64) -> DetectedObject {
        let vertices = [[x, y], [x + side, y], [x + side, y + side], [x, y + side]];
        DetectedObject::new(id, "braille_block", 0.9, vertices).expect("finite vertices")
    }

    #[test]
    fn test_nearest_to_viewer() -> Result<(), DistanceError> {
        let viewer = ViewerPosition::new(500.0, 1000.0);
        let objects = vec![
            square(0, 450.0, 100.0, 100.0),
            square(1, 450.0, 850.0, 100.0),
            square(2, 0.0, 900.0, 100.0),
        ];
        let reference = NearestToViewer.select(&viewer, &objects)?;
        assert_eq!(reference.id(), 1);
        Ok(())
    }

    #[test]
    fn test_nearest_to_viewer_tie_keeps_first() -> Result<(), DistanceError> {
        let viewer = ViewerPosition::new(500.0, 1000.0);
        // mirrored around the viewer's vertical line
        let objects = vec![square(7, 300.0, 800.0, 100.0), square(8, 600.0, 800.0, 100.0)];
        let reference = ReferencePolicy::NearestToViewer.select(&viewer, &objects)?;
        assert_eq!(reference.id(), 7);
        Ok(())
    }

    #[test]
    fn test_no_objects() {
        let viewer = ViewerPosition::new(0.0, 0.0);
        assert!(matches!(
            NearestToViewer.select(&viewer, &[]),
            Err(DistanceError::NoValidObjects)
        ));
    }
}
