use serde::Serialize;
use walkmate_geometry::{quad_centroid, Point2, Quad};

/// A detection record as produced by the detector, before validation.
///
/// Every coordinate is optional because detector exports may omit keys or carry
/// values that are not numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDetection {
    /// Identifier of the record. Defaults to its position in the batch.
    pub id: Option<usize>,
    /// Class label of the detection.
    pub label: String,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f64,
    /// The four corners of the oriented box in pixels, in any order.
    pub vertices: [[Option<f64>; 2]; 4],
}

impl RawDetection {
    /// Create a record with all four corners present.
    pub fn new(label: impl Into<String>, confidence: f64, vertices: Quad) -> Self {
        Self {
            id: None,
            label: label.into(),
            confidence,
            vertices: vertices.map(|[x, y]| [Some(x), Some(y)]),
        }
    }

    /// Validate the record into a [`DetectedObject`].
    ///
    /// # Arguments
    ///
    /// * `index` - Position of the record in its batch, used when it has no `id`.
    pub fn validate(&self, index: usize) -> Result<DetectedObject, SkipReason> {
        let mut vertices = [[0.0; 2]; 4];
        for (vertex, (raw, v)) in self.vertices.iter().zip(vertices.iter_mut()).enumerate() {
            let (Some(x), Some(y)) = (raw[0], raw[1]) else {
                return Err(SkipReason::MissingCoordinate { vertex });
            };
            *v = [x, y];
        }

        DetectedObject::new(
            self.id.unwrap_or(index),
            self.label.clone(),
            self.confidence,
            vertices,
        )
    }
}

/// A validated detection with four finite pixel-space corners.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedObject {
    id: usize,
    label: String,
    confidence: f64,
    vertices: Quad,
}

impl DetectedObject {
    /// Create a new object, rejecting non-finite corners.
    pub fn new(
        id: usize,
        label: impl Into<String>,
        confidence: f64,
        vertices: Quad,
    ) -> Result<Self, SkipReason> {
        if let Some(vertex) = vertices
            .iter()
            .position(|v| !v[0].is_finite() || !v[1].is_finite())
        {
            return Err(SkipReason::NonFiniteCoordinate { vertex });
        }

        Ok(Self {
            id,
            label: label.into(),
            confidence,
            vertices,
        })
    }

    /// Identifier of the object.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Class label of the object.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Detector confidence.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// The four pixel corners in input order.
    pub fn vertices(&self) -> &Quad {
        &self.vertices
    }

    /// Mean of the four corners.
    pub fn centroid(&self) -> Point2 {
        quad_centroid(&self.vertices)
    }
}

/// Why a detection was left out of the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// A coordinate of the given vertex is missing or not a number.
    #[error("vertex {vertex} has a missing coordinate")]
    MissingCoordinate {
        /// Index of the vertex in the record.
        vertex: usize,
    },

    /// A coordinate of the given vertex is infinite or NaN.
    #[error("vertex {vertex} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the vertex in the record.
        vertex: usize,
    },

    /// The given vertex does not map to a finite ground-plane point.
    #[error("vertex {vertex} does not map onto the ground plane")]
    NonFiniteProjection {
        /// Index of the vertex in the record.
        vertex: usize,
    },

    /// The given vertex lies across the vanishing line from the viewer.
    #[error("vertex {vertex} lies beyond the horizon")]
    BeyondHorizon {
        /// Index of the vertex in the record.
        vertex: usize,
    },
}

/// A detection that was dropped, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedObject {
    /// Identifier of the record.
    pub id: usize,
    /// Class label of the record.
    pub label: String,
    /// Why the record was dropped.
    pub reason: SkipReason,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validate_complete_record() -> Result<(), SkipReason> {
        let raw = RawDetection::new(
            "braille_block",
            0.9,
            [[10.0, 10.0], [30.0, 10.0], [30.0, 30.0], [10.0, 30.0]],
        );
        let object = raw.validate(3)?;
        assert_eq!(object.id(), 3);
        assert_eq!(object.label(), "braille_block");
        assert_relative_eq!(object.confidence(), 0.9);

        let c = object.centroid();
        assert_relative_eq!(c[0], 20.0);
        assert_relative_eq!(c[1], 20.0);
        Ok(())
    }

    #[test]
    fn test_validate_keeps_explicit_id() -> Result<(), SkipReason> {
        let mut raw = RawDetection::new("pole", 0.5, [[0.0, 0.0]; 4]);
        raw.id = Some(42);
        assert_eq!(raw.validate(0)?.id(), 42);
        Ok(())
    }

    #[test]
    fn test_validate_missing_coordinate() {
        let mut raw = RawDetection::new("pole", 0.5, [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        raw.vertices[2][1] = None;
        assert_eq!(
            raw.validate(0),
            Err(SkipReason::MissingCoordinate { vertex: 2 })
        );
    }

    #[test]
    fn test_validate_non_finite_coordinate() {
        let raw = RawDetection::new(
            "pole",
            0.5,
            [[0.0, 0.0], [f64::NAN, 0.0], [1.0, 1.0], [0.0, 1.0]],
        );
        assert_eq!(
            raw.validate(0),
            Err(SkipReason::NonFiniteCoordinate { vertex: 1 })
        );
    }
}
