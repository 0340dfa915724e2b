use serde::{Deserialize, Serialize};
use walkmate_geometry::Point2;

/// Size of the source image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    /// Width of the image in pixels.
    pub width: usize,
    /// Height of the image in pixels.
    pub height: usize,
}

/// The observer's foot position in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewerPosition {
    /// Horizontal pixel coordinate.
    pub x: f64,
    /// Vertical pixel coordinate.
    pub y: f64,
}

impl ViewerPosition {
    /// Create a viewer position from pixel coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The bottom-center of the image, `(width / 2, height)`.
    pub fn from_image_size(size: ImageSize) -> Self {
        Self {
            x: size.width as f64 / 2.0,
            y: size.height as f64,
        }
    }

    /// The position as a `[x, y]` point.
    pub fn as_point(&self) -> Point2 {
        [self.x, self.y]
    }
}

impl From<Point2> for ViewerPosition {
    fn from(p: Point2) -> Self {
        Self::new(p[0], p[1])
    }
}
