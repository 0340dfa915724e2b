#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the geometry module.
pub mod error;

/// Homography estimation and point mapping.
pub mod homography;

/// Small fixed-size linear algebra helpers.
pub mod linalg;

/// Quadrilateral utilities: corner ordering and validity checks.
pub mod quad;

pub use error::GeometryError;
pub use homography::{homography_4pt2d, Homography};
pub use quad::{order_quad_corners, quad_centroid};

/// A 2d point as `[x, y]`.
pub type Point2 = [f64; 2];

/// Four 2d points describing a quadrilateral.
pub type Quad = [Point2; 4];
