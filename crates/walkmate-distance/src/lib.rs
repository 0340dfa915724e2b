#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Walkmate distance
//!
//! Converts the oriented boxes of detected tactile blocks and hazards in a single
//! photograph into metric distances on the ground plane.
//!
//! The block nearest to the viewer is taken as a reference of known side length,
//! a homography from its corners to a real-world square undoes the perspective, and
//! every object's nearest corner is measured against the viewer position in that
//! rectified plane.
//!
//! ## Example
//!
//! ```rust
//! use walkmate_distance::{process_batch, DetectionBatch, DistanceConfig, ImageSize, RawDetection};
//!
//! let batch = DetectionBatch {
//!     image_size: ImageSize { width: 100, height: 100 },
//!     detections: vec![
//!         RawDetection::new("braille_block", 0.93, [[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]]),
//!         RawDetection::new("bollard", 0.81, [[50.0, 0.0], [60.0, 0.0], [60.0, -10.0], [50.0, -10.0]]),
//!     ],
//! };
//!
//! let result = process_batch(&DistanceConfig::default(), &batch)?;
//! assert_eq!(result.reports.len(), 2);
//! assert!((result.reports[1].distance_cm - 30.0).abs() < 1e-6);
//! # Ok::<(), walkmate_distance::DistanceError>(())
//! ```

/// Batch processing of the detections of one image.
pub mod batch;

/// Configuration of the distance estimation.
pub mod config;

/// Per-object distance measurement on the ground plane.
pub mod distance;

/// Error types for the distance module.
pub mod error;

/// Detection records and their validation.
pub mod object;

/// Policies to choose the calibration reference.
pub mod reference;

/// Image size and viewer position.
pub mod viewer;

pub use batch::{process_batch, process_batch_with, process_batches, BatchResult, DetectionBatch};
pub use config::{DistanceConfig, DEFAULT_BLOCK_SIDE_CM};
pub use distance::DistanceReport;
pub use error::DistanceError;
pub use object::{DetectedObject, RawDetection, SkipReason, SkippedObject};
pub use reference::{NearestToViewer, ReferencePolicy, ReferenceSelector};
pub use viewer::{ImageSize, ViewerPosition};
