#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Reading and writing of the distance configuration.
pub mod config;

/// Reading detection records exported by the detector.
pub mod detections;

/// Error types for the io module.
pub mod error;

/// Image header utilities.
pub mod metadata;

/// Writing distance reports.
pub mod report;

pub use crate::config::read_config_json;
pub use crate::detections::{parse_detections, read_detections_json};
pub use crate::error::IoError;
pub use crate::metadata::read_image_size;
pub use crate::report::write_reports_json;
