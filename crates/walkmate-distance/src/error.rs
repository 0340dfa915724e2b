use walkmate_geometry::GeometryError;

/// Errors that abort the processing of a whole batch.
#[derive(Debug, thiserror::Error)]
pub enum DistanceError {
    /// The reference marker or the viewer position does not yield a usable transform.
    #[error(transparent)]
    DegenerateGeometry(#[from] GeometryError),

    /// No object is available to serve as calibration reference.
    #[error("No valid objects to calibrate against")]
    NoValidObjects,

    /// The configuration holds an unusable value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
