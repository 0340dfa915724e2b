/// An error type for the geometry module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The reference quadrilateral does not define a valid projective transform.
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// The real-world side length of the reference square is not usable.
    #[error("Invalid side length ({0}), expected a finite positive value")]
    InvalidSideLength(f64),

    /// The point maps onto the vanishing line or produces non-finite coordinates.
    #[error("Point ({x}, {y}) does not map to a finite ground-plane point")]
    NonFiniteProjection {
        /// x coordinate of the source point.
        x: f64,
        /// y coordinate of the source point.
        y: f64,
    },
}
