use faer::prelude::SpSolver;

use crate::{
    error::GeometryError,
    linalg,
    quad::{order_quad_corners, validate_ordered_quad},
    Point2, Quad,
};

/// Smallest admissible absolute determinant of an estimated homography.
pub const DET_EPS: f64 = 1e-12;

/// Relative tolerance under which a homogeneous weight counts as zero.
///
/// The weight is compared against the sum of the magnitudes of its terms, so a
/// point that lies on the vanishing line up to rounding is rejected.
pub const HORIZON_EPS: f64 = 1e-9;

/// Compute the homography matrix from four 2d point correspondences.
///
/// The matrix is normalized so that `h33 = 1` and the remaining eight entries are
/// obtained by solving the 8x8 linear system exactly, so the four correspondences
/// are reproduced up to floating point precision.
///
/// # Arguments
///
/// * `x1` - The source 2d points.
/// * `x2` - The destination 2d points.
///
/// # Returns
///
/// The homography matrix from src to dst in row-major order.
pub fn homography_4pt2d(x1: &Quad, x2: &Quad) -> Result<[[f64; 3]; 3], GeometryError> {
    // construct matrix A | b
    let mut m_mat = faer::Mat::<f64>::zeros(8, 9);
    for i in 0..4 {
        let (x1_0, x1_1) = (x1[i][0], x1[i][1]);
        let (x2_0, x2_1) = (x2[i][0], x2[i][1]);

        m_mat.write(2 * i, 0, x1_0);
        m_mat.write(2 * i, 1, x1_1);
        m_mat.write(2 * i, 2, 1.0);
        m_mat.write(2 * i, 6, -x2_0 * x1_0);
        m_mat.write(2 * i, 7, -x2_0 * x1_1);
        m_mat.write(2 * i, 8, -x2_0);

        m_mat.write(2 * i + 1, 3, x1_0);
        m_mat.write(2 * i + 1, 4, x1_1);
        m_mat.write(2 * i + 1, 5, 1.0);
        m_mat.write(2 * i + 1, 6, -x2_1 * x1_0);
        m_mat.write(2 * i + 1, 7, -x2_1 * x1_1);
        m_mat.write(2 * i + 1, 8, -x2_1);
    }

    // solve -> h_mat: 8x1
    let h_mat = m_mat
        .submatrix(0, 0, 8, 8)
        .partial_piv_lu()
        .solve(-m_mat.submatrix(0, 8, 8, 1));
    let h = h_mat.col(0);

    let homo = [
        [h[0], h[1], h[2]],
        [h[3], h[4], h[5]],
        [h[6], h[7], 1.0],
    ];

    // a singular system shows up as non-finite pivots in the solution
    if homo.iter().flatten().any(|v| !v.is_finite()) {
        return Err(GeometryError::DegenerateGeometry(
            "linear system for the homography is singular".to_string(),
        ));
    }

    let det = linalg::det_mat33(&homo);
    if det.abs() < DET_EPS {
        return Err(GeometryError::DegenerateGeometry(format!(
            "homography determinant is too small ({det:e})"
        )));
    }

    Ok(homo)
}

/// The corners of the real-world reference square, in the same order as
/// [`order_quad_corners`]: `(0, 0), (S, 0), (S, S), (0, S)`.
pub fn canonical_square(side_length: f64) -> Quad {
    [
        [0.0, 0.0],
        [side_length, 0.0],
        [side_length, side_length],
        [0.0, side_length],
    ]
}

/// A projective transform from image pixels to ground-plane coordinates.
///
/// The transform is built for a single image and holds no other state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homography {
    matrix: [[f64; 3]; 3],
}

impl Homography {
    /// Wrap an existing 3x3 matrix in row-major order.
    pub fn from_matrix(matrix: [[f64; 3]; 3]) -> Self {
        Self { matrix }
    }

    /// Estimate the transform that maps a reference quadrilateral onto a square.
    ///
    /// The corners are first put in canonical order and then mapped to
    /// `(0, 0), (S, 0), (S, S), (0, S)` where `S` is `side_length`, so the output
    /// coordinates are expressed in the same unit as `side_length`.
    ///
    /// # Arguments
    ///
    /// * `quad` - The four pixel corners of the reference marker, in any order.
    /// * `side_length` - The real-world side length of the marker.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidSideLength`] if `side_length` is not finite and positive,
    /// [`GeometryError::DegenerateGeometry`] if the corners are coincident, collinear,
    /// self-intersecting or otherwise do not define an invertible transform.
    ///
    /// Example:
    ///
    /// ```
    /// use walkmate_geometry::Homography;
    ///
    /// let block = [[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]];
    /// let homo = Homography::from_reference_quad(&block, 30.0)?;
    /// let p = homo.map_point(&[50.0, 50.0])?;
    /// assert!((p[0] - 15.0).abs() < 1e-9 && (p[1] - 15.0).abs() < 1e-9);
    /// # Ok::<(), walkmate_geometry::GeometryError>(())
    /// ```
    pub fn from_reference_quad(quad: &Quad, side_length: f64) -> Result<Self, GeometryError> {
        if !side_length.is_finite() || side_length <= 0.0 {
            return Err(GeometryError::InvalidSideLength(side_length));
        }

        let ordered = order_quad_corners(quad);
        validate_ordered_quad(&ordered)?;

        let matrix = homography_4pt2d(&ordered, &canonical_square(side_length))?;
        let homo = Self { matrix };

        // the reference corners themselves must land on finite points
        for corner in ordered.iter() {
            homo.map_point(corner).map_err(|_| {
                GeometryError::DegenerateGeometry(format!(
                    "reference corner {corner:?} maps outside the ground plane"
                ))
            })?;
        }

        log::debug!("reference homography: {:?}", homo.matrix);

        Ok(homo)
    }

    /// The transform as a 3x3 matrix in row-major order.
    pub fn matrix(&self) -> &[[f64; 3]; 3] {
        &self.matrix
    }

    /// The homogeneous weight `w` of a pixel-space point.
    ///
    /// The vanishing line of the ground plane is where `w` is zero. Two points are
    /// on the same side of it when their weights have the same sign.
    pub fn weight(&self, point: &Point2) -> f64 {
        let h = &self.matrix[2];
        h[0] * point[0] + h[1] * point[1] + h[2]
    }

    /// Check whether two pixel-space points lie on the same side of the vanishing line.
    ///
    /// Points on the line itself are on neither side.
    pub fn same_side_of_horizon(&self, a: &Point2, b: &Point2) -> bool {
        self.weight(a) * self.weight(b) > 0.0
    }

    /// Map a pixel-space point to the ground plane.
    ///
    /// Points outside the reference quadrilateral are extrapolated.
    ///
    /// # Errors
    ///
    /// [`GeometryError::NonFiniteProjection`] if the homogeneous weight vanishes
    /// within [`HORIZON_EPS`] or the result is not finite.
    pub fn map_point(&self, point: &Point2) -> Result<Point2, GeometryError> {
        let mut dst = [0.0; 3];
        linalg::mat33_mul_vec3(&self.matrix, &[point[0], point[1], 1.0], &mut dst);

        let h = &self.matrix[2];
        let scale = (h[0] * point[0]).abs() + (h[1] * point[1]).abs() + h[2].abs();
        let on_horizon = dst[2].abs() <= HORIZON_EPS * scale;

        let mapped = [dst[0] / dst[2], dst[1] / dst[2]];
        if on_horizon || !mapped[0].is_finite() || !mapped[1].is_finite() {
            return Err(GeometryError::NonFiniteProjection {
                x: point[0],
                y: point[1],
            });
        }

        Ok(mapped)
    }

    /// Map the four corners of a quadrilateral to the ground plane.
    pub fn map_quad(&self, quad: &Quad) -> Result<Quad, GeometryError> {
        Ok([
            self.map_point(&quad[0])?,
            self.map_point(&quad[1])?,
            self.map_point(&quad[2])?,
            self.map_point(&quad[3])?,
        ])
    }
}
