use crate::{
    error::GeometryError,
    linalg::{cross2, distance2},
    Point2, Quad,
};

/// Relative tolerance used to decide when points are coincident or collinear.
///
/// Areas are compared against the squared extent of the points involved so the
/// check does not depend on the image resolution.
pub const COLLINEAR_EPS: f64 = 1e-9;

/// Order the four corners of a quadrilateral as `[top-left, top-right, bottom-right, bottom-left]`.
///
/// The top-left corner has the smallest `x + y` and the bottom-right corner the
/// largest. Of the two remaining corners, the one with the smallest `y - x` (the
/// largest `x - y`) is the top-right and the other the bottom-left. Ties go to the
/// first point in input order.
///
/// The ordering of a degenerate quadrilateral (collinear or coincident corners) is
/// not meaningful; use [`validate_ordered_quad`] before building a transform from it.
///
/// # Arguments
///
/// * `points` - The four corners in any order.
///
/// Example:
///
/// ```
/// use walkmate_geometry::order_quad_corners;
///
/// let quad = [[100.0, 100.0], [0.0, 0.0], [0.0, 100.0], [100.0, 0.0]];
/// let ordered = order_quad_corners(&quad);
/// assert_eq!(ordered, [[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]]);
/// ```
pub fn order_quad_corners(points: &Quad) -> Quad {
    let sum = |p: &Point2| p[0] + p[1];
    let diff = |p: &Point2| p[1] - p[0];

    // strict comparisons keep the first occurrence on ties
    let mut tl = 0;
    for i in 1..4 {
        if sum(&points[i]) < sum(&points[tl]) {
            tl = i;
        }
    }

    let others = match tl {
        0 => [1, 2, 3],
        1 => [0, 2, 3],
        2 => [0, 1, 3],
        _ => [0, 1, 2],
    };

    let mut br = 0;
    for k in 1..3 {
        if sum(&points[others[k]]) > sum(&points[others[br]]) {
            br = k;
        }
    }

    let (first, second) = match br {
        0 => (others[1], others[2]),
        1 => (others[0], others[2]),
        _ => (others[0], others[1]),
    };
    let br = others[br];

    let (tr, bl) = if diff(&points[second]) < diff(&points[first]) {
        (second, first)
    } else {
        (first, second)
    };

    [points[tl], points[tr], points[br], points[bl]]
}

/// Compute the centroid of a quadrilateral as the mean of its corners.
pub fn quad_centroid(points: &Quad) -> Point2 {
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
    [sx / 4.0, sy / 4.0]
}

/// Check whether three points lie on a common line, within [`COLLINEAR_EPS`].
///
/// Coincident points count as collinear.
pub fn is_collinear(a: &Point2, b: &Point2, c: &Point2) -> bool {
    let extent = distance2(a, b).max(distance2(b, c)).max(distance2(a, c));
    if extent == 0.0 {
        return true;
    }
    cross2(a, b, c).abs() <= COLLINEAR_EPS * extent * extent
}

/// Check that an ordered quadrilateral can serve as a calibration reference.
///
/// The quad must have finite coordinates, no three corners on a common line and
/// describe a strictly convex, non self-intersecting polygon in the given order.
///
/// # Arguments
///
/// * `quad` - The corners ordered as returned by [`order_quad_corners`].
pub fn validate_ordered_quad(quad: &Quad) -> Result<(), GeometryError> {
    if quad.iter().flatten().any(|v| !v.is_finite()) {
        return Err(GeometryError::DegenerateGeometry(
            "reference corners contain non-finite coordinates".to_string(),
        ));
    }

    const TRIPLES: [(usize, usize, usize); 4] = [(0, 1, 2), (0, 1, 3), (0, 2, 3), (1, 2, 3)];
    for (i, j, k) in TRIPLES {
        if is_collinear(&quad[i], &quad[j], &quad[k]) {
            return Err(GeometryError::DegenerateGeometry(format!(
                "reference corners {:?}, {:?} and {:?} are collinear",
                quad[i], quad[j], quad[k]
            )));
        }
    }

    // every turn along the polygon must have the same orientation
    let turns = (0..4).map(|i| cross2(&quad[i], &quad[(i + 1) % 4], &quad[(i + 2) % 4]));
    let (positive, negative) = turns.fold((0, 0), |(pos, neg), t| {
        if t > 0.0 {
            (pos + 1, neg)
        } else {
            (pos, neg + 1)
        }
    });
    if positive != 4 && negative != 4 {
        return Err(GeometryError::DegenerateGeometry(
            "reference quadrilateral is not convex or is self-intersecting".to_string(),
        ));
    }

    Ok(())
}
