/// Compute the determinant of a 3x3 matrix.
///
/// # Arguments
///
/// * `m` - The input matrix in row-major order.
pub fn det_mat33(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Multiply a 3x3 matrix by a 3d vector.
///
/// # Arguments
///
/// * `m` - The input matrix in row-major order.
/// * `v` - The input vector.
/// * `out` - The output vector.
pub fn mat33_mul_vec3(m: &[[f64; 3]; 3], v: &[f64; 3], out: &mut [f64; 3]) {
    for (out_i, row) in out.iter_mut().zip(m.iter()) {
        *out_i = row[0] * v[0] + row[1] * v[1] + row[2] * v[2];
    }
}

/// Z component of the cross product of `b - a` and `c - a`.
///
/// Positive when `a -> b -> c` turns counter-clockwise in a y-up frame,
/// which is clockwise in image coordinates (y-down).
pub fn cross2(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// Euclidean distance between two 2d points.
pub fn distance2(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    (a[0] - b[0]).hypot(a[1] - b[1])
}
