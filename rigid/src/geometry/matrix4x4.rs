//! 4x4 Matrix

use super::Vector4;
use crate::math::{abs, Float, EPSILON, PI};
use std::ops::{Index, Mul};

/// A 4x4 matrix containing Float values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix4x4 {
    /// Stores a 2-D array of Float (row major).
    pub m: [[Float; 4]; 4],
}

/// Zero matrix.
pub const ZERO_MATRIX: Matrix4x4 = Matrix4x4 { m: [[0.0; 4]; 4] };

/// Identity matrix.
pub const IDENTITY_MATRIX: Matrix4x4 = Matrix4x4 {
    m: [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ],
};

/// Create a 4x4 matrix using the following order of the parameters:
///
/// * `t00`, `t01`, `t02`, `t03` - Row 1
/// * `t10`, `t11`, `t12`, `t13` - Row 2
/// * `t20`, `t21`, `t22`, `t23` - Row 3
/// * `t30`, `t31`, `t32`, `t33` - Row 4
#[rustfmt::skip]
#[allow(clippy::too_many_arguments)]
pub fn matrix4x4(
    t00: Float, t01: Float, t02: Float, t03: Float,
    t10: Float, t11: Float, t12: Float, t13: Float,
    t20: Float, t21: Float, t22: Float, t23: Float,
    t30: Float, t31: Float, t32: Float, t33: Float,
) -> Matrix4x4 {
    Matrix4x4 {
        m: [
            [t00, t01, t02, t03],
            [t10, t11, t12, t13],
            [t20, t21, t22, t23],
            [t30, t31, t32, t33],
        ],
    }
}

impl Matrix4x4 {
    /// Returns a perspective projection for a camera looking down the
    /// negative z-axis. `near` and `far` are the (negative) z values of the
    /// clipping planes.
    ///
    /// * `fov_y`  - Vertical field of view in degrees.
    /// * `aspect` - Width / height of the viewport.
    /// * `near`   - Z value of the near plane.
    /// * `far`    - Z value of the far plane.
    pub fn projection(fov_y: Float, aspect: Float, near: Float, far: Float) -> Matrix4x4 {
        let mut r = ZERO_MATRIX;
        let angle = fov_y * 0.5 * PI / 180.0;
        let f = if abs(angle.sin()) < EPSILON { 0.0 } else { 1.0 / angle.tan() };
        if abs(aspect) > EPSILON {
            r.m[0][0] = f / aspect;
        }
        r.m[1][1] = f;
        if abs(far - near) > EPSILON {
            r.m[2][2] = (far + near) / (far - near);
            r.m[2][3] = -2.0 * far * near / (far - near);
        }
        r.m[3][2] = -1.0;
        r
    }
}

impl Default for Matrix4x4 {
    /// Returns the default as identity matrix.
    fn default() -> Self {
        IDENTITY_MATRIX
    }
}

impl Mul<Matrix4x4> for Matrix4x4 {
    type Output = Matrix4x4;

    /// Post-multiply the given matrix.
    ///
    /// * `other` - The other matrix
    fn mul(self, other: Matrix4x4) -> Self::Output {
        let mut m = Matrix4x4::default();

        for i in 0..4 {
            for j in 0..4 {
                m.m[i][j] = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j]
                    + self.m[i][3] * other.m[3][j];
            }
        }

        m
    }
}

impl Mul<Vector4> for Matrix4x4 {
    type Output = Vector4;

    /// Transforms a homogeneous coordinate (column vector).
    ///
    /// * `v` - The coordinate.
    fn mul(self, v: Vector4) -> Self::Output {
        let row = |i: usize| {
            self.m[i][0] * v.x + self.m[i][1] * v.y + self.m[i][2] * v.z + self.m[i][3] * v.w
        };
        Vector4::new(row(0), row(1), row(2), row(3))
    }
}

impl Index<usize> for Matrix4x4 {
    type Output = [Float; 4];

    /// Index the matrix row. The column can be further indexed from the
    /// returned result.
    ///
    /// * `row` - Row
    fn index(&self, row: usize) -> &Self::Output {
        assert!(row < 4, "matrix row not in [0, 3]");
        &self.m[row]
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    #[should_panic]
    fn index_panics_past_last_row() {
        let _ = IDENTITY_MATRIX[4];
    }

    #[test]
    fn projection_maps_near_and_far_planes() {
        let p = Matrix4x4::projection(60.0, 1.0, -0.1, -50.0);

        // Depth increases towards the eye: near maps to 1, far maps to -1.
        let near = p * Vector4::new(0.0, 0.0, -0.1, 1.0);
        assert!(approx_eq!(Float, near.z / near.w, 1.0, epsilon = 1e-9));

        let far = p * Vector4::new(0.0, 0.0, -50.0, 1.0);
        assert!(approx_eq!(Float, far.z / far.w, -1.0, epsilon = 1e-9));
    }

    proptest! {
        #[test]
        fn identity_is_neutral(
            a in -10.0..10.0f64, b in -10.0..10.0f64, c in -10.0..10.0f64, d in -10.0..10.0f64,
        ) {
            #[rustfmt::skip]
            let m = matrix4x4(
                  a,   b, 0.0, 0.0,
                0.0,   c,   d, 0.0,
                  b, 0.0,   a, 0.0,
                0.0, 0.0, 0.0, 1.0,
            );
            prop_assert_eq!(m * IDENTITY_MATRIX, m);
            prop_assert_eq!(IDENTITY_MATRIX * m, m);

            let v = Vector4::new(a, b, c, d);
            prop_assert_eq!(IDENTITY_MATRIX * v, v);
        }
    }
}
