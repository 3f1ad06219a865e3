//! 4x4 matrix type for affine image transforms.
//!
//! [`Mat4`] maps destination pixel space to source pixel space for the
//! transform engine. Only the upper 3x4 block is used when transforming
//! points (no perspective divide).
//!
//! # Convention
//!
//! Matrices are stored in **row-major** order and use **column vectors**,
//! translation lives in the last column:
//!
//! ```text
//! | m00 m01 m02 m03 |   | x |   | m00*x + m01*y + m02*z + m03 |
//! | m10 m11 m12 m13 | * | y | = | m10*x + m11*y + m12*z + m13 |
//! | m20 m21 m22 m23 |   | z |   | m20*x + m21*y + m22*z + m23 |
//! | m30 m31 m32 m33 |   | 1 |
//! ```
//!
//! # Usage
//!
//! ```rust
//! use imbuf_math::{Mat4, Vec3};
//!
//! // Scale by 2 around the origin, then move 10 pixels right
//! let m = Mat4::translation(10.0, 0.0, 0.0) * Mat4::scale(2.0, 2.0, 1.0);
//! let p = m.transform_point(Vec3::new(1.0, 1.0, 0.0));
//! assert_eq!(p, Vec3::new(12.0, 2.0, 0.0));
//! ```

use crate::Vec3;
use std::ops::Mul;

/// A 4x4 row-major matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat4 {
    /// Matrix elements in row-major order: [row0, row1, row2, row3]
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    /// Zero matrix.
    pub const ZERO: Self = Self { m: [[0.0; 4]; 4] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    #[inline]
    const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { m: rows }
    }

    #[inline]
    const fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        Self {
            m: [
                [cols[0][0], cols[1][0], cols[2][0], cols[3][0]],
                [cols[0][1], cols[1][1], cols[2][1], cols[3][1]],
                [cols[0][2], cols[1][2], cols[2][2], cols[3][2]],
                [cols[0][3], cols[1][3], cols[2][3], cols[3][3]],
            ],
        }
    }

    /// Translation matrix.
    #[inline]
    pub const fn translation(x: f32, y: f32, z: f32) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Non-uniform scale matrix.
    #[inline]
    pub const fn scale(x: f32, y: f32, z: f32) -> Self {
        Self::from_rows([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about the Z axis (rotation in the image plane).
    ///
    /// With Y pointing down, a positive angle rotates clockwise on screen.
    pub fn rotation_z(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::from_rows([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    fn transpose(&self) -> Self {
        let mut t = Self::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                t.m[j][i] = self.m[i][j];
            }
        }
        t
    }

    /// Transforms a point (implicit w = 1, translation applied).
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z + m[0][3],
            m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z + m[1][3],
            m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z + m[2][3],
        )
    }

    /// Multiplies two matrices (`self * other`).
    pub fn mul_mat(&self, other: &Self) -> Self {
        let mut result = Self::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                result.m[i][j] = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j]
                    + self.m[i][3] * other.m[3][j];
            }
        }
        result
    }

    /// Computes the inverse of this matrix.
    ///
    /// Returns `None` if the matrix is singular.
    ///
    /// # Example
    ///
    /// ```rust
    /// use imbuf_math::Mat4;
    ///
    /// let m = Mat4::translation(3.0, -2.0, 0.0) * Mat4::scale(2.0, 4.0, 1.0);
    /// let inv = m.inverse().unwrap();
    /// let id = m * inv;
    /// for i in 0..4 {
    ///     for j in 0..4 {
    ///         let expected = if i == j { 1.0 } else { 0.0 };
    ///         assert!((id.m[i][j] - expected).abs() < 1e-5);
    ///     }
    /// }
    /// ```
    pub fn inverse(&self) -> Option<Self> {
        let g = self.to_glam();
        let det = g.determinant();
        if !det.is_finite() || det.abs() < 1e-10 {
            return None;
        }
        Some(Self::from_glam(g.inverse()))
    }

    /// Returns true if all elements are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|x| x.is_finite())
    }

    /// Converts to glam Mat4 (column-major).
    #[inline]
    pub fn to_glam(&self) -> glam::Mat4 {
        glam::Mat4::from_cols_array_2d(&self.transpose().m)
    }

    /// Creates from glam Mat4.
    #[inline]
    pub fn from_glam(m: glam::Mat4) -> Self {
        Self::from_cols(m.to_cols_array_2d())
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// Mat4 * Mat4
impl Mul for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identity_point() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Mat4::IDENTITY.transform_point(p), p);
    }

    #[test]
    fn test_translation_moves_points() {
        let m = Mat4::translation(5.0, 6.0, 7.0);
        let v = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(m.transform_point(v), Vec3::new(6.0, 6.0, 7.0));
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let m = Mat4::rotation_z(std::f32::consts::FRAC_PI_2);
        let p = m.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_glam_roundtrip_preserves_layout() {
        let m = Mat4::translation(1.0, 2.0, 3.0) * Mat4::scale(4.0, 5.0, 6.0);
        assert_eq!(Mat4::from_glam(m.to_glam()), m);
        // glam stores translation in the last column too
        assert_eq!(m.to_glam().w_axis.x, 1.0);
    }

    #[test]
    fn test_singular_has_no_inverse() {
        assert!(Mat4::scale(1.0, 0.0, 1.0).inverse().is_none());
        assert!(Mat4::ZERO.inverse().is_none());
    }

    #[test]
    fn test_mul_order() {
        // translate after scale
        let m = Mat4::translation(1.0, 0.0, 0.0) * Mat4::scale(2.0, 2.0, 2.0);
        assert_eq!(m.transform_point(Vec3::new(1.0, 1.0, 0.0)), Vec3::new(3.0, 2.0, 0.0));
    }
}
