//! 3x3 projective transform matrices.
//!
//! Matrices act on homogeneous column vectors `(x, y, 1)` in image
//! coordinates (origin top-left, y down).

/// A 3x3 projective transform in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformMatrix {
    m: [[f64; 3]; 3],
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformMatrix {
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Build a matrix from three rows.
    pub fn from_rows(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    /// Promote a 2x3 affine matrix to 3x3 with bottom row `[0, 0, 1]`.
    pub fn from_affine(affine: [[f64; 3]; 2]) -> Self {
        Self {
            m: [affine[0], affine[1], [0.0, 0.0, 1.0]],
        }
    }

    /// Rotation by `angle_degrees` about `center` with uniform `scale`,
    /// promoted to a projective matrix.
    ///
    /// Positive angles rotate counter-clockwise as seen on screen.
    pub fn rotation(center: (f64, f64), angle_degrees: f64, scale: f64) -> Self {
        Self::from_affine(rotation_matrix_2d(center, angle_degrees, scale))
    }

    /// The matrix rows.
    pub fn rows(&self) -> &[[f64; 3]; 3] {
        &self.m
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.m[row][col]
    }

    /// True when the bottom row is exactly `[0, 0, 1]`.
    pub fn is_affine(&self) -> bool {
        self.m[2] == [0.0, 0.0, 1.0]
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverse matrix, or `None` if the matrix is singular.
    pub fn invert(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() <= f64::EPSILON {
            return None;
        }

        let m = &self.m;
        let inv_det = 1.0 / det;
        let cofactor = |r0: usize, r1: usize, c0: usize, c1: usize| -> f64 {
            m[r0][c0] * m[r1][c1] - m[r0][c1] * m[r1][c0]
        };

        // Transposed cofactor matrix (adjugate) scaled by 1/det
        Some(Self {
            m: [
                [
                    cofactor(1, 2, 1, 2) * inv_det,
                    -cofactor(0, 2, 1, 2) * inv_det,
                    cofactor(0, 1, 1, 2) * inv_det,
                ],
                [
                    -cofactor(1, 2, 0, 2) * inv_det,
                    cofactor(0, 2, 0, 2) * inv_det,
                    -cofactor(0, 1, 0, 2) * inv_det,
                ],
                [
                    cofactor(1, 2, 0, 1) * inv_det,
                    -cofactor(0, 2, 0, 1) * inv_det,
                    cofactor(0, 1, 0, 1) * inv_det,
                ],
            ],
        })
    }

    /// Matrix product `self * other`.
    pub fn multiply(&self, other: &Self) -> Self {
        let mut out = [[0.0; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[r][k] * other.m[k][c]).sum();
            }
        }
        Self { m: out }
    }

    /// Apply the transform to a point, including the homogeneous divide.
    ///
    /// Returns `None` when the point maps to infinity (`w == 0`).
    #[inline]
    pub fn map_point(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let m = &self.m;
        let w = m[2][0] * x + m[2][1] * y + m[2][2];
        if w == 0.0 {
            return None;
        }
        let inv_w = 1.0 / w;
        Some((
            (m[0][0] * x + m[0][1] * y + m[0][2]) * inv_w,
            (m[1][0] * x + m[1][1] * y + m[1][2]) * inv_w,
        ))
    }
}

/// 2x3 affine matrix for rotation about `center`.
///
/// ```text
/// a = scale * cos(angle), b = scale * sin(angle)
/// [  a  b  (1 - a) * cx - b * cy ]
/// [ -b  a  b * cx + (1 - a) * cy ]
/// ```
pub fn rotation_matrix_2d(center: (f64, f64), angle_degrees: f64, scale: f64) -> [[f64; 3]; 2] {
    let (cx, cy) = center;
    let angle = angle_degrees.to_radians();
    let a = scale * angle.cos();
    let b = scale * angle.sin();

    [
        [a, b, (1.0 - a) * cx - b * cy],
        [-b, a, b * cx + (1.0 - a) * cy],
    ]
}
