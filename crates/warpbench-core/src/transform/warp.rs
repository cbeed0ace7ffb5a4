//! Perspective warp with bilinear interpolation and constant border.
//!
//! # Algorithm
//!
//! The warp uses inverse mapping: for each pixel in the output plane, the
//! matrix gives the source position it samples from, and the four nearest
//! source samples are blended bilinearly:
//!
//! ```text
//! (X, Y, W) = M * (dst_x, dst_y, 1)
//! src_x = X / W,  src_y = Y / W
//! ```
//!
//! Neighbours that fall outside the source contribute the border value, so
//! edges fade into the border rather than being cut hard.

use tracing::debug;

use super::TransformMatrix;
use crate::plane::Plane;

/// How the matrix passed to [`warp_perspective`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapDirection {
    /// The matrix maps destination coordinates to source coordinates and is
    /// used as given.
    #[default]
    Inverse,
    /// The matrix maps source coordinates to destination coordinates and is
    /// inverted before sampling.
    Forward,
}

/// Sampling options for [`warp_perspective`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WarpOptions {
    /// Interpretation of the matrix.
    pub map: MapDirection,
    /// Value written where the source has no data.
    pub border: u8,
}

/// Which warp entry point the benchmark goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WarpMode {
    /// Portable code path.
    #[default]
    Standard,
    /// Path labelled as NEON-accelerated.
    Neon,
}

impl WarpMode {
    /// Mode for a command-line flag; any nonzero value selects `Neon`.
    pub fn from_flag(flag: i64) -> Self {
        if flag != 0 {
            WarpMode::Neon
        } else {
            WarpMode::Standard
        }
    }

    pub fn is_neon(self) -> bool {
        self == WarpMode::Neon
    }

    /// Human-readable line describing the path taken.
    pub fn description(self) -> &'static str {
        match self {
            WarpMode::Standard => "Using standard warpPerspective without NEON.",
            WarpMode::Neon => "Using NEON optimization for warpPerspective.",
        }
    }
}

impl std::fmt::Display for WarpMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarpMode::Standard => write!(f, "standard"),
            WarpMode::Neon => write!(f, "neon"),
        }
    }
}

/// Warp `src` into a plane of `dst_size` using `matrix`.
///
/// # Arguments
///
/// * `src` - Source plane
/// * `matrix` - Projective transform, interpreted per `options.map`
/// * `dst_size` - Output `(width, height)`
/// * `options` - Map direction and border value
///
/// # Returns
///
/// New `Plane` of exactly `dst_size`. A singular matrix with
/// `MapDirection::Forward` produces a plane filled with the border value.
pub fn warp_perspective(
    src: &Plane,
    matrix: &TransformMatrix,
    dst_size: (u32, u32),
    options: &WarpOptions,
) -> Plane {
    let (dst_w, dst_h) = dst_size;

    let inverse = match options.map {
        MapDirection::Inverse => *matrix,
        MapDirection::Forward => match matrix.invert() {
            Some(inv) => inv,
            None => {
                debug!("singular warp matrix, output is all border");
                return Plane::filled(dst_w, dst_h, options.border);
            }
        },
    };

    let mut output = Vec::with_capacity(dst_w as usize * dst_h as usize);

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let value = match inverse.map_point(dst_x as f64, dst_y as f64) {
                Some((src_x, src_y)) => sample_bilinear(src, src_x, src_y, options.border),
                None => options.border,
            };
            output.push(value);
        }
    }

    Plane::new(dst_w, dst_h, output)
}

/// Warp through the entry point selected by `mode`.
///
/// Both modes currently run the same scalar kernel, so their outputs are
/// bit-identical.
pub fn warp_with_mode(
    mode: WarpMode,
    src: &Plane,
    matrix: &TransformMatrix,
    dst_size: (u32, u32),
    options: &WarpOptions,
) -> Plane {
    match mode {
        WarpMode::Standard => warp_perspective(src, matrix, dst_size, options),
        // TODO: route to a vectorised bilinear kernel once one exists.
        WarpMode::Neon => warp_perspective(src, matrix, dst_size, options),
    }
}

/// Sample a plane using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest samples and weights
/// their contribution based on distance.
fn sample_bilinear(src: &Plane, x: f64, y: f64, border: u8) -> u8 {
    if !x.is_finite() || !y.is_finite() {
        return border;
    }

    let x0 = x.floor();
    let y0 = y.floor();

    // No neighbour can land inside the source
    if x0 < -1.0 || y0 < -1.0 || x0 >= src.width as f64 || y0 >= src.height as f64 {
        return border;
    }

    let (ix, iy) = (x0 as i64, y0 as i64);

    // Fractional distances
    let fx = x - x0;
    let fy = y - y0;

    let fetch = |px: i64, py: i64| src.get(px, py).unwrap_or(border) as f64;

    let p00 = fetch(ix, iy);
    let p10 = fetch(ix + 1, iy);
    let p01 = fetch(ix, iy + 1);
    let p11 = fetch(ix + 1, iy + 1);

    let v = p00 * (1.0 - fx) * (1.0 - fy)
        + p10 * fx * (1.0 - fy)
        + p01 * (1.0 - fx) * fy
        + p11 * fx * fy;

    v.clamp(0.0, 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a plane with a diagonal gradient pattern.
    fn test_plane(width: u32, height: u32) -> Plane {
        let mut data = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(((x + y) * 8) as u8);
            }
        }
        Plane::new(width, height, data)
    }

    fn translation(tx: f64, ty: f64) -> TransformMatrix {
        TransformMatrix::from_affine([[1.0, 0.0, tx], [0.0, 1.0, ty]])
    }

    #[test]
    fn test_identity_reproduces_source() {
        let src = test_plane(16, 9);
        let out = warp_perspective(&src, &TransformMatrix::IDENTITY, (16, 9), &WarpOptions::default());
        assert_eq!(out, src);
    }

    #[test]
    fn test_output_has_requested_size() {
        let src = test_plane(10, 15);
        let out = warp_perspective(&src, &TransformMatrix::IDENTITY, (10, 10), &WarpOptions::default());
        assert_eq!(out.dimensions(), (10, 10));
        assert_eq!(out.row(3), src.row(3));
    }

    #[test]
    fn test_inverse_map_translation() {
        let src = test_plane(8, 4);
        let out = warp_perspective(&src, &translation(1.0, 0.0), (8, 4), &WarpOptions::default());

        // Destination x samples source x + 1; last column falls off the edge
        for y in 0..4 {
            for x in 0..7 {
                assert_eq!(out.get(x, y), src.get(x + 1, y));
            }
            assert_eq!(out.get(7, y), Some(0));
        }
    }

    #[test]
    fn test_forward_map_translation() {
        let src = test_plane(8, 4);
        let options = WarpOptions {
            map: MapDirection::Forward,
            border: 0,
        };
        let out = warp_perspective(&src, &translation(1.0, 0.0), (8, 4), &options);

        // Source moves right by one; first column is border
        for y in 0..4 {
            assert_eq!(out.get(0, y), Some(0));
            for x in 1..8 {
                assert_eq!(out.get(x, y), src.get(x - 1, y));
            }
        }
    }

    #[test]
    fn test_half_pixel_interpolation() {
        let src = Plane::new(2, 1, vec![0, 100]);
        let out = warp_perspective(&src, &translation(0.5, 0.0), (1, 1), &WarpOptions::default());
        assert_eq!(out.data, vec![50]);
    }

    #[test]
    fn test_partial_neighbours_blend_with_border() {
        let src = Plane::new(1, 1, vec![200]);
        let options = WarpOptions {
            map: MapDirection::Inverse,
            border: 0,
        };
        let out = warp_perspective(&src, &translation(0.5, 0.0), (1, 1), &options);
        assert_eq!(out.data, vec![100]);
    }

    #[test]
    fn test_custom_border_value() {
        let src = test_plane(8, 8);
        let options = WarpOptions {
            map: MapDirection::Inverse,
            border: 77,
        };
        let out = warp_perspective(&src, &translation(1000.0, 1000.0), (8, 8), &options);
        assert!(out.data.iter().all(|&v| v == 77));
    }

    #[test]
    fn test_singular_forward_matrix_is_all_border() {
        let src = test_plane(8, 8);
        let singular = TransformMatrix::from_rows([[1.0, 2.0, 0.0], [2.0, 4.0, 0.0], [0.0, 0.0, 1.0]]);
        let options = WarpOptions {
            map: MapDirection::Forward,
            border: 9,
        };
        let out = warp_perspective(&src, &singular, (5, 3), &options);
        assert_eq!(out, Plane::filled(5, 3, 9));
    }

    #[test]
    fn test_point_at_infinity_is_border() {
        let src = Plane::filled(4, 4, 255);
        let m = TransformMatrix::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]);
        let out = warp_perspective(&src, &m, (4, 4), &WarpOptions::default());

        // Column 0 maps to w == 0
        for y in 0..4 {
            assert_eq!(out.get(0, y), Some(0));
        }
    }

    #[test]
    fn test_rotation_180_flips_plane() {
        let src = test_plane(5, 5);
        let m = TransformMatrix::rotation((2.0, 2.0), 180.0, 1.0);
        let out = warp_perspective(&src, &m, (5, 5), &WarpOptions::default());

        for y in 0..5i64 {
            for x in 0..5i64 {
                let got = out.get(x, y).unwrap() as i32;
                let want = src.get(4 - x, 4 - y).unwrap() as i32;
                assert!((got - want).abs() <= 1, "({}, {}): {} vs {}", x, y, got, want);
            }
        }
    }

    #[test]
    fn test_rotation_keeps_center_and_clears_corners() {
        let src = Plane::filled(64, 64, 200);
        let m = TransformMatrix::rotation((32.0, 32.0), 30.0, 1.0);
        let out = warp_perspective(&src, &m, (64, 64), &WarpOptions::default());

        assert_eq!(out.get(32, 32), Some(200));
        assert_eq!(out.get(0, 0), Some(0));
        assert_eq!(out.get(63, 63), Some(0));
    }

    #[test]
    fn test_constant_plane_interior_stays_constant() {
        let src = Plane::filled(40, 40, 123);
        let m = TransformMatrix::rotation((20.0, 20.0), 17.0, 1.0);
        let out = warp_perspective(&src, &m, (40, 40), &WarpOptions::default());

        for y in 14..26 {
            for x in 14..26 {
                assert_eq!(out.get(x, y), Some(123));
            }
        }
    }

    #[test]
    fn test_modes_are_bit_identical() {
        let src = test_plane(33, 21);
        let m = TransformMatrix::rotation((16.0, 10.0), 30.0, 1.0);
        let options = WarpOptions::default();

        let standard = warp_with_mode(WarpMode::Standard, &src, &m, (33, 21), &options);
        let neon = warp_with_mode(WarpMode::Neon, &src, &m, (33, 21), &options);
        assert_eq!(standard, neon);
    }

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(WarpMode::from_flag(0), WarpMode::Standard);
        assert_eq!(WarpMode::from_flag(1), WarpMode::Neon);
        assert_eq!(WarpMode::from_flag(-3), WarpMode::Neon);
        assert!(WarpMode::Neon.is_neon());
        assert!(!WarpMode::default().is_neon());
    }

    #[test]
    fn test_mode_description() {
        assert_eq!(
            WarpMode::Neon.description(),
            "Using NEON optimization for warpPerspective."
        );
        assert_eq!(
            WarpMode::Standard.description(),
            "Using standard warpPerspective without NEON."
        );
        assert_eq!(WarpMode::Neon.to_string(), "neon");
    }

    #[test]
    fn test_nan_coordinates_are_border() {
        let src = Plane::filled(2, 2, 50);
        assert_eq!(sample_bilinear(&src, f64::NAN, 0.0, 3), 3);
        assert_eq!(sample_bilinear(&src, 0.0, f64::INFINITY, 3), 3);
    }

    #[test]
    fn test_empty_destination() {
        let src = test_plane(4, 4);
        let out = warp_perspective(&src, &TransformMatrix::IDENTITY, (0, 0), &WarpOptions::default());
        assert!(out.is_empty());
    }
}
