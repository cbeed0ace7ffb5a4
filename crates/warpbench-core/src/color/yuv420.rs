//! BGR to planar YUV 4:2:0 (I420) conversion.
//!
//! Uses ITU-R BT.601 limited-range coefficients in 20-bit fixed point:
//!
//! ```text
//! Y = 16  + ( 0.257 R + 0.504 G + 0.098 B)
//! U = 128 + (-0.148 R - 0.291 G + 0.439 B)
//! V = 128 + ( 0.439 R - 0.368 G - 0.071 B)
//! ```
//!
//! Chroma is sampled once per 2x2 block from the block's mean colour.

use crate::decode::BgrImage;
use crate::plane::Plane;

/// Fixed-point shift for the conversion coefficients.
pub const COEF_SHIFT: u32 = 20;

/// BT.601 red contribution to luma (0.257).
pub const CRY: i32 = 269_484;
/// BT.601 green contribution to luma (0.504).
pub const CGY: i32 = 528_482;
/// BT.601 blue contribution to luma (0.098).
pub const CBY: i32 = 102_760;

/// BT.601 red contribution to U (-0.148).
pub const CRU: i32 = -155_188;
/// BT.601 green contribution to U (-0.291).
pub const CGU: i32 = -305_135;
/// BT.601 blue contribution to U, also red contribution to V (0.439).
pub const CBU: i32 = 460_324;

/// BT.601 green contribution to V (-0.368).
pub const CGV: i32 = -385_875;
/// BT.601 blue contribution to V (-0.071).
pub const CBV: i32 = -74_448;

const ROUND: i32 = 1 << (COEF_SHIFT - 1);

/// Planar YUV 4:2:0 frame with separate Y, U and V planes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YuvFrame {
    /// Full resolution luma.
    pub y: Plane,
    /// Blue-difference chroma, `ceil(w/2) x ceil(h/2)`.
    pub u: Plane,
    /// Red-difference chroma, `ceil(w/2) x ceil(h/2)`.
    pub v: Plane,
}

impl YuvFrame {
    /// Luma width, which is the frame width.
    pub fn width(&self) -> u32 {
        self.y.width
    }

    /// Luma height, which is the frame height.
    pub fn height(&self) -> u32 {
        self.y.height
    }

    /// Total number of sample bytes across all three planes.
    pub fn byte_len(&self) -> usize {
        self.y.data.len() + self.u.data.len() + self.v.data.len()
    }

    /// View the frame as a single contiguous plane of the frame width.
    ///
    /// Planes are concatenated Y, U, V and the tail is zero-padded to a whole
    /// row. For even dimensions the result is exactly `w x 3h/2`.
    pub fn stacked(&self) -> Plane {
        let width = self.width() as usize;
        if width == 0 {
            return Plane::new(0, 0, Vec::new());
        }

        let rows = self.byte_len().div_ceil(width);
        let mut data = Vec::with_capacity(rows * width);
        data.extend_from_slice(&self.y.data);
        data.extend_from_slice(&self.u.data);
        data.extend_from_slice(&self.v.data);
        data.resize(rows * width, 0);

        Plane::new(self.width(), rows as u32, data)
    }
}

/// Chroma plane dimensions for a frame of the given size.
#[inline]
pub fn chroma_dimensions(width: u32, height: u32) -> (u32, u32) {
    (width.div_ceil(2), height.div_ceil(2))
}

/// Luma for 8-bit R, G, B.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = (CRY * r as i32 + CGY * g as i32 + CBY * b as i32 + ROUND) >> COEF_SHIFT;
    (y + 16).clamp(0, 255) as u8
}

/// U and V for 8-bit R, G, B.
#[inline]
pub fn chroma(r: u8, g: u8, b: u8) -> (u8, u8) {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let u = (CRU * r + CGU * g + CBU * b + ROUND) >> COEF_SHIFT;
    let v = (CBU * r + CGV * g + CBV * b + ROUND) >> COEF_SHIFT;
    ((u + 128).clamp(0, 255) as u8, (v + 128).clamp(0, 255) as u8)
}

/// Convert an interleaved BGR image to an I420 frame.
///
/// The input is not modified. Odd widths or heights produce a final chroma
/// column or row averaged over the pixels that exist.
pub fn bgr_to_i420(image: &BgrImage) -> YuvFrame {
    let (w, h) = (image.width, image.height);
    let (cw, ch) = chroma_dimensions(w, h);

    let mut y_data = Vec::with_capacity(w as usize * h as usize);
    for px in image.pixels.chunks_exact(3) {
        y_data.push(luma(px[2], px[1], px[0]));
    }

    let mut u_data = Vec::with_capacity(cw as usize * ch as usize);
    let mut v_data = Vec::with_capacity(cw as usize * ch as usize);

    for cy in 0..ch {
        for cx in 0..cw {
            let mut sum = [0u32; 3];
            let mut count = 0u32;
            for y in (cy * 2)..(cy * 2 + 2).min(h) {
                for x in (cx * 2)..(cx * 2 + 2).min(w) {
                    let [b, g, r] = image.bgr_at(x, y);
                    sum[0] += r as u32;
                    sum[1] += g as u32;
                    sum[2] += b as u32;
                    count += 1;
                }
            }

            let mean = |s: u32| ((s + count / 2) / count) as u8;
            let (u, v) = chroma(mean(sum[0]), mean(sum[1]), mean(sum[2]));
            u_data.push(u);
            v_data.push(v);
        }
    }

    YuvFrame {
        y: Plane::new(w, h, y_data),
        u: Plane::new(cw, ch, u_data),
        v: Plane::new(cw, ch, v_data),
    }
}
