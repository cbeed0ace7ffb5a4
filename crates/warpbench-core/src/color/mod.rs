//! Colour-space conversion.
//!
//! Only the conversion the benchmark times is provided: interleaved BGR to
//! planar I420 (YUV 4:2:0, plane order Y, U, V).

mod yuv420;

pub use yuv420::{bgr_to_i420, chroma, chroma_dimensions, luma, YuvFrame};
