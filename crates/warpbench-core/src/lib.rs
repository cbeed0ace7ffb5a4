//! Warpbench Core - colour conversion and perspective warp timing
//!
//! This crate provides the pieces of the warpbench pipeline: image loading,
//! BGR to I420 conversion, rotation matrices, bilinear perspective warping,
//! stage timing and JPEG output.

pub mod color;
pub mod decode;
pub mod encode;
pub mod error;
pub mod pipeline;
pub mod plane;
pub mod timing;
pub mod transform;

pub use color::{bgr_to_i420, YuvFrame};
pub use decode::{load_bgr, BgrImage, DecodeError};
pub use encode::{write_jpeg, EncodeError};
pub use error::BenchError;
pub use pipeline::{run, run_in_memory, BenchConfig, BenchReport};
pub use plane::Plane;
pub use timing::{PipelineTimings, StageTiming, Timer};
pub use transform::{warp_perspective, TransformMatrix, WarpMode, WarpOptions};
