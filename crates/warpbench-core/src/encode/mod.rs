//! Image encoding for the benchmark output.
//!
//! # Examples
//!
//! ```ignore
//! use warpbench_core::encode::{write_jpeg, DEFAULT_QUALITY};
//!
//! write_jpeg(&warped, "output.jpg", DEFAULT_QUALITY)?;
//! ```

mod jpeg;

pub use jpeg::{encode_plane_jpeg, write_jpeg, EncodeError, DEFAULT_QUALITY};
