//! Image loading for the benchmark pipeline.
//!
//! Any format enabled on the `image` crate is accepted; the result is always
//! an interleaved 8-bit BGR buffer, which is the layout the colour converter
//! expects.
//!
//! # Examples
//!
//! ```ignore
//! use warpbench_core::decode::load_bgr;
//!
//! let image = load_bgr("photo.jpg")?;
//! println!("Loaded {}x{} image", image.width, image.height);
//! ```

mod load;
mod types;

pub use load::{load_bgr, load_bgr_from_bytes};
pub use types::{BgrImage, DecodeError};
