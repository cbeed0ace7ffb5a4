//! Geometric transforms: rotation matrices and perspective warping.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, x to the right, y down
//! - Rotation angles are in degrees, positive = counter-clockwise on screen
//! - Integer coordinates address sample positions (no half-pixel offset)

mod matrix;
mod warp;

pub use matrix::{rotation_matrix_2d, TransformMatrix};
pub use warp::{warp_perspective, warp_with_mode, MapDirection, WarpMode, WarpOptions};
