use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Failure of a benchmark run. Every variant is terminal.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Failed to load input image: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to save output image: {0}")]
    Encode(#[from] EncodeError),
}

pub type Result<T> = std::result::Result<T, BenchError>;
