//! Error types for capture operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Capture target is missing or detached")]
    MissingTarget,

    #[error("Rasterization failed: {0}")]
    RasterizationFailed(String),

    #[error("Snapshot decode error: {0}")]
    Decode(String),

    #[error("Invalid raster slice: {0}")]
    InvalidSlice(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CaptureError>;
