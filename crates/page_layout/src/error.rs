//! Error types for layout operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Empty raster: nothing to paginate")]
    EmptyRaster,

    #[error("Invalid page setup: {0}")]
    InvalidPageSetup(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
