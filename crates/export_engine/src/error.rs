//! Error types for the export pipeline

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// The capture target was missing, detached, or empty.
    #[error("No report content to export")]
    InvalidInput,

    #[error("Capture failed: {0}")]
    Capture(#[from] capture::CaptureError),

    #[error("Layout failed: {0}")]
    Layout(#[from] page_layout::LayoutError),

    #[error("PDF assembly failed: {0}")]
    Assembly(#[from] store::pdf::PdfError),

    #[error("Delivery failed: {0}")]
    Delivery(#[from] store::StoreError),
}

pub type Result<T> = std::result::Result<T, ExportError>;
