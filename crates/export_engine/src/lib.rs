//! Export Engine - the report export pipeline
//!
//! Takes a renderable report region, rasterizes it at the requested quality
//! tier, splits the raster into page-sized bands, assembles a paginated A4
//! PDF with document metadata, and delivers it through an output sink.
//! Failures surface as an outcome flag plus a user-facing notification.

mod batch;
mod error;
mod filename;
mod notify;
mod options;
mod pipeline;

pub use batch::*;
pub use error::*;
pub use filename::*;
pub use notify::*;
pub use options::*;
pub use pipeline::*;
