//! Capture - report region rasterization
//!
//! This crate models the capture side of the export pipeline: a renderable
//! report region that can be switched into a compact layout and rasterized
//! into an RGB pixel image at a chosen quality tier.

mod error;
mod raster;
mod region;
mod tier;

pub use error::*;
pub use raster::*;
pub use region::*;
pub use tier::*;
