//! Page Layout - page geometry and raster pagination
//!
//! This crate holds the pure math of the export pipeline: the printable page
//! geometry and the algorithm that splits a rasterized report into
//! page-sized horizontal bands.

mod error;
mod geometry;
mod paginator;

pub use error::*;
pub use geometry::*;
pub use paginator::*;
