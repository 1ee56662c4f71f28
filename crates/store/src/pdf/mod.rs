//! PDF assembly
//!
//! A small hand-rolled PDF writer for image-per-page report documents:
//!
//! - `object`: the base object model and its serialization
//! - `content`: page content streams (paint one image per page)
//! - `image`: raster bands as flate-compressed image XObjects
//! - `page`: document structure and metadata dictionaries
//! - `writer`: file layout, cross-reference table, trailer
//!
//! Pages carry exactly one embedded image each, so there is no font or text
//! machinery here.

mod content;
mod image;
mod object;
mod page;
mod writer;

pub use content::*;
pub use image::*;
pub use object::*;
pub use page::*;
pub use writer::*;

#[cfg(test)]
mod tests;
