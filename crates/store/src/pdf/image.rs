//! Image XObjects
//!
//! Raster bands are embedded as raw RGB image XObjects with FlateDecode
//! compression. No JPEG pass-through: capture always hands us raw pixels.

use capture::RasterImage;

use super::object::Dict;
use super::object::Object;
use super::writer::{deflate, Result};

/// A flate-compressed RGB image ready to embed.
#[derive(Debug, Clone)]
pub struct ImageXObject {
    width: u32,
    height: u32,
    /// Deflated pixel data.
    data: Vec<u8>,
}

impl ImageXObject {
    /// Compress a raster band for embedding.
    pub fn from_raster(band: &RasterImage) -> Result<Self> {
        Ok(Self {
            width: band.width(),
            height: band.height(),
            data: deflate(band.as_bytes())?,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The XObject's stream dictionary and data.
    pub fn stream_parts(&self) -> (Dict, &[u8]) {
        let mut dict = Dict::of_type("XObject");
        dict.set("Subtype", Object::name("Image"));
        dict.set("Width", self.width);
        dict.set("Height", self.height);
        dict.set("BitsPerComponent", Object::Integer(8));
        dict.set("ColorSpace", Object::name("DeviceRGB"));
        dict.set("Filter", Object::name("FlateDecode"));
        (dict, &self.data)
    }
}
