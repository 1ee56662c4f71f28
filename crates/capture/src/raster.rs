//! Rasterized report images
//!
//! A `RasterImage` is the pixel output of capturing a report region: a
//! row-major RGB8 buffer over an opaque white background. The paginator
//! consumes it by copying out horizontal bands, one per output page.

use crate::{CaptureError, Result};

/// Row-major RGB8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    pub const BYTES_PER_PIXEL: usize = 3;

    /// Wrap an existing row-major RGB8 buffer.
    pub fn from_rgb8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * Self::BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(CaptureError::RasterizationFailed(format!(
                "pixel buffer is {} bytes, expected {} for {}x{}",
                pixels.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Solid white image.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0xFF; width as usize * height as usize * Self::BYTES_PER_PIXEL],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width-to-height ratio.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// Copy a horizontal band of `height` rows starting at row `top`.
    pub fn slice_rows(&self, top: u32, height: u32) -> Result<RasterImage> {
        if height == 0 {
            return Err(CaptureError::InvalidSlice("zero-height band".to_string()));
        }
        let end = top.checked_add(height).filter(|&end| end <= self.height);
        let end = end.ok_or_else(|| {
            CaptureError::InvalidSlice(format!(
                "rows {}..{} out of 0..{}",
                top,
                top as u64 + height as u64,
                self.height
            ))
        })?;

        let row_bytes = self.width as usize * Self::BYTES_PER_PIXEL;
        let start = top as usize * row_bytes;
        let stop = end as usize * row_bytes;

        Ok(Self {
            width: self.width,
            height,
            pixels: self.pixels[start..stop].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image(width: u32, height: u32) -> RasterImage {
        // Each row filled with its own row index so bands are identifiable.
        let mut pixels = Vec::with_capacity((width * height) as usize * 3);
        for y in 0..height {
            for _ in 0..width {
                pixels.extend_from_slice(&[y as u8, y as u8, y as u8]);
            }
        }
        RasterImage::from_rgb8(width, height, pixels).unwrap()
    }

    #[test]
    fn test_from_rgb8_rejects_wrong_length() {
        let result = RasterImage::from_rgb8(4, 4, vec![0; 10]);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_is_white() {
        let img = RasterImage::blank(2, 2);
        assert!(img.as_bytes().iter().all(|&b| b == 0xFF));
        assert_eq!(img.as_bytes().len(), 12);
    }

    #[test]
    fn test_aspect_ratio() {
        let img = RasterImage::blank(200, 100);
        assert_eq!(img.aspect_ratio(), 2.0);
    }

    #[test]
    fn test_slice_rows_copies_expected_band() {
        let img = gradient_image(3, 10);
        let band = img.slice_rows(4, 2).unwrap();

        assert_eq!(band.width(), 3);
        assert_eq!(band.height(), 2);
        // Rows 4 and 5 of the source.
        assert_eq!(&band.as_bytes()[..3], &[4, 4, 4]);
        assert_eq!(&band.as_bytes()[9..12], &[5, 5, 5]);
    }

    #[test]
    fn test_slice_rows_full_height() {
        let img = gradient_image(3, 10);
        let band = img.slice_rows(0, 10).unwrap();
        assert_eq!(band, img);
    }

    #[test]
    fn test_slice_rows_out_of_bounds() {
        let img = gradient_image(3, 10);
        assert!(img.slice_rows(8, 3).is_err());
        assert!(img.slice_rows(0, 0).is_err());
    }
}
