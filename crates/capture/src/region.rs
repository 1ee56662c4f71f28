//! Renderable report regions
//!
//! A `RenderRegion` is the opaque, already-rendered report the export
//! pipeline captures from. The pipeline briefly switches the region into a
//! compact layout while capturing; `CompactLayoutScope` ties that switch to
//! a guard so the region is restored on every exit path.

use std::path::Path;

use crate::{CaptureError, RasterImage, Result};

/// A renderable report region that can be rasterized.
pub trait RenderRegion {
    /// Unscaled size of the region in CSS-pixel-equivalent units.
    fn dimensions(&self) -> (u32, u32);

    /// Whether the region is live and attached to a rendering surface.
    fn is_attached(&self) -> bool;

    /// Switch the region into compact layout for capture.
    ///
    /// Implementations return only once the adjustment is actually in
    /// effect, so callers never need a settle delay before rasterizing.
    fn apply_compact_layout(&mut self) -> Result<()>;

    /// Restore the region's normal layout. Must be idempotent.
    fn release_compact_layout(&mut self);

    /// Produce the pixel image at an integer scale factor, compositing any
    /// transparency over an opaque white background.
    fn rasterize(&mut self, scale: u32) -> Result<RasterImage>;
}

/// RAII scope for the compact-layout adjustment.
///
/// Entering the scope applies compact layout; dropping it releases the
/// adjustment, whether the capture succeeded, failed, or unwound.
pub struct CompactLayoutScope<'a> {
    region: &'a mut dyn RenderRegion,
}

impl<'a> CompactLayoutScope<'a> {
    pub fn enter(region: &'a mut dyn RenderRegion) -> Result<Self> {
        region.apply_compact_layout()?;
        Ok(Self { region })
    }

    pub fn region(&mut self) -> &mut dyn RenderRegion {
        self.region
    }
}

impl Drop for CompactLayoutScope<'_> {
    fn drop(&mut self) {
        self.region.release_compact_layout();
    }
}

/// A region backed by a pre-rendered report snapshot on disk.
///
/// The headless stand-in for a live document node: the snapshot's native
/// pixel size is the region's base size, and higher quality tiers are
/// produced by resampling.
#[derive(Debug)]
pub struct ImageRegion {
    rgba: image::RgbaImage,
    compact: bool,
}

impl ImageRegion {
    /// Load a snapshot from a PNG or JPEG file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CaptureError::MissingTarget);
        }
        let dynamic =
            image::open(path).map_err(|e| CaptureError::Decode(e.to_string()))?;
        Ok(Self::from_image(dynamic.to_rgba8()))
    }

    pub fn from_image(rgba: image::RgbaImage) -> Self {
        Self {
            rgba,
            compact: false,
        }
    }
}

impl RenderRegion for ImageRegion {
    fn dimensions(&self) -> (u32, u32) {
        (self.rgba.width(), self.rgba.height())
    }

    fn is_attached(&self) -> bool {
        true
    }

    fn apply_compact_layout(&mut self) -> Result<()> {
        // A static snapshot has no pending layout work, so the adjustment is
        // in effect as soon as the flag is set.
        self.compact = true;
        Ok(())
    }

    fn release_compact_layout(&mut self) {
        self.compact = false;
    }

    fn rasterize(&mut self, scale: u32) -> Result<RasterImage> {
        if scale == 0 {
            return Err(CaptureError::RasterizationFailed(
                "scale factor must be at least 1".to_string(),
            ));
        }
        let (width, height) = self.dimensions();
        if width == 0 || height == 0 {
            return Err(CaptureError::MissingTarget);
        }
        tracing::debug!(
            width,
            height,
            scale,
            compact = self.compact,
            "rasterizing snapshot region"
        );

        let scaled = if scale == 1 {
            self.rgba.clone()
        } else {
            image::imageops::resize(
                &self.rgba,
                width * scale,
                height * scale,
                image::imageops::FilterType::Triangle,
            )
        };

        let mut pixels =
            Vec::with_capacity(scaled.len() / 4 * RasterImage::BYTES_PER_PIXEL);
        for pixel in scaled.pixels() {
            let [r, g, b, a] = pixel.0;
            pixels.push(over_white(r, a));
            pixels.push(over_white(g, a));
            pixels.push(over_white(b, a));
        }
        RasterImage::from_rgb8(width * scale, height * scale, pixels)
    }
}

/// Composite one channel over an opaque white background.
fn over_white(channel: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((channel as u32 * a + 0xFF * (0xFF - a)) / 0xFF) as u8
}

/// An in-memory region over an RGB base image.
pub struct BufferRegion {
    base: RasterImage,
    attached: bool,
    compact: bool,
}

impl BufferRegion {
    pub fn new(base: RasterImage) -> Self {
        Self {
            base,
            attached: true,
            compact: false,
        }
    }

    /// A region that is not attached to any rendering surface.
    pub fn detached(base: RasterImage) -> Self {
        Self {
            base,
            attached: false,
            compact: false,
        }
    }
}

impl RenderRegion for BufferRegion {
    fn dimensions(&self) -> (u32, u32) {
        (self.base.width(), self.base.height())
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn apply_compact_layout(&mut self) -> Result<()> {
        self.compact = true;
        Ok(())
    }

    fn release_compact_layout(&mut self) {
        self.compact = false;
    }

    fn rasterize(&mut self, scale: u32) -> Result<RasterImage> {
        if scale == 0 {
            return Err(CaptureError::RasterizationFailed(
                "scale factor must be at least 1".to_string(),
            ));
        }
        if !self.attached {
            return Err(CaptureError::MissingTarget);
        }
        let (width, height) = self.dimensions();
        let row_bytes = width as usize * RasterImage::BYTES_PER_PIXEL;
        let src = self.base.as_bytes();

        // Nearest-neighbour replication is enough for a synthetic buffer.
        let mut pixels = Vec::with_capacity(
            (width * scale) as usize * (height * scale) as usize
                * RasterImage::BYTES_PER_PIXEL,
        );
        for y in 0..height as usize {
            let mut row =
                Vec::with_capacity(row_bytes * scale as usize);
            for x in 0..width as usize {
                let offset = y * row_bytes + x * RasterImage::BYTES_PER_PIXEL;
                let pixel = &src[offset..offset + RasterImage::BYTES_PER_PIXEL];
                for _ in 0..scale {
                    row.extend_from_slice(pixel);
                }
            }
            for _ in 0..scale {
                pixels.extend_from_slice(&row);
            }
        }
        RasterImage::from_rgb8(width * scale, height * scale, pixels)
    }
}

/// The absent capture target.
///
/// Used where the original pipeline would hold a null document reference: a
/// batch entry whose snapshot could not be opened still flows through the
/// exporter and comes back as a per-item failure.
pub struct MissingRegion;

impl RenderRegion for MissingRegion {
    fn dimensions(&self) -> (u32, u32) {
        (0, 0)
    }

    fn is_attached(&self) -> bool {
        false
    }

    fn apply_compact_layout(&mut self) -> Result<()> {
        Err(CaptureError::MissingTarget)
    }

    fn release_compact_layout(&mut self) {}

    fn rasterize(&mut self, _scale: u32) -> Result<RasterImage> {
        Err(CaptureError::MissingTarget)
    }
}
