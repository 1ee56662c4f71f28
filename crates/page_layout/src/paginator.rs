//! Raster pagination
//!
//! Splits a rasterized report into horizontal bands, one band per output
//! page. The image is scaled to fill the usable page width; anything taller
//! than one usable page height is cut into consecutive pixel bands whose
//! heights sum to the raster height exactly, so no pixel row is lost or
//! duplicated at a page boundary. The leftover rows always become a final,
//! shorter page.

use crate::{LayoutError, PageGeometry, Result};

/// Target size of the scaled image on the page, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub target_width_mm: f64,
    pub target_height_mm: f64,
}

impl ImagePlacement {
    /// Scale a raster to fill the usable page width, preserving aspect ratio.
    pub fn fit_width(raster_width: u32, raster_height: u32, geometry: &PageGeometry) -> Self {
        let target_width_mm = geometry.usable_width_mm();
        let target_height_mm =
            target_width_mm * raster_height as f64 / raster_width as f64;
        Self {
            target_width_mm,
            target_height_mm,
        }
    }

    /// Whether the whole image fits on a single page.
    pub fn fits_single_page(&self, geometry: &PageGeometry) -> bool {
        self.target_height_mm <= geometry.usable_height_mm()
    }

    /// Top-left origin that centers the image on both axes.
    pub fn centered_origin_mm(&self, geometry: &PageGeometry) -> (f64, f64) {
        (
            (geometry.page_width_mm - self.target_width_mm) / 2.0,
            (geometry.page_height_mm - self.target_height_mm) / 2.0,
        )
    }
}

/// One page's band of the source raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSlice {
    /// First source row of the band.
    pub source_top: u32,
    /// Band height in source rows.
    pub source_height: u32,
    /// Height of the band as drawn on the page.
    pub height_mm: f64,
}

/// Ordered page bands for one raster.
#[derive(Debug, Clone)]
pub struct PaginationPlan {
    pub placement: ImagePlacement,
    pub slices: Vec<PageSlice>,
}

impl PaginationPlan {
    /// Compute the page bands for a raster of the given pixel size.
    pub fn compute(
        raster_width: u32,
        raster_height: u32,
        geometry: &PageGeometry,
    ) -> Result<Self> {
        if raster_width == 0 || raster_height == 0 {
            return Err(LayoutError::EmptyRaster);
        }
        geometry.validate()?;

        let placement = ImagePlacement::fit_width(raster_width, raster_height, geometry);

        // Source rows covered by one full usable page height. Independent of
        // the raster height: it follows from the width fit alone.
        let rows_per_page =
            geometry.usable_height_mm() * raster_width as f64 / geometry.usable_width_mm();
        let mm_per_row = geometry.usable_width_mm() / raster_width as f64;

        let mut slices = Vec::new();
        let mut top: u32 = 0;
        while top < raster_height {
            let boundary = ((slices.len() + 1) as f64 * rows_per_page).floor();
            let end = if boundary >= raster_height as f64 {
                raster_height
            } else {
                // Keep making progress even if a page covers under one row.
                (boundary as u32).max(top + 1)
            };
            slices.push(PageSlice {
                source_top: top,
                source_height: end - top,
                height_mm: (end - top) as f64 * mm_per_row,
            });
            top = end;
        }

        Ok(Self { placement, slices })
    }

    pub fn page_count(&self) -> usize {
        self.slices.len()
    }

    pub fn is_single_page(&self) -> bool {
        self.slices.len() == 1
    }

    /// Top-left origin of the image on each page, in millimetres.
    ///
    /// A single page centers the image on both axes; paginated output sits
    /// at the margin offset.
    pub fn origin_mm(&self, geometry: &PageGeometry) -> (f64, f64) {
        if self.is_single_page() {
            self.placement.centered_origin_mm(geometry)
        } else {
            (geometry.margin_mm, geometry.margin_mm)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // With A4 geometry and a 680 px wide raster, one full page covers
    // exactly 291 * 680 / 204 = 970 source rows.
    const WIDTH_680_ROWS_PER_PAGE: u32 = 970;

    #[test]
    fn test_short_raster_is_single_page() {
        let geometry = PageGeometry::a4();
        let plan = PaginationPlan::compute(680, 500, &geometry).unwrap();

        assert!(plan.is_single_page());
        assert_eq!(plan.slices[0].source_top, 0);
        assert_eq!(plan.slices[0].source_height, 500);
    }

    #[test]
    fn test_single_page_is_centered() {
        let geometry = PageGeometry::a4();
        let plan = PaginationPlan::compute(680, 500, &geometry).unwrap();

        let (x, y) = plan.origin_mm(&geometry);
        assert_eq!(x, (210.0 - 204.0) / 2.0);
        let expected_height = 204.0 * 500.0 / 680.0;
        assert!((y - (297.0 - expected_height) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_exact_two_pages() {
        let geometry = PageGeometry::a4();
        let plan =
            PaginationPlan::compute(680, 2 * WIDTH_680_ROWS_PER_PAGE, &geometry).unwrap();

        assert_eq!(plan.page_count(), 2);
        assert_eq!(plan.slices[0].source_height, WIDTH_680_ROWS_PER_PAGE);
        assert_eq!(plan.slices[1].source_height, WIDTH_680_ROWS_PER_PAGE);
        assert_eq!(plan.origin_mm(&geometry), (3.0, 3.0));
    }

    #[test]
    fn test_remainder_becomes_short_last_page() {
        let geometry = PageGeometry::a4();
        let plan =
            PaginationPlan::compute(680, WIDTH_680_ROWS_PER_PAGE + 1, &geometry).unwrap();

        assert_eq!(plan.page_count(), 2);
        assert_eq!(plan.slices[0].source_height, WIDTH_680_ROWS_PER_PAGE);
        assert_eq!(plan.slices[1].source_height, 1);
        assert_eq!(plan.slices[1].source_top, WIDTH_680_ROWS_PER_PAGE);
    }

    #[test]
    fn test_full_page_slices_draw_at_usable_height() {
        let geometry = PageGeometry::a4();
        let plan =
            PaginationPlan::compute(680, 3 * WIDTH_680_ROWS_PER_PAGE, &geometry).unwrap();

        for slice in &plan.slices {
            assert!((slice.height_mm - 291.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_raster_rejected() {
        let geometry = PageGeometry::a4();
        assert!(PaginationPlan::compute(0, 100, &geometry).is_err());
        assert!(PaginationPlan::compute(100, 0, &geometry).is_err());
    }

    #[test]
    fn test_page_count_is_ceiling() {
        let geometry = PageGeometry::a4();
        for height in [1, 969, 970, 971, 1939, 1940, 1941, 9700] {
            let plan = PaginationPlan::compute(680, height, &geometry).unwrap();
            let expected =
                (height as f64 / WIDTH_680_ROWS_PER_PAGE as f64).ceil() as usize;
            assert_eq!(plan.page_count(), expected, "height {}", height);
        }
    }

    proptest! {
        #[test]
        fn prop_slices_cover_raster_exactly(
            width in 1u32..4000,
            height in 1u32..40_000,
        ) {
            let geometry = PageGeometry::a4();
            let plan = PaginationPlan::compute(width, height, &geometry).unwrap();

            // Bands are consecutive, non-empty, and cover every row once.
            let mut expected_top = 0u32;
            for slice in &plan.slices {
                prop_assert_eq!(slice.source_top, expected_top);
                prop_assert!(slice.source_height > 0);
                expected_top += slice.source_height;
            }
            prop_assert_eq!(expected_top, height);
        }

        #[test]
        fn prop_page_count_matches_ceiling(
            width in 1u32..4000,
            height in 1u32..40_000,
        ) {
            let geometry = PageGeometry::a4();
            let plan = PaginationPlan::compute(width, height, &geometry).unwrap();
            let rows_per_page =
                geometry.usable_height_mm() * width as f64 / geometry.usable_width_mm();

            // ceil(height / rows_per_page), stated multiplicatively to avoid
            // compounding float division error.
            let count = plan.page_count() as f64;
            prop_assert!(count * rows_per_page >= height as f64);
            prop_assert!((count - 1.0) * rows_per_page < height as f64);
        }

        #[test]
        fn prop_drawn_height_matches_target(
            width in 1u32..4000,
            height in 1u32..40_000,
        ) {
            let geometry = PageGeometry::a4();
            let plan = PaginationPlan::compute(width, height, &geometry).unwrap();

            let drawn: f64 = plan.slices.iter().map(|s| s.height_mm).sum();
            let relative = (drawn - plan.placement.target_height_mm).abs()
                / plan.placement.target_height_mm;
            prop_assert!(relative < 1e-9);
        }
    }
}
