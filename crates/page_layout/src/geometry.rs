//! Page geometry
//!
//! Page and margin sizes are expressed in millimetres, matching how the
//! export surface is specified; conversion to PDF points happens only at
//! the writer boundary.

use serde::{Deserialize, Serialize};

use crate::{LayoutError, Result};

/// Points per millimetre (72 dpi).
pub const PT_PER_MM: f64 = 72.0 / 25.4;

/// Convert millimetres to PDF points.
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * PT_PER_MM
}

/// Printable page geometry in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    /// Uniform margin on all four sides.
    pub margin_mm: f64,
}

impl PageGeometry {
    /// A4 portrait with the export pipeline's 3 mm capture margin.
    pub fn a4() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 3.0,
        }
    }

    /// Width of the area an image may occupy.
    pub fn usable_width_mm(&self) -> f64 {
        self.page_width_mm - 2.0 * self.margin_mm
    }

    /// Height of the area an image may occupy.
    pub fn usable_height_mm(&self) -> f64 {
        self.page_height_mm - 2.0 * self.margin_mm
    }

    pub fn page_width_pt(&self) -> f64 {
        mm_to_pt(self.page_width_mm)
    }

    pub fn page_height_pt(&self) -> f64 {
        mm_to_pt(self.page_height_mm)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.page_width_mm.is_finite()
            && self.page_height_mm.is_finite()
            && self.margin_mm.is_finite())
        {
            return Err(LayoutError::InvalidPageSetup(
                "non-finite dimension".to_string(),
            ));
        }
        if self.margin_mm < 0.0 {
            return Err(LayoutError::InvalidPageSetup(format!(
                "negative margin: {}",
                self.margin_mm
            )));
        }
        if self.usable_width_mm() <= 0.0 || self.usable_height_mm() <= 0.0 {
            return Err(LayoutError::InvalidPageSetup(format!(
                "margins leave no usable area on a {}x{} mm page",
                self.page_width_mm, self.page_height_mm
            )));
        }
        Ok(())
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_usable_area() {
        let geometry = PageGeometry::a4();
        assert_eq!(geometry.usable_width_mm(), 204.0);
        assert_eq!(geometry.usable_height_mm(), 291.0);
    }

    #[test]
    fn test_a4_in_points() {
        let geometry = PageGeometry::a4();
        assert!((geometry.page_width_pt() - 595.276).abs() < 0.01);
        assert!((geometry.page_height_pt() - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_validate_rejects_oversized_margin() {
        let geometry = PageGeometry {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 110.0,
        };
        assert!(geometry.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_margin() {
        let geometry = PageGeometry {
            margin_mm: -1.0,
            ..PageGeometry::a4()
        };
        assert!(geometry.validate().is_err());
    }

    #[test]
    fn test_default_is_a4() {
        assert_eq!(PageGeometry::default(), PageGeometry::a4());
    }
}
