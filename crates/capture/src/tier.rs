//! Export quality tiers

use serde::{Deserialize, Serialize};

/// Quality tier of a report export.
///
/// The tier selects the rasterization scale factor: `hd` captures at 3x the
/// region's base resolution, the other tiers at 2x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Minimal,
    #[default]
    Standard,
    Hd,
}

impl QualityTier {
    /// Raster scale factor applied during capture.
    pub fn scale(&self) -> u32 {
        match self {
            QualityTier::Hd => 3,
            _ => 2,
        }
    }

    /// Lowercase wire label, as used in document keywords.
    pub fn label(&self) -> &'static str {
        match self {
            QualityTier::Minimal => "minimal",
            QualityTier::Standard => "standard",
            QualityTier::Hd => "hd",
        }
    }
}
