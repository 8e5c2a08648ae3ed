use crate::constants::*;
use crate::layout::{OrderingPolicy, PageGeometry};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Packing run configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PackOptions {
    // Page
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub dpi: u32,

    // Layout
    pub padding: u32,
    pub normalization_margin: u32,
    pub ordering: OrderingPolicy,

    // Export
    pub jpeg_quality: u8,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            dpi: DEFAULT_DPI,
            padding: DEFAULT_PADDING_PX,
            normalization_margin: DEFAULT_NORMALIZATION_MARGIN_PX,
            ordering: OrderingPolicy::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl PackOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| PackError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PackError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Page size in pixels at the configured resolution
    pub fn page_pixels(&self) -> (u32, u32) {
        self.paper_size.pixel_dimensions(self.orientation, self.dpi)
    }

    /// Pixel-level page geometry handed to the layout engine
    pub fn geometry(&self) -> PageGeometry {
        let (width, height) = self.page_pixels();
        PageGeometry {
            width,
            height,
            padding: self.padding,
            normalization_margin: self.normalization_margin,
        }
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(PackError::Config("DPI must be greater than zero".to_string()));
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(PackError::Config(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }

        let (w_in, h_in) = self.paper_size.dimensions_in();
        if !(w_in > 0.0 && h_in > 0.0) {
            return Err(PackError::Config(format!(
                "Paper dimensions must be positive, got {}x{} in",
                w_in, h_in
            )));
        }

        self.geometry().validate()
    }
}
