//! Layout data types for image packing

use crate::types::{PackError, Result};

/// Pixel-level page configuration shared by the normalizer and the packer.
///
/// This is built from [`crate::PackOptions`] for real runs, or directly for
/// arbitrary page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    /// Page width in pixels
    pub width: u32,
    /// Page height in pixels
    pub height: u32,
    /// Gap between images and between images and the page edge
    pub padding: u32,
    /// Margin subtracted from the page size before normalization
    pub normalization_margin: u32,
}

impl PageGeometry {
    pub fn new(width: u32, height: u32, padding: u32) -> Self {
        Self {
            width,
            height,
            padding,
            normalization_margin: crate::constants::DEFAULT_NORMALIZATION_MARGIN_PX,
        }
    }

    pub fn with_normalization_margin(mut self, margin: u32) -> Self {
        self.normalization_margin = margin;
        self
    }

    /// Width available between the left and right padding
    pub fn usable_width(&self) -> i64 {
        self.width as i64 - 2 * self.padding as i64
    }

    /// Height available between the top and bottom padding
    pub fn usable_height(&self) -> i64 {
        self.height as i64 - 2 * self.padding as i64
    }

    /// Bounding box images are scaled to fit before packing
    pub fn normalization_bounds(&self) -> (u32, u32) {
        (
            self.width.saturating_sub(self.normalization_margin),
            self.height.saturating_sub(self.normalization_margin),
        )
    }

    /// Check that at least one pixel of every page is usable
    pub fn validate(&self) -> Result<()> {
        if self.usable_width() <= 0 {
            return Err(PackError::Config(format!(
                "Page width {}px leaves no usable width with {}px padding",
                self.width, self.padding
            )));
        }
        if self.usable_height() <= 0 {
            return Err(PackError::Config(format!(
                "Page height {}px leaves no usable height with {}px padding",
                self.height, self.padding
            )));
        }
        Ok(())
    }
}
