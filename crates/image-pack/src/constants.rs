//! Shared constants for image packing
//!
//! This module centralizes the defaults and magic numbers used by the
//! layout engine, the composer and the exporters.

// =============================================================================
// Layout Defaults
// =============================================================================

/// Gap between images, and between images and the page edge (pixels)
pub const DEFAULT_PADDING_PX: u32 = 12;

/// Margin subtracted from the page size before images are scaled to fit (pixels)
pub const DEFAULT_NORMALIZATION_MARGIN_PX: u32 = 16;

/// Default rasterization resolution (pixels per inch)
pub const DEFAULT_DPI: u32 = 300;

// =============================================================================
// Composition
// =============================================================================

/// Page background, also used to flatten transparent images
pub const BACKGROUND_RGB: [u8; 3] = [255, 255, 255];

// =============================================================================
// Export
// =============================================================================

/// Default JPEG quality for exported page images (1-100)
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Millimeters per inch
pub const MM_PER_INCH: f32 = 25.4;

/// Extensions recognized as input images (lowercase)
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "tiff", "bmp"];
