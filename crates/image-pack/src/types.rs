use image::{DynamicImage, RgbImage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Missing or corrupt pixel data for image {id}")]
    MissingPixelData { id: usize },
    #[error("No pages to export")]
    EmptyInput,
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, PackError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_in: f32, height_in: f32 },
}

impl PaperSize {
    /// Get base dimensions in inches (portrait)
    pub fn dimensions_in(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (11.69, 16.54),
            PaperSize::A4 => (8.27, 11.69),
            PaperSize::A5 => (5.83, 8.27),
            PaperSize::Letter => (8.5, 11.0),
            PaperSize::Legal => (8.5, 14.0),
            PaperSize::Tabloid => (11.0, 17.0),
            PaperSize::Custom {
                width_in,
                height_in,
            } => (width_in, height_in),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_in();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Page size in whole pixels at the given resolution
    pub fn pixel_dimensions(self, orientation: Orientation, dpi: u32) -> (u32, u32) {
        let (w, h) = self.dimensions_with_orientation(orientation);
        let to_px = |inches: f32| (inches as f64 * dpi as f64).round().max(0.0) as u32;
        (to_px(w), to_px(h))
    }
}

/// An input image as handed over by the input provider.
///
/// `id` is the image's position in the original input order. The pixel
/// buffer is optional so that a descriptor can be planned from its
/// dimensions alone; composing a page that needs it then fails with
/// [`PackError::MissingPixelData`].
#[derive(Debug, Clone)]
pub struct ImageDescriptor {
    pub id: usize,
    pub natural_width: u32,
    pub natural_height: u32,
    pub pixels: Option<DynamicImage>,
}

impl ImageDescriptor {
    pub fn new(id: usize, image: DynamicImage) -> Self {
        Self {
            id,
            natural_width: image.width(),
            natural_height: image.height(),
            pixels: Some(image),
        }
    }

    /// Descriptor carrying only dimensions, without a pixel buffer
    pub fn dimensions_only(id: usize, natural_width: u32, natural_height: u32) -> Self {
        Self {
            id,
            natural_width,
            natural_height,
            pixels: None,
        }
    }
}

/// On-page footprint of an image after downscale-to-fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalizedSize {
    pub id: usize,
    pub width: u32,
    pub height: u32,
}

/// Resolved rectangle of one image on one page, in page pixel coordinates
/// (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub id: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Set when the image was wider than the usable page width and had to be
    /// scaled down to exactly that width
    pub forced_fit: bool,
}

impl Placement {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether two placements share any pixel
    pub fn intersects(&self, other: &Placement) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// One output page and the images placed on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number
    pub index: usize,
    pub placements: Vec<Placement>,
}

/// A fully composed, opaque page raster
#[derive(Debug, Clone)]
pub struct PageCanvas {
    pub index: usize,
    pub pixels: RgbImage,
}

/// Statistics about a packing run
#[derive(Debug, Clone, PartialEq)]
pub struct PackStatistics {
    /// Number of images placed
    pub images: usize,
    /// Number of output pages
    pub pages: usize,
    /// Number of shelves across all pages
    pub shelves: usize,
    /// Images that had to be scaled down to the usable page width
    pub forced_fits: usize,
    /// Placed area divided by the usable area of all pages (0.0..=1.0 for
    /// layouts that respect the padding)
    pub coverage: f64,
}
