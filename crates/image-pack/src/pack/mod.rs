//! Image packing - arranging images onto fixed-size pages
//!
//! This module orchestrates a packing run:
//! 1. Validate the options
//! 2. Normalize, order and shelf-pack the images
//! 3. Compose each page raster
//! 4. Export the pages as a PDF or as page images

mod io;
mod trim;

pub use io::{
    OutputTarget, discover_images, load_image, load_images, page_file_name, save_page_images,
    save_pdf,
};
pub use trim::trim_borders;

use crate::compose::compose_pages;
use crate::layout::{OrderingPolicy, PageGeometry, plan_pages};
use crate::options::PackOptions;
use crate::types::*;

/// Planned pages and their composed rasters, in page order
#[derive(Debug, Clone)]
pub struct PackOutput {
    pub pages: Vec<Page>,
    pub canvases: Vec<PageCanvas>,
}

/// Main packing function
pub async fn pack(images: Vec<ImageDescriptor>, options: &PackOptions) -> Result<PackOutput> {
    options.validate()?;

    let geometry = options.geometry();
    let ordering = options.ordering;

    tokio::task::spawn_blocking(move || pack_sync(&images, &geometry, ordering)).await?
}

fn pack_sync(
    images: &[ImageDescriptor],
    geometry: &PageGeometry,
    ordering: OrderingPolicy,
) -> Result<PackOutput> {
    let pages = plan_pages(images, geometry, ordering)?;
    let canvases = compose_pages(&pages, images, geometry)?;
    Ok(PackOutput { pages, canvases })
}

/// Hand the composed pages to the exporter selected by `target`
pub async fn export(
    canvases: Vec<PageCanvas>,
    target: &OutputTarget,
    options: &PackOptions,
) -> Result<()> {
    match target {
        OutputTarget::Pdf(path) => save_pdf(canvases, options.dpi, options.jpeg_quality, path).await,
        OutputTarget::PageImages(dir) => {
            save_page_images(canvases, options.jpeg_quality, dir).await?;
            Ok(())
        }
    }
}
