//! Layout calculation modules for image packing
//!
//! This module handles all the geometric decisions, leaf-first:
//! - Size normalization (uniform downscale-to-fit, never upscaling)
//! - Ordering (which image is offered to the packer next)
//! - Shelf packing (rows of images, rows onto pages)

mod normalize;
mod order;
mod shelf;
mod types;

pub use normalize::*;
pub use order::*;
pub use shelf::*;
pub use types::*;

use crate::types::{ImageDescriptor, Page, Result};

/// Plan the pages for a set of images: normalize, order, then shelf-pack.
///
/// An empty input yields zero pages.
pub fn plan_pages(
    images: &[ImageDescriptor],
    geometry: &PageGeometry,
    ordering: OrderingPolicy,
) -> Result<Vec<Page>> {
    let packer = ShelfPacker::new(geometry)?;

    if images.is_empty() {
        log::debug!("No images to plan");
        return Ok(Vec::new());
    }

    let sizes = normalize_sizes(images, geometry);
    let ordered = ordering.apply(sizes);
    Ok(packer.pack(&ordered))
}
