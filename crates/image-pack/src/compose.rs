//! Page composition
//!
//! Rasterizes planned pages: every page gets a fresh white canvas and each
//! placed image is flattened, resized and pasted into its rectangle.

use std::collections::HashMap;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};
use rayon::prelude::*;

use crate::constants::BACKGROUND_RGB;
use crate::layout::PageGeometry;
use crate::types::*;

/// Compose every page. Pages are rendered in parallel; the result is in
/// page order and the first failure aborts the run.
pub fn compose_pages(
    pages: &[Page],
    images: &[ImageDescriptor],
    geometry: &PageGeometry,
) -> Result<Vec<PageCanvas>> {
    let mut by_id: HashMap<usize, &ImageDescriptor> = HashMap::with_capacity(images.len());
    for image in images {
        if by_id.insert(image.id, image).is_some() {
            return Err(PackError::Config(format!("Duplicate image id {}", image.id)));
        }
    }

    pages
        .par_iter()
        .map(|page| compose_page(page, &by_id, geometry))
        .collect()
}

/// Compose a single page onto a `geometry.width x geometry.height` canvas.
fn compose_page(
    page: &Page,
    images: &HashMap<usize, &ImageDescriptor>,
    geometry: &PageGeometry,
) -> Result<PageCanvas> {
    let mut canvas = RgbImage::from_pixel(geometry.width, geometry.height, Rgb(BACKGROUND_RGB));

    for placement in &page.placements {
        let pixels = images
            .get(&placement.id)
            .and_then(|descriptor| pixel_buffer(descriptor))
            .ok_or(PackError::MissingPixelData { id: placement.id })?;

        let flattened = flatten_on_background(pixels);
        let resized = if flattened.dimensions() == (placement.width, placement.height) {
            flattened
        } else {
            imageops::resize(
                &flattened,
                placement.width,
                placement.height,
                FilterType::Lanczos3,
            )
        };

        imageops::replace(&mut canvas, &resized, placement.x as i64, placement.y as i64);
    }

    log::debug!(
        "Composed page {} with {} image(s)",
        page.index,
        page.placements.len()
    );

    Ok(PageCanvas {
        index: page.index,
        pixels: canvas,
    })
}

/// Composite an image over the opaque background at its native resolution.
///
/// Flattening before resampling keeps fully transparent pixels (often black
/// with alpha 0) from bleeding dark fringes into the resized edges.
pub fn flatten_on_background(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    let mut flat = RgbImage::new(rgba.width(), rgba.height());
    for (src, dst) in rgba.pixels().zip(flat.pixels_mut()) {
        let alpha = src[3] as u32;
        let blend = |channel: u8, background: u8| -> u8 {
            ((channel as u32 * alpha + background as u32 * (255 - alpha) + 127) / 255) as u8
        };
        *dst = Rgb([
            blend(src[0], BACKGROUND_RGB[0]),
            blend(src[1], BACKGROUND_RGB[1]),
            blend(src[2], BACKGROUND_RGB[2]),
        ]);
    }
    flat
}

/// The descriptor's pixel buffer, if present and consistent with its
/// declared dimensions
fn pixel_buffer(descriptor: &ImageDescriptor) -> Option<&DynamicImage> {
    descriptor.pixels.as_ref().filter(|pixels| {
        pixels.width() == descriptor.natural_width
            && pixels.height() == descriptor.natural_height
            && pixels.width() > 0
            && pixels.height() > 0
    })
}
