//! Size normalization
//!
//! Every image is scaled uniformly so that it fits inside the page's
//! normalization bounds. Images are never scaled up.

use crate::types::{ImageDescriptor, NormalizedSize};

use super::PageGeometry;

/// Compute the downscale-to-fit size of an image.
///
/// The scale is `min(1.0, max_width / width, max_height / height)`; a zero
/// natural dimension contributes a factor of 1.0 on its axis. Both output
/// dimensions are at least 1.
///
/// # Arguments
/// * `natural_width`, `natural_height` - Raw pixel dimensions of the image
/// * `max_width`, `max_height` - Bounding box to fit into
pub fn normalize_dimensions(
    natural_width: u32,
    natural_height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    let scale = fit_scale(natural_width, natural_height, max_width, max_height);
    (
        scale_dimension(natural_width, scale),
        scale_dimension(natural_height, scale),
    )
}

/// Normalize every image against the page geometry, keeping input order.
pub fn normalize_sizes(images: &[ImageDescriptor], geometry: &PageGeometry) -> Vec<NormalizedSize> {
    let (max_width, max_height) = geometry.normalization_bounds();

    images
        .iter()
        .map(|image| {
            let (width, height) = normalize_dimensions(
                image.natural_width,
                image.natural_height,
                max_width,
                max_height,
            );
            if width != image.natural_width || height != image.natural_height {
                log::debug!(
                    "Image {}: {}x{} scaled to {}x{}",
                    image.id,
                    image.natural_width,
                    image.natural_height,
                    width,
                    height
                );
            }
            NormalizedSize {
                id: image.id,
                width,
                height,
            }
        })
        .collect()
}

fn fit_scale(natural_width: u32, natural_height: u32, max_width: u32, max_height: u32) -> f64 {
    let axis = |natural: u32, max: u32| {
        if natural == 0 {
            1.0
        } else {
            max as f64 / natural as f64
        }
    };

    1.0_f64
        .min(axis(natural_width, max_width))
        .min(axis(natural_height, max_height))
}

pub(crate) fn scale_dimension(value: u32, scale: f64) -> u32 {
    ((value as f64 * scale).round() as u32).max(1)
}
