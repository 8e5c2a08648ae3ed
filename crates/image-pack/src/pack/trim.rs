//! Border trimming for freshly decoded images

use image::{DynamicImage, ImageBuffer, Pixel, imageops};

/// Crop away empty borders.
///
/// Images with an alpha channel are cropped to their non-transparent pixels;
/// a fully transparent image is kept whole and flattened to RGB. Images
/// without alpha are cropped to their non-black pixels.
pub fn trim_borders(image: DynamicImage) -> DynamicImage {
    if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        match bounding_box(&rgba, |p| p[3] != 0) {
            Some((x, y, w, h)) => {
                DynamicImage::ImageRgba8(imageops::crop_imm(&rgba, x, y, w, h).to_image())
            }
            None => DynamicImage::ImageRgb8(image.to_rgb8()),
        }
    } else {
        let rgb = image.to_rgb8();
        match bounding_box(&rgb, |p| p.0 != [0, 0, 0]) {
            Some((x, y, w, h)) if (w, h) != rgb.dimensions() => {
                DynamicImage::ImageRgb8(imageops::crop_imm(&rgb, x, y, w, h).to_image())
            }
            _ => DynamicImage::ImageRgb8(rgb),
        }
    }
}

/// Smallest `(x, y, width, height)` rectangle containing every kept pixel
fn bounding_box<P: Pixel>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    keep: impl Fn(&P) -> bool,
) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in image.enumerate_pixels() {
        if !keep(pixel) {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }

    bounds.map(|(min_x, min_y, max_x, max_y)| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_alpha_is_cropped_to_opaque_region() {
        let mut img = RgbaImage::from_pixel(10, 8, Rgba([0, 0, 0, 0]));
        for x in 2..6 {
            for y in 3..5 {
                img.put_pixel(x, y, Rgba([200, 10, 10, 255]));
            }
        }
        let trimmed = trim_borders(DynamicImage::ImageRgba8(img));
        assert_eq!((trimmed.width(), trimmed.height()), (4, 2));
        assert!(trimmed.color().has_alpha());
    }

    #[test]
    fn test_fully_transparent_is_kept_whole() {
        let img = RgbaImage::from_pixel(5, 5, Rgba([0, 0, 0, 0]));
        let trimmed = trim_borders(DynamicImage::ImageRgba8(img));
        assert_eq!((trimmed.width(), trimmed.height()), (5, 5));
        assert!(!trimmed.color().has_alpha());
    }

    #[test]
    fn test_opaque_is_cropped_to_non_black() {
        let mut img = RgbImage::from_pixel(6, 6, Rgb([0, 0, 0]));
        img.put_pixel(1, 1, Rgb([1, 0, 0]));
        img.put_pixel(4, 2, Rgb([0, 0, 9]));
        let trimmed = trim_borders(DynamicImage::ImageRgb8(img));
        assert_eq!((trimmed.width(), trimmed.height()), (4, 2));
    }

    #[test]
    fn test_all_black_is_unchanged() {
        let img = RgbImage::from_pixel(3, 7, Rgb([0, 0, 0]));
        let trimmed = trim_borders(DynamicImage::ImageRgb8(img));
        assert_eq!((trimmed.width(), trimmed.height()), (3, 7));
    }
}
