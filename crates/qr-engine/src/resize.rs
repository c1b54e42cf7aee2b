//! Aspect-preserving resizing for embedded logos.
//!
//! Uses Lanczos3 filtering for high-quality downsampling.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::debug;

/// Resize an image to a target width while maintaining aspect ratio.
///
/// Returns a copy unchanged if it already matches the target width.
pub fn resize_to_width(img: &RgbaImage, width: u32) -> RgbaImage {
    let (orig_w, orig_h) = img.dimensions();

    if orig_w == width {
        debug!(width, "Image already at target width, skipping resize");
        return img.clone();
    }

    let ratio = f64::from(width) / f64::from(orig_w);
    let new_height = (f64::from(orig_h) * ratio).round() as u32;
    let new_height = new_height.max(1);

    debug!(orig_w, orig_h, new_width = width, new_height, "Resizing image to target width");

    imageops::resize(img, width.max(1), new_height, FilterType::Lanczos3)
}

/// Resize an image to a target height while maintaining aspect ratio.
///
/// Returns a copy unchanged if it already matches the target height.
pub fn resize_to_height(img: &RgbaImage, height: u32) -> RgbaImage {
    let (orig_w, orig_h) = img.dimensions();

    if orig_h == height {
        debug!(height, "Image already at target height, skipping resize");
        return img.clone();
    }

    let ratio = f64::from(height) / f64::from(orig_h);
    let new_width = (f64::from(orig_w) * ratio).round() as u32;
    let new_width = new_width.max(1);

    debug!(orig_w, orig_h, new_width, new_height = height, "Resizing image to target height");

    imageops::resize(img, new_width, height.max(1), FilterType::Lanczos3)
}

/// Scale an image so it fits inside a `max_w × max_h` box, keeping its aspect ratio.
///
/// The longer side (relative to the box) ends up touching the box edge.
pub fn fit_within(img: &RgbaImage, max_w: u32, max_h: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return RgbaImage::new(max_w.max(1), max_h.max(1));
    }
    // Compare w/h against max_w/max_h without floating point.
    if u64::from(w) * u64::from(max_h) >= u64::from(h) * u64::from(max_w) {
        resize_to_width(img, max_w)
    } else {
        resize_to_height(img, max_h)
    }
}
