//! Encoding composed cards for download.

use std::io::Cursor;
use std::str::FromStr;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use tracing::debug;

use crate::color::{WHITE, blend};
use crate::{CanvasError, Result};

/// JPEG quality used for downloads.
pub const JPEG_QUALITY: u8 = 95;

/// Filename stem used when the card has no title.
pub const DEFAULT_FILENAME: &str = "qr-code";

/// Download format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpeg),
            _ => Err(CanvasError::UnknownFormat(s.to_string())),
        }
    }
}

/// Encode a card in the requested format.
///
/// PNG keeps the canvas as is. JPEG is flattened onto opaque white first.
pub fn encode(img: &RgbaImage, format: ExportFormat) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        ExportFormat::Png => {
            DynamicImage::ImageRgba8(img.clone())
                .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
                .map_err(|e| CanvasError::ExportFailure(e.to_string()))?;
        }
        ExportFormat::Jpeg => {
            let flat = flatten_onto_white(img);
            JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
                .encode_image(&flat)
                .map_err(|e| CanvasError::ExportFailure(e.to_string()))?;
        }
    }
    debug!(format = format.extension(), bytes = buf.len(), "Encoded card");
    Ok(buf)
}

/// Composite the image over opaque white and drop the alpha channel.
pub fn flatten_onto_white(img: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let px = blend(WHITE, *img.get_pixel(x, y), 1.0);
        image::Rgb([px[0], px[1], px[2]])
    })
}

/// Lowercase the title and replace whitespace runs with single hyphens.
///
/// Titles that are empty after trimming yield [`DEFAULT_FILENAME`].
pub fn slugify(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return DEFAULT_FILENAME.to_string();
    }

    let mut slug = String::with_capacity(trimmed.len());
    let mut in_space = false;
    for ch in trimmed.chars() {
        if ch.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.extend(ch.to_lowercase());
            in_space = false;
        }
    }
    slug
}

/// Download filename for a card: `<slug>.<ext>`.
pub fn download_filename(title: &str, format: ExportFormat) -> String {
    format!("{}.{}", slugify(title), format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(download_filename("My Cafe Menu", ExportFormat::Png), "my-cafe-menu.png");
        assert_eq!(slugify("Happy   Hour\tSpecials"), "happy-hour-specials");
    }

    #[test]
    fn empty_title_uses_default_name() {
        assert_eq!(download_filename("", ExportFormat::Jpeg), "qr-code.jpg");
        assert_eq!(slugify("   "), "qr-code");
    }

    #[test]
    fn format_parsing_accepts_both_jpeg_spellings() {
        assert_eq!("png".parse::<ExportFormat>().unwrap(), ExportFormat::Png);
        assert_eq!("JPG".parse::<ExportFormat>().unwrap(), ExportFormat::Jpeg);
        assert_eq!("jpeg".parse::<ExportFormat>().unwrap(), ExportFormat::Jpeg);
        assert!("gif".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn png_keeps_alpha() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 0]));
        let bytes = encode(&img, ExportFormat::Png).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded, img);
    }

    #[test]
    fn jpeg_flattens_transparency_to_white() {
        let mut img = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 0]));
        for x in 0..8 {
            for y in 0..16 {
                img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }

        let flat = flatten_onto_white(&img);
        assert_eq!(*flat.get_pixel(12, 4), image::Rgb([255, 255, 255]));
        assert_eq!(*flat.get_pixel(2, 4), image::Rgb([0, 0, 0]));

        let bytes = encode(&img, ExportFormat::Jpeg).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        let px = decoded.get_pixel(14, 8);
        assert!(px.0.iter().all(|&c| c > 245), "expected white, got {px:?}");
    }
}
