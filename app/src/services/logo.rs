//! Uploaded logo and its shape.

use std::sync::Arc;

use image::RgbaImage;
use qr_engine::{LogoOptions, LogoShape, QrRenderError, decode_data_url, decode_logo};
use serde::Serialize;

/// The logo embedded into the next generation, if any.
#[derive(Debug, Clone, Default)]
pub struct LogoState {
    image: Option<Arc<RgbaImage>>,
    shape: LogoShape,
}

/// JSON view of the logo state.
#[derive(Debug, Clone, Serialize)]
pub struct LogoView {
    pub has_logo: bool,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub shape: LogoShape,
}

impl LogoState {
    /// Replace the logo with an uploaded image file.
    ///
    /// Undecodable data clears the logo so generation continues without one.
    pub fn set_from_bytes(&mut self, bytes: &[u8]) -> Result<(), QrRenderError> {
        self.store(decode_logo(bytes))
    }

    /// Replace the logo with a `data:` URL.
    pub fn set_from_data_url(&mut self, url: &str) -> Result<(), QrRenderError> {
        self.store(decode_data_url(url))
    }

    fn store(&mut self, decoded: Result<RgbaImage, QrRenderError>) -> Result<(), QrRenderError> {
        match decoded {
            Ok(img) => {
                tracing::info!(width = img.width(), height = img.height(), "Logo updated");
                self.image = Some(Arc::new(img));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring logo that failed to decode");
                self.image = None;
                Err(e)
            }
        }
    }

    pub fn clear(&mut self) {
        self.image = None;
    }

    pub fn set_shape(&mut self, shape: LogoShape) {
        self.shape = shape;
    }

    pub fn shape(&self) -> LogoShape {
        self.shape
    }

    pub fn has_logo(&self) -> bool {
        self.image.is_some()
    }

    /// Render options for the current logo, or `None` when no logo is set.
    pub fn options(&self, margin: u32, size_ratio: f32) -> Option<LogoOptions> {
        self.image.as_ref().map(|image| LogoOptions {
            image: Arc::clone(image),
            shape: self.shape,
            margin,
            size_ratio,
        })
    }

    pub fn view(&self) -> LogoView {
        LogoView {
            has_logo: self.has_logo(),
            width: self.image.as_ref().map(|i| i.width()),
            height: self.image.as_ref().map(|i| i.height()),
            shape: self.shape,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 3, Rgba([9, 9, 9, 255])))
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn upload_sets_logo() {
        let mut logo = LogoState::default();
        logo.set_from_bytes(&png_bytes()).unwrap();
        assert!(logo.has_logo());
        let view = logo.view();
        assert_eq!((view.width, view.height), (Some(4), Some(3)));
    }

    #[test]
    fn undecodable_upload_clears_logo() {
        let mut logo = LogoState::default();
        logo.set_from_bytes(&png_bytes()).unwrap();
        let err = logo.set_from_bytes(b"garbage").unwrap_err();
        assert!(matches!(err, QrRenderError::InvalidImageData(_)));
        assert!(!logo.has_logo());
        assert!(logo.options(5, 0.4).is_none());
    }

    #[test]
    fn options_carry_shape_and_sizing() {
        let mut logo = LogoState::default();
        logo.set_from_bytes(&png_bytes()).unwrap();
        logo.set_shape(LogoShape::Diamond);
        let opts = logo.options(7, 0.3).unwrap();
        assert_eq!(opts.shape, LogoShape::Diamond);
        assert_eq!(opts.margin, 7);
        assert_eq!(opts.size_ratio, 0.3);
    }

    #[test]
    fn clear_keeps_shape() {
        let mut logo = LogoState::default();
        logo.set_from_bytes(&png_bytes()).unwrap();
        logo.set_shape(LogoShape::Round);
        logo.clear();
        assert!(!logo.has_logo());
        assert_eq!(logo.shape(), LogoShape::Round);
    }
}
