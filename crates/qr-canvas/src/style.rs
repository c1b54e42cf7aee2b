//! Per-render style parameters.

use image::Rgba;

/// Two-color gradient applied to the QR dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotGradient {
    pub start: Rgba<u8>,
    pub end: Rgba<u8>,
}

/// Colors, font and size for one render.
///
/// Rebuilt from the current form state on every regeneration.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleParameters {
    /// Side of the square QR bitmap in pixels.
    pub qr_size: u32,
    pub dots_color: Rgba<u8>,
    pub background_color: Rgba<u8>,
    pub border_color: Rgba<u8>,
    pub title_color: Rgba<u8>,
    pub tagline_color: Rgba<u8>,
    /// Font family name, resolved through a [`crate::FontLibrary`].
    pub font: String,
    pub use_gradient_dots: bool,
    pub dot_gradient: DotGradient,
}

impl Default for StyleParameters {
    fn default() -> Self {
        Self {
            qr_size: 250,
            dots_color: Rgba([0, 0, 0, 255]),
            background_color: Rgba([255, 255, 255, 255]),
            border_color: Rgba([0xe0, 0xe0, 0xe0, 255]),
            title_color: Rgba([0x33, 0x33, 0x33, 255]),
            tagline_color: Rgba([0x66, 0x66, 0x66, 255]),
            font: "Arial".into(),
            use_gradient_dots: false,
            dot_gradient: DotGradient {
                start: Rgba([0x66, 0x7e, 0xea, 255]),
                end: Rgba([0x76, 0x4b, 0xa2, 255]),
            },
        }
    }
}

impl StyleParameters {
    /// Builder: set the QR size.
    pub fn with_qr_size(mut self, size: u32) -> Self {
        self.qr_size = size;
        self
    }

    /// Builder: set the border color.
    pub fn with_border_color(mut self, color: Rgba<u8>) -> Self {
        self.border_color = color;
        self
    }
}
