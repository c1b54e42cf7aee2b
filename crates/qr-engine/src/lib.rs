//! Styled QR code rendering.
//!
//! Encodes a string into a QR symbol and draws it with configurable module
//! shapes, corner styles, a solid or gradient fill, and an optional embedded logo.

pub mod logo;
pub mod options;
pub mod qr;
pub mod resize;

use image::RgbaImage;

// Re-exports for convenience
pub use logo::{data_url_bytes, decode_data_url, decode_logo};
pub use options::{
    CornerDotShape, CornerSquareShape, DotFill, DotShape, LogoOptions, LogoShape, QrRenderOptions,
};
pub use qr::render_styled;

/// Errors that can occur while rendering a QR code.
#[derive(Debug, thiserror::Error)]
pub enum QrRenderError {
    #[error("QR encode error: {0}")]
    Encode(String),

    #[error("QR size {size}px is smaller than the symbol ({modules} modules)")]
    InvalidSize { size: u32, modules: u32 },

    #[error("Invalid image data: {0}")]
    InvalidImageData(String),
}

/// Result type alias for QR rendering.
pub type Result<T> = std::result::Result<T, QrRenderError>;

/// Produces a square QR bitmap from render options.
///
/// The generation pipeline treats implementations as opaque; rendering may be slow
/// and is run off the async executor.
pub trait QrRenderer: Send + Sync {
    fn render(&self, options: &QrRenderOptions) -> Result<RgbaImage>;
}

/// Default renderer backed by [`render_styled`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StyledRenderer;

impl QrRenderer for StyledRenderer {
    fn render(&self, options: &QrRenderOptions) -> Result<RgbaImage> {
        render_styled(options)
    }
}
