//! Card compositing for styled QR codes.
//!
//! Draws the gradient background, the rounded white card, title/tagline text
//! and the QR bitmap into one RGBA canvas, and encodes the result for download.

pub mod color;
pub mod compose;
pub mod export;
pub mod fonts;
pub mod gradient;
pub mod instruction;
pub mod shapes;
pub mod style;
pub mod text;

// Re-exports for convenience
pub use color::parse_hex_color;
pub use compose::{CardLayout, CardText, compose};
pub use export::{ExportFormat, download_filename, encode, slugify};
pub use fonts::FontLibrary;
pub use gradient::{BackgroundGradient, GradientStop, LinearGradient};
pub use instruction::scan_instruction;
pub use style::{DotGradient, StyleParameters};

/// Horizontal and vertical padding between the canvas edge and the QR bitmap.
pub const CANVAS_PADDING: u32 = 40;

/// Inset of the white card from the canvas edge.
pub const CARD_INSET: u32 = 20;

/// Corner radius of the white card.
pub const CARD_RADIUS: f32 = 20.0;

/// Line width of the card border.
pub const BORDER_WIDTH: f32 = 2.0;

/// Vertical space reserved for a title.
pub const TITLE_HEIGHT: u32 = 50;

/// Vertical space reserved for a tagline.
pub const TAGLINE_HEIGHT: u32 = 30;

/// Errors raised while compositing or exporting a card.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("QR bitmap is not available yet")]
    MissingSourceBitmap,

    #[error("Background gradient needs at least 2 colors, got {0}")]
    GradientTooShort(usize),

    #[error("Invalid font data: {0}")]
    InvalidFont(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    #[error("Image export failed: {0}")]
    ExportFailure(String),
}

/// Result type alias for canvas operations.
pub type Result<T> = std::result::Result<T, CanvasError>;
