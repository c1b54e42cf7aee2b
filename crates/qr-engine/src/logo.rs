//! Logo decoding and placement.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::RgbaImage;
use qr_canvas::shapes::{Circle, Diamond, RoundedRect, apply_mask};
use tracing::debug;

use crate::options::{LogoOptions, LogoShape};
use crate::resize::fit_within;
use crate::{QrRenderError, Result};

/// Corner radius of a `rounded` logo, relative to its shorter side.
const ROUNDED_LOGO_RADIUS: f32 = 0.2;

/// Decode an uploaded logo (PNG, JPEG, GIF, WebP, ...) into RGBA.
pub fn decode_logo(bytes: &[u8]) -> Result<RgbaImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| QrRenderError::InvalidImageData(e.to_string()))?;
    debug!(width = img.width(), height = img.height(), "Decoded logo");
    Ok(img.to_rgba8())
}

/// Decode a `data:<mime>;base64,<payload>` URL into RGBA.
pub fn decode_data_url(url: &str) -> Result<RgbaImage> {
    decode_logo(&data_url_bytes(url)?)
}

/// Raw payload bytes of a base64 `data:` URL.
pub fn data_url_bytes(url: &str) -> Result<Vec<u8>> {
    let invalid = |msg: &str| QrRenderError::InvalidImageData(msg.to_string());

    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| invalid("not a data URL"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| invalid("data URL has no payload"))?;
    if !header.ends_with(";base64") {
        return Err(invalid("data URL is not base64 encoded"));
    }

    STANDARD
        .decode(payload.trim())
        .map_err(|e| QrRenderError::InvalidImageData(e.to_string()))
}

/// A logo scaled, masked and positioned inside a QR bitmap.
#[derive(Debug, Clone)]
pub struct PlacedLogo {
    pub image: RgbaImage,
    pub x: u32,
    pub y: u32,
    margin: u32,
}

impl PlacedLogo {
    /// Fit the logo into a centered box of `size_ratio × symbol_px` inside a
    /// `canvas_size` square bitmap and mask it by its shape.
    pub fn place(logo: &LogoOptions, canvas_size: u32, symbol_px: u32) -> Self {
        let box_side = ((symbol_px as f32) * logo.size_ratio.clamp(0.0, 1.0))
            .floor()
            .max(1.0) as u32;
        let mut image = fit_within(&logo.image, box_side, box_side);
        mask_logo(&mut image, logo.shape);

        let x = canvas_size.saturating_sub(image.width()) / 2;
        let y = canvas_size.saturating_sub(image.height()) / 2;
        debug!(
            width = image.width(),
            height = image.height(),
            x,
            y,
            shape = logo.shape.id(),
            "Placed logo"
        );

        Self {
            image,
            x,
            y,
            margin: logo.margin,
        }
    }

    /// Whether the pixel rectangle `[x, x + w) × [y, y + h)` touches the logo
    /// area grown by the margin.
    pub fn covers(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        let left = self.x.saturating_sub(self.margin);
        let top = self.y.saturating_sub(self.margin);
        let right = self.x + self.image.width() + self.margin;
        let bottom = self.y + self.image.height() + self.margin;
        x < right && x + w > left && y < bottom && y + h > top
    }
}

fn mask_logo(image: &mut RgbaImage, shape: LogoShape) {
    let (w, h) = (image.width() as f32, image.height() as f32);
    match shape {
        LogoShape::Square => {}
        LogoShape::Round => apply_mask(
            image,
            &Circle {
                cx: w / 2.0,
                cy: h / 2.0,
                radius: w.min(h) / 2.0,
            },
        ),
        LogoShape::Rounded => apply_mask(
            image,
            &RoundedRect::new(0.0, 0.0, w, h, w.min(h) * ROUNDED_LOGO_RADIUS),
        ),
        LogoShape::Diamond => apply_mask(
            image,
            &Diamond {
                x: 0.0,
                y: 0.0,
                width: w,
                height: h,
            },
        ),
    }
}
