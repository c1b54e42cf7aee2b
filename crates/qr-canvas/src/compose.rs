//! Card composition: gradient background, white card, text and QR bitmap.

use image::imageops::FilterType;
use image::{RgbaImage, imageops};
use tracing::{debug, warn};

use crate::color::{WHITE, blend};
use crate::fonts::FontLibrary;
use crate::gradient::BackgroundGradient;
use crate::shapes::{Paint, RoundedRect, fill_shape, stroke_shape};
use crate::style::StyleParameters;
use crate::text::{TAGLINE_FONT_PX, TITLE_FONT_PX, draw_centered_text, em_scale};
use crate::{
    BORDER_WIDTH, CANVAS_PADDING, CARD_INSET, CARD_RADIUS, CanvasError, Result, TAGLINE_HEIGHT,
    TITLE_HEIGHT,
};

/// Offset of the text cursor below the top edge of the card.
const CURSOR_OFFSET: u32 = 25;

/// Title baseline below the cursor.
const TITLE_BASELINE: f32 = 25.0;

/// Tagline baseline below the cursor.
const TAGLINE_BASELINE: f32 = 15.0;

/// Optional title and tagline. Empty or whitespace-only strings count as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardText<'a> {
    title: Option<&'a str>,
    tagline: Option<&'a str>,
}

impl<'a> CardText<'a> {
    pub fn new(title: &'a str, tagline: &'a str) -> Self {
        Self {
            title: Some(title).filter(|t| !t.trim().is_empty()),
            tagline: Some(tagline).filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn title(&self) -> Option<&'a str> {
        self.title
    }

    pub fn tagline(&self) -> Option<&'a str> {
        self.tagline
    }
}

/// Geometry of a composed card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub title_height: u32,
    pub tagline_height: u32,
    pub title_baseline: Option<f32>,
    pub tagline_baseline: Option<f32>,
    pub qr_x: u32,
    pub qr_y: u32,
}

impl CardLayout {
    /// Lay out a card around a `qr_size` square bitmap.
    pub fn compute(qr_size: u32, text: &CardText<'_>) -> Self {
        let title_height = if text.title.is_some() { TITLE_HEIGHT } else { 0 };
        let tagline_height = if text.tagline.is_some() {
            TAGLINE_HEIGHT
        } else {
            0
        };

        let canvas_width = qr_size + CANVAS_PADDING * 2;
        let canvas_height = qr_size + CANVAS_PADDING * 2 + title_height + tagline_height;

        let mut cursor = CARD_INSET + CURSOR_OFFSET;

        let title_baseline = text.title.map(|_| cursor as f32 + TITLE_BASELINE);
        cursor += title_height;

        let tagline_baseline = text.tagline.map(|_| cursor as f32 + TAGLINE_BASELINE);
        cursor += tagline_height;

        Self {
            canvas_width,
            canvas_height,
            title_height,
            tagline_height,
            title_baseline,
            tagline_baseline,
            qr_x: (canvas_width - qr_size) / 2,
            qr_y: cursor,
        }
    }

    /// The card outline, inset from the canvas edges.
    pub fn card(&self) -> RoundedRect {
        RoundedRect::new(
            CARD_INSET as f32,
            CARD_INSET as f32,
            self.canvas_width.saturating_sub(CARD_INSET * 2) as f32,
            self.canvas_height.saturating_sub(CARD_INSET * 2) as f32,
            CARD_RADIUS,
        )
    }
}

/// Compose the final card image.
///
/// Pure function of its inputs: identical arguments produce identical pixels.
/// Fails only when no QR bitmap is available yet.
pub fn compose(
    qr: Option<&RgbaImage>,
    style: &StyleParameters,
    gradient: &BackgroundGradient,
    text: &CardText<'_>,
    fonts: &FontLibrary,
) -> Result<RgbaImage> {
    let qr = qr.ok_or(CanvasError::MissingSourceBitmap)?;
    let layout = CardLayout::compute(style.qr_size, text);

    debug!(
        width = layout.canvas_width,
        height = layout.canvas_height,
        qr_x = layout.qr_x,
        qr_y = layout.qr_y,
        "Composing card"
    );

    let mut canvas = RgbaImage::new(layout.canvas_width, layout.canvas_height);
    gradient
        .diagonal(layout.canvas_width, layout.canvas_height)
        .fill(&mut canvas);

    let card = layout.card();
    fill_shape(&mut canvas, &card, Paint::Solid(WHITE));
    stroke_shape(&mut canvas, &card, BORDER_WIDTH, Paint::Solid(style.border_color));

    let center_x = layout.canvas_width as f32 / 2.0;

    if let (Some(title), Some(baseline)) = (text.title, layout.title_baseline) {
        match fonts.resolve(&style.font, true) {
            Some(font) => {
                let scale = em_scale(font, TITLE_FONT_PX);
                draw_centered_text(&mut canvas, font, scale, center_x, baseline, title, style.title_color);
            }
            None => warn!(font = %style.font, "No font available, title left blank"),
        }
    }

    if let (Some(tagline), Some(baseline)) = (text.tagline, layout.tagline_baseline) {
        match fonts.resolve(&style.font, false) {
            Some(font) => {
                let scale = em_scale(font, TAGLINE_FONT_PX);
                draw_centered_text(&mut canvas, font, scale, center_x, baseline, tagline, style.tagline_color);
            }
            None => warn!(font = %style.font, "No font available, tagline left blank"),
        }
    }

    if qr.dimensions() == (style.qr_size, style.qr_size) {
        overlay(&mut canvas, qr, layout.qr_x, layout.qr_y);
    } else {
        debug!(
            width = qr.width(),
            height = qr.height(),
            target = style.qr_size,
            "QR bitmap size differs from configured size, resizing"
        );
        let resized = imageops::resize(qr, style.qr_size, style.qr_size, FilterType::Nearest);
        overlay(&mut canvas, &resized, layout.qr_x, layout.qr_y);
    }

    Ok(canvas)
}

/// Overlay `top` image onto `base` at the given position.
///
/// The `top` image is alpha-composited over the base; pixels outside the base are dropped.
pub fn overlay(base: &mut RgbaImage, top: &RgbaImage, x: u32, y: u32) {
    for (dx, dy, pixel) in top.enumerate_pixels() {
        let target_x = x + dx;
        let target_y = y + dy;
        if target_x < base.width() && target_y < base.height() {
            if pixel[3] == 255 {
                base.put_pixel(target_x, target_y, *pixel);
            } else if pixel[3] > 0 {
                let bg = *base.get_pixel(target_x, target_y);
                base.put_pixel(target_x, target_y, blend(bg, *pixel, 1.0));
            }
        }
    }
}

#[cfg(test)]
mod tests;
