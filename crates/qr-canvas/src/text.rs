//! Text drawing for card titles and taglines.
//!
//! Positions follow canvas conventions: sizes are em sizes in pixels and the
//! `y` coordinate names the alphabetic baseline.

use ab_glyph::{Font, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

/// Title font size (bold).
pub const TITLE_FONT_PX: f32 = 28.0;

/// Tagline font size.
pub const TAGLINE_FONT_PX: f32 = 16.0;

/// Scale for a font whose em square is `px` pixels tall.
///
/// `PxScale` measures ascent-to-descent height, so the em size is converted
/// through the face's units per em.
pub fn em_scale(font: &impl Font, px: f32) -> PxScale {
    let height = font.height_unscaled();
    match font.units_per_em() {
        Some(upem) if upem > 0.0 && height > 0.0 => PxScale::from(px * height / upem),
        _ => PxScale::from(px),
    }
}

/// Measure the advance width of a string at the given font and scale, kerning included.
pub fn measure_text_width(font: &impl Font, scale: PxScale, text: &str) -> f32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width
}

/// Draw `text` horizontally centered on `center_x` with its baseline at `baseline`.
pub fn draw_centered_text(
    img: &mut RgbaImage,
    font: &impl Font,
    scale: PxScale,
    center_x: f32,
    baseline: f32,
    text: &str,
    color: Rgba<u8>,
) {
    let width = measure_text_width(font, scale, text);
    let ascent = font.as_scaled(scale).ascent();
    let x = (center_x - width / 2.0).round() as i32;
    let y = (baseline - ascent).round() as i32;
    draw_text_mut(img, color, x, y, scale, font, text);
}
