//! "How to scan" illustration: a phone pointed at a QR code.

use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

use crate::color::WHITE;
use crate::fonts::FontLibrary;
use crate::gradient::BackgroundGradient;
use crate::shapes::{Paint, RoundedRect, fill_shape, stroke_shape};
use crate::text::{draw_centered_text, em_scale};

pub const SCAN_INSTRUCTION_WIDTH: u32 = 400;
pub const SCAN_INSTRUCTION_HEIGHT: u32 = 280;

const GRADIENT_START: Rgba<u8> = Rgba([0x66, 0x7e, 0xea, 255]);
const GRADIENT_END: Rgba<u8> = Rgba([0x76, 0x4b, 0xa2, 255]);
const INK: Rgba<u8> = Rgba([0x33, 0x33, 0x33, 255]);
const BRACKET: Rgba<u8> = Rgba([0x11, 0x99, 0x8e, 255]);
const POPUP: Rgba<u8> = Rgba([255, 255, 255, 242]);

const FONT_FAMILY: &str = "Arial";
const CAPTION: &str = "Point Camera at QR Code";
const POPUP_TEXT: &str = "Open Link";

/// Viewfinder corner brackets, each drawn as two legs through three points.
const BRACKETS: [[(f32, f32); 3]; 4] = [
    [(168.0, 95.0), (168.0, 80.0), (183.0, 80.0)],
    [(217.0, 80.0), (232.0, 80.0), (232.0, 95.0)],
    [(168.0, 129.0), (168.0, 144.0), (183.0, 144.0)],
    [(217.0, 144.0), (232.0, 144.0), (232.0, 129.0)],
];

/// Dark cells of the 5×5 mini QR, one row per byte, leftmost column in bit 4.
const MINI_QR: [u8; 5] = [0b11101, 0b10111, 0b01110, 0b11011, 0b10101];

/// Draw the scan-instruction illustration.
///
/// Output depends only on the available fonts. Text is skipped when no face resolves.
pub fn scan_instruction(fonts: &FontLibrary) -> RgbaImage {
    let (w, h) = (SCAN_INSTRUCTION_WIDTH, SCAN_INSTRUCTION_HEIGHT);
    debug!(width = w, height = h, "Drawing scan instruction");

    let mut img = RgbaImage::new(w, h);
    BackgroundGradient::two_color(GRADIENT_START, GRADIENT_END)
        .diagonal(w, h)
        .fill(&mut img);

    // Phone body and screen
    fill_shape(&mut img, &RoundedRect::new(140.0, 30.0, 120.0, 200.0, 15.0), Paint::Solid(INK));
    fill_shape(&mut img, &RoundedRect::new(148.0, 50.0, 104.0, 160.0, 5.0), Paint::Solid(WHITE));

    // Viewfinder
    stroke_shape(
        &mut img,
        &RoundedRect::new(168.0, 80.0, 64.0, 64.0, 0.0),
        3.0,
        Paint::Solid(GRADIENT_START),
    );
    for [a, corner, b] in BRACKETS {
        for (from, to) in [(a, corner), (corner, b)] {
            fill_shape(&mut img, &line(from, to, 4.0), Paint::Solid(BRACKET));
        }
    }

    for (row, &bits) in MINI_QR.iter().enumerate() {
        for col in 0..5 {
            if bits >> (4 - col) & 1 == 1 {
                let cell = RoundedRect::new(
                    178.0 + col as f32 * 9.0,
                    90.0 + row as f32 * 9.0,
                    7.0,
                    7.0,
                    0.0,
                );
                fill_shape(&mut img, &cell, Paint::Solid(INK));
            }
        }
    }

    fill_shape(&mut img, &RoundedRect::new(155.0, 160.0, 90.0, 35.0, 8.0), Paint::Solid(POPUP));

    match fonts.resolve(FONT_FAMILY, true) {
        Some(font) => {
            draw_centered_text(&mut img, font, em_scale(font, 10.0), 200.0, 182.0, POPUP_TEXT, INK);
            draw_centered_text(&mut img, font, em_scale(font, 16.0), 200.0, 260.0, CAPTION, WHITE);
        }
        None => warn!("No font available, scan instruction drawn without text"),
    }

    img
}

/// Axis-aligned line of `width` between two points, with square caps.
fn line(from: (f32, f32), to: (f32, f32), width: f32) -> RoundedRect {
    let half = width / 2.0;
    RoundedRect::new(
        from.0.min(to.0) - half,
        from.1.min(to.1) - half,
        (from.0 - to.0).abs() + width,
        (from.1 - to.1).abs() + width,
        0.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_match_the_illustration() {
        let img = scan_instruction(&FontLibrary::new());
        assert_eq!(img.dimensions(), (400, 280));
    }

    #[test]
    fn drawing_is_deterministic() {
        let a = scan_instruction(&FontLibrary::new());
        let b = scan_instruction(&FontLibrary::new());
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn phone_viewfinder_and_mini_qr_are_drawn() {
        let img = scan_instruction(&FontLibrary::new());
        assert_eq!(*img.get_pixel(144, 120), INK);
        assert_eq!(*img.get_pixel(160, 60), WHITE);
        assert_eq!(*img.get_pixel(167, 110), GRADIENT_START);
        assert_eq!(*img.get_pixel(168, 85), BRACKET);
        // Top-left mini QR cell is dark, the fourth cell of that row is blank
        assert_eq!(*img.get_pixel(180, 92), INK);
        assert_eq!(*img.get_pixel(207, 92), WHITE);
    }

    #[test]
    fn background_runs_across_the_gradient() {
        let img = scan_instruction(&FontLibrary::new());
        let top_left = img.get_pixel(1, 1);
        let bottom_right = img.get_pixel(398, 278);
        assert!(top_left[0] < bottom_right[0]);
        assert!(top_left[2] > bottom_right[2]);
    }
}
