//! Hex color parsing.

use image::Rgba;

use crate::{CanvasError, Result};

/// Opaque white, used for the card and JPEG flattening.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` into an RGBA color.
///
/// The leading `#` is optional.
pub fn parse_hex_color(s: &str) -> Result<Rgba<u8>> {
    let hex = s.trim().trim_start_matches('#');
    let invalid = || CanvasError::InvalidColor(s.to_string());

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

    match hex.len() {
        3 => {
            let mut out = [255u8; 4];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16).ok_or_else(invalid)? as u8;
                out[i] = v * 17;
            }
            Ok(Rgba(out))
        }
        6 => Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, 255])),
        8 => Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, channel(6)?])),
        _ => Err(invalid()),
    }
}

/// Format a color as lowercase `#rrggbb`, dropping alpha.
pub fn to_hex(color: Rgba<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

/// Source-over blend of `fg` onto `bg`, with `coverage` scaling the foreground alpha.
pub fn blend(bg: Rgba<u8>, fg: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let fa = (f32::from(fg[3]) / 255.0) * coverage.clamp(0.0, 1.0);
    if fa <= 0.0 {
        return bg;
    }
    let ba = f32::from(bg[3]) / 255.0;
    let out_a = fa + ba * (1.0 - fa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mix = |f: u8, b: u8| -> u8 {
        let v = (f32::from(f) * fa + f32::from(b) * ba * (1.0 - fa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        mix(fg[0], bg[0]),
        mix(fg[1], bg[1]),
        mix(fg[2], bg[2]),
        (out_a * 255.0).round() as u8,
    ])
}
