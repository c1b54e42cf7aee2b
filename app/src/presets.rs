//! Gradient presets, preset dot colors and font options offered to clients.

use qr_canvas::{BackgroundGradient, parse_hex_color};
use serde::Serialize;

/// A named background gradient.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GradientPreset {
    pub name: &'static str,
    pub colors: &'static [&'static str],
}

impl GradientPreset {
    /// Parse the preset colors into a background gradient.
    pub fn gradient(&self) -> qr_canvas::Result<BackgroundGradient> {
        let colors = self
            .colors
            .iter()
            .map(|c| parse_hex_color(c))
            .collect::<qr_canvas::Result<Vec<_>>>()?;
        BackgroundGradient::new(colors)
    }
}

pub const GRADIENT_PRESETS: &[GradientPreset] = &[
    GradientPreset {
        name: "Instagram",
        colors: &["#f09433", "#e6683c", "#dc2743", "#cc2366", "#bc1888"],
    },
    GradientPreset { name: "Sunset", colors: &["#ff512f", "#f09819"] },
    GradientPreset { name: "Purple Dream", colors: &["#667eea", "#764ba2"] },
    GradientPreset { name: "Ocean Blue", colors: &["#2193b0", "#6dd5ed"] },
    GradientPreset { name: "Emerald", colors: &["#11998e", "#38ef7d"] },
    GradientPreset { name: "Rose Gold", colors: &["#f4c4f3", "#fc67fa"] },
    GradientPreset { name: "Midnight", colors: &["#232526", "#414345"] },
    GradientPreset { name: "Fire", colors: &["#f12711", "#f5af19"] },
    GradientPreset { name: "Cool Blues", colors: &["#2193b0", "#6dd5ed"] },
    GradientPreset { name: "Mango", colors: &["#ffe259", "#ffa751"] },
    GradientPreset { name: "Cherry", colors: &["#eb3349", "#f45c43"] },
    GradientPreset { name: "Peachy", colors: &["#ed6ea0", "#ec8c69"] },
];

/// Quick-pick colors for the QR dots.
pub const PRESET_COLORS: &[&str] = &[
    "#000000", "#667eea", "#11998e", "#f953c6", "#ff6b6b", "#4834d4", "#00b894", "#e17055",
];

/// A font choice: display name and the family used for rendering.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FontOption {
    pub name: &'static str,
    pub family: &'static str,
}

pub const FONT_OPTIONS: &[FontOption] = &[
    FontOption { name: "Arial", family: "Arial" },
    FontOption { name: "Georgia", family: "Georgia" },
    FontOption { name: "Courier", family: "Courier New" },
    FontOption { name: "Verdana", family: "Verdana" },
    FontOption { name: "Impact", family: "Impact" },
];

/// Look up a preset by index.
pub fn preset(index: usize) -> Option<&'static GradientPreset> {
    GRADIENT_PRESETS.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_parses() {
        for preset in GRADIENT_PRESETS {
            let gradient = preset.gradient().unwrap();
            assert_eq!(gradient.colors().len(), preset.colors.len(), "{}", preset.name);
        }
    }

    #[test]
    fn instagram_is_the_five_color_default() {
        let first = preset(0).unwrap();
        assert_eq!(first.name, "Instagram");
        assert_eq!(first.colors.len(), 5);
        assert_eq!(GRADIENT_PRESETS.len(), 12);
        assert!(GRADIENT_PRESETS[1..].iter().all(|p| p.colors.len() == 2));
    }

    #[test]
    fn preset_colors_are_valid_hex() {
        for color in PRESET_COLORS {
            assert!(parse_hex_color(color).is_ok(), "{color}");
        }
    }

    #[test]
    fn out_of_range_preset_is_none() {
        assert!(preset(12).is_none());
    }
}
