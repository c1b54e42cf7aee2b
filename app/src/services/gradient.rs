//! Background gradient selection: a preset or a custom two-color gradient.

use image::Rgba;
use qr_canvas::color::to_hex;
use qr_canvas::{BackgroundGradient, parse_hex_color};
use serde::Serialize;

use crate::presets::{self, GRADIENT_PRESETS};

use super::form::FormError;

const CUSTOM_START: Rgba<u8> = Rgba([0xf0, 0x94, 0x33, 255]);
const CUSTOM_END: Rgba<u8> = Rgba([0xbc, 0x18, 0x88, 255]);

/// Which background gradient the next generation uses.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSelection {
    preset_index: usize,
    use_custom: bool,
    custom_start: Rgba<u8>,
    custom_end: Rgba<u8>,
}

/// JSON view of the selection.
#[derive(Debug, Clone, Serialize)]
pub struct GradientView {
    pub preset_index: Option<usize>,
    pub use_custom: bool,
    pub custom_start: String,
    pub custom_end: String,
    pub colors: Vec<String>,
    pub css: String,
}

impl Default for GradientSelection {
    fn default() -> Self {
        Self {
            preset_index: 0,
            use_custom: false,
            custom_start: CUSTOM_START,
            custom_end: CUSTOM_END,
        }
    }
}

impl GradientSelection {
    /// Select a preset; this turns the custom gradient off.
    pub fn select_preset(&mut self, index: usize) -> Result<(), FormError> {
        if presets::preset(index).is_none() {
            return Err(FormError::UnknownPreset(index));
        }
        self.preset_index = index;
        self.use_custom = false;
        Ok(())
    }

    /// Toggle the custom gradient and optionally update its colors.
    pub fn set_custom(
        &mut self,
        enabled: bool,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<(), FormError> {
        let start = start
            .map(|s| parse_field("custom_start", s))
            .transpose()?;
        let end = end.map(|s| parse_field("custom_end", s)).transpose()?;

        self.use_custom = enabled;
        if let Some(c) = start {
            self.custom_start = c;
        }
        if let Some(c) = end {
            self.custom_end = c;
        }
        Ok(())
    }

    /// Preset index, or `None` while the custom gradient is active.
    pub fn active_preset(&self) -> Option<usize> {
        (!self.use_custom).then_some(self.preset_index)
    }

    /// The gradient to paint behind the card.
    pub fn current(&self) -> BackgroundGradient {
        if self.use_custom {
            return BackgroundGradient::two_color(self.custom_start, self.custom_end);
        }
        GRADIENT_PRESETS
            .get(self.preset_index)
            .and_then(|p| p.gradient().ok())
            .unwrap_or_else(|| BackgroundGradient::two_color(CUSTOM_START, CUSTOM_END))
    }

    pub fn view(&self) -> GradientView {
        let current = self.current();
        GradientView {
            preset_index: self.active_preset(),
            use_custom: self.use_custom,
            custom_start: to_hex(self.custom_start),
            custom_end: to_hex(self.custom_end),
            colors: current.colors().iter().map(|c| to_hex(*c)).collect(),
            css: current.css(),
        }
    }
}

fn parse_field(field: &'static str, value: &str) -> Result<Rgba<u8>, FormError> {
    parse_hex_color(value).map_err(|_| FormError::InvalidColor {
        field,
        value: value.to_string(),
    })
}
