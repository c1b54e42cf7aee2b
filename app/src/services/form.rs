//! Form state: everything a user edits between generations.

use image::Rgba;
use qr_canvas::{DotGradient, StyleParameters, parse_hex_color};
use qr_engine::options::DOT_GRADIENT_ROTATION;
use qr_engine::{CornerDotShape, CornerSquareShape, DotFill, DotShape, LogoOptions, QrRenderOptions};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Invalid color for {field}: {value}")]
    InvalidColor { field: &'static str, value: String },
    #[error("QR size {size} must be between {min} and {max}")]
    SizeOutOfRange { size: u32, min: u32, max: u32 },
    #[error("Unknown gradient preset: {0}")]
    UnknownPreset(usize),
}

/// Current form values. Colors are kept as validated hex strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormState {
    pub url: String,
    pub title: String,
    pub tagline: String,
    pub size: u32,
    pub dots_color: String,
    pub background_color: String,
    pub border_color: String,
    pub title_color: String,
    pub tagline_color: String,
    pub font: String,
    pub dot_shape: DotShape,
    pub corner_square_shape: CornerSquareShape,
    pub corner_dot_shape: CornerDotShape,
    pub use_gradient_dots: bool,
    pub gradient_start: String,
    pub gradient_end: String,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormPatch {
    pub url: Option<String>,
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub size: Option<u32>,
    pub dots_color: Option<String>,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    pub title_color: Option<String>,
    pub tagline_color: Option<String>,
    pub font: Option<String>,
    pub dot_shape: Option<DotShape>,
    pub corner_square_shape: Option<CornerSquareShape>,
    pub corner_dot_shape: Option<CornerDotShape>,
    pub use_gradient_dots: Option<bool>,
    pub gradient_start: Option<String>,
    pub gradient_end: Option<String>,
}

impl FormState {
    /// Initial form values.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            url: String::new(),
            title: String::new(),
            tagline: String::new(),
            size: config.default_size,
            dots_color: "#000000".into(),
            background_color: "#ffffff".into(),
            border_color: "#e0e0e0".into(),
            title_color: "#333333".into(),
            tagline_color: "#666666".into(),
            font: "Arial".into(),
            dot_shape: DotShape::Square,
            corner_square_shape: CornerSquareShape::Square,
            corner_dot_shape: CornerDotShape::Square,
            use_gradient_dots: false,
            gradient_start: "#667eea".into(),
            gradient_end: "#764ba2".into(),
        }
    }

    /// Validate and apply a patch. Nothing changes if any field is rejected.
    pub fn apply(&mut self, patch: FormPatch, config: &AppConfig) -> Result<(), FormError> {
        if let Some(size) = patch.size {
            if !(config.min_size..=config.max_size).contains(&size) {
                return Err(FormError::SizeOutOfRange {
                    size,
                    min: config.min_size,
                    max: config.max_size,
                });
            }
        }
        let colors = [
            ("dots_color", &patch.dots_color),
            ("background_color", &patch.background_color),
            ("border_color", &patch.border_color),
            ("title_color", &patch.title_color),
            ("tagline_color", &patch.tagline_color),
            ("gradient_start", &patch.gradient_start),
            ("gradient_end", &patch.gradient_end),
        ];
        for (field, value) in colors {
            if let Some(v) = value {
                color(field, v)?;
            }
        }

        let FormPatch {
            url,
            title,
            tagline,
            size,
            dots_color,
            background_color,
            border_color,
            title_color,
            tagline_color,
            font,
            dot_shape,
            corner_square_shape,
            corner_dot_shape,
            use_gradient_dots,
            gradient_start,
            gradient_end,
        } = patch;

        set(&mut self.url, url.map(|u| u.trim().to_string()));
        set(&mut self.title, title);
        set(&mut self.tagline, tagline);
        set(&mut self.size, size);
        set(&mut self.dots_color, dots_color);
        set(&mut self.background_color, background_color);
        set(&mut self.border_color, border_color);
        set(&mut self.title_color, title_color);
        set(&mut self.tagline_color, tagline_color);
        set(&mut self.font, font.filter(|f| !f.trim().is_empty()));
        set(&mut self.dot_shape, dot_shape);
        set(&mut self.corner_square_shape, corner_square_shape);
        set(&mut self.corner_dot_shape, corner_dot_shape);
        set(&mut self.use_gradient_dots, use_gradient_dots);
        set(&mut self.gradient_start, gradient_start);
        set(&mut self.gradient_end, gradient_end);
        Ok(())
    }

    /// Pull the size back inside the configured bounds. Returns true if it moved.
    pub fn clamp_size(&mut self, config: &AppConfig) -> bool {
        let clamped = self.size.clamp(config.min_size, config.max_size);
        let moved = clamped != self.size;
        self.size = clamped;
        moved
    }

    /// Compositor parameters for the current values.
    pub fn style(&self) -> Result<StyleParameters, FormError> {
        Ok(StyleParameters {
            qr_size: self.size,
            dots_color: color("dots_color", &self.dots_color)?,
            background_color: color("background_color", &self.background_color)?,
            border_color: color("border_color", &self.border_color)?,
            title_color: color("title_color", &self.title_color)?,
            tagline_color: color("tagline_color", &self.tagline_color)?,
            font: self.font.clone(),
            use_gradient_dots: self.use_gradient_dots,
            dot_gradient: DotGradient {
                start: color("gradient_start", &self.gradient_start)?,
                end: color("gradient_end", &self.gradient_end)?,
            },
        })
    }

    /// Renderer options. Finder patterns share the dot color.
    pub fn render_options(
        &self,
        style: &StyleParameters,
        default_url: &str,
        logo: Option<LogoOptions>,
    ) -> QrRenderOptions {
        let data = if self.url.is_empty() { default_url } else { self.url.as_str() };
        let fill = if style.use_gradient_dots {
            DotFill::Gradient {
                start: style.dot_gradient.start,
                end: style.dot_gradient.end,
                rotation: DOT_GRADIENT_ROTATION,
            }
        } else {
            DotFill::Solid(style.dots_color)
        };

        let opts = QrRenderOptions::new(data, style.qr_size)
            .with_dot_shape(self.dot_shape)
            .with_dot_fill(fill)
            .with_background(style.background_color)
            .with_corner_square(self.corner_square_shape, style.dots_color)
            .with_corner_dot(self.corner_dot_shape, style.dots_color);
        match logo {
            Some(logo) => opts.with_logo(logo),
            None => opts,
        }
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

fn color(field: &'static str, value: &str) -> Result<Rgba<u8>, FormError> {
    parse_hex_color(value).map_err(|_| FormError::InvalidColor {
        field,
        value: value.to_string(),
    })
}
