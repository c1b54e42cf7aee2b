//! Render options for styled QR codes.

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use serde::Serialize;

/// Default gap in pixels between the logo and the nearest visible dot.
pub const DEFAULT_LOGO_MARGIN: u32 = 5;

/// Default logo size as a fraction of the symbol side.
pub const DEFAULT_LOGO_SIZE: f32 = 0.4;

/// Rotation of the dot gradient, in degrees.
pub const DOT_GRADIENT_ROTATION: f32 = 45.0;

/// Declares a shape enum identified by kebab-case ids.
///
/// Unknown ids deserialize to the first (square) variant.
macro_rules! shape_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $id:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, serde::Deserialize)]
        #[serde(from = "String")]
        pub enum $name {
            #[default]
            $(#[serde(rename = $id)] $variant),+
        }

        impl $name {
            /// All variants, in picker order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn id(self) -> &'static str {
                match self {
                    $($name::$variant => $id),+
                }
            }

            /// Parse an id, falling back to the default shape for unknown ids.
            pub fn from_id(id: &str) -> Self {
                match id {
                    $($id => $name::$variant,)+
                    _ => $name::default(),
                }
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self::from_id(&id)
            }
        }
    };
}

shape_enum!(
    /// Shape of ordinary data modules.
    DotShape {
        Square => "square",
        Dots => "dots",
        Rounded => "rounded",
        ExtraRounded => "extra-rounded",
        Classy => "classy",
        ClassyRounded => "classy-rounded",
    }
);

shape_enum!(
    /// Shape of the outer 7×7 ring of each finder pattern.
    CornerSquareShape {
        Square => "square",
        Dot => "dot",
        ExtraRounded => "extra-rounded",
    }
);

shape_enum!(
    /// Shape of the inner 3×3 block of each finder pattern.
    CornerDotShape {
        Square => "square",
        Dot => "dot",
    }
);

shape_enum!(
    /// Mask applied to an embedded logo.
    LogoShape {
        Square => "square",
        Round => "round",
        Rounded => "rounded",
        Diamond => "diamond",
    }
);

/// How data modules are colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DotFill {
    Solid(Rgba<u8>),
    /// Linear gradient across the symbol, rotated by `rotation` degrees.
    Gradient {
        start: Rgba<u8>,
        end: Rgba<u8>,
        rotation: f32,
    },
}

/// Logo embedded at the center of the symbol.
#[derive(Debug, Clone)]
pub struct LogoOptions {
    pub image: Arc<RgbaImage>,
    pub shape: LogoShape,
    /// Clearance around the logo where dots are hidden, in pixels.
    pub margin: u32,
    /// Logo box side as a fraction of the symbol side.
    pub size_ratio: f32,
}

impl LogoOptions {
    pub fn new(image: Arc<RgbaImage>) -> Self {
        Self {
            image,
            shape: LogoShape::Square,
            margin: DEFAULT_LOGO_MARGIN,
            size_ratio: DEFAULT_LOGO_SIZE,
        }
    }
}

/// Everything the renderer needs to draw one QR bitmap.
#[derive(Debug, Clone)]
pub struct QrRenderOptions {
    /// Encoded payload, usually a URL.
    pub data: String,
    /// Side of the output bitmap in pixels.
    pub size: u32,
    pub dot_shape: DotShape,
    pub dot_fill: DotFill,
    pub background: Rgba<u8>,
    pub corner_square_shape: CornerSquareShape,
    pub corner_square_color: Rgba<u8>,
    pub corner_dot_shape: CornerDotShape,
    pub corner_dot_color: Rgba<u8>,
    pub logo: Option<LogoOptions>,
}

impl QrRenderOptions {
    /// Black square modules on white, no logo.
    pub fn new(data: impl Into<String>, size: u32) -> Self {
        let black = Rgba([0, 0, 0, 255]);
        Self {
            data: data.into(),
            size,
            dot_shape: DotShape::Square,
            dot_fill: DotFill::Solid(black),
            background: Rgba([255, 255, 255, 255]),
            corner_square_shape: CornerSquareShape::Square,
            corner_square_color: black,
            corner_dot_shape: CornerDotShape::Square,
            corner_dot_color: black,
            logo: None,
        }
    }

    /// Builder: set the data module shape.
    pub fn with_dot_shape(mut self, shape: DotShape) -> Self {
        self.dot_shape = shape;
        self
    }

    /// Builder: set the data module fill.
    pub fn with_dot_fill(mut self, fill: DotFill) -> Self {
        self.dot_fill = fill;
        self
    }

    /// Builder: set the background color.
    pub fn with_background(mut self, color: Rgba<u8>) -> Self {
        self.background = color;
        self
    }

    /// Builder: set the finder ring style.
    pub fn with_corner_square(mut self, shape: CornerSquareShape, color: Rgba<u8>) -> Self {
        self.corner_square_shape = shape;
        self.corner_square_color = color;
        self
    }

    /// Builder: set the finder center style.
    pub fn with_corner_dot(mut self, shape: CornerDotShape, color: Rgba<u8>) -> Self {
        self.corner_dot_shape = shape;
        self.corner_dot_color = color;
        self
    }

    /// Builder: embed a logo.
    pub fn with_logo(mut self, logo: LogoOptions) -> Self {
        self.logo = Some(logo);
        self
    }
}
