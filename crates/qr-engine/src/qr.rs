//! Styled QR code drawing.

use image::RgbaImage;
use qr_canvas::compose::overlay;
use qr_canvas::gradient::{BackgroundGradient, LinearGradient};
use qr_canvas::shapes::{Circle, CornerRadii, Paint, Ring, RoundedRect, fill_shape};
use qrcode::{EcLevel, QrCode};
use tracing::debug;

use crate::logo::PlacedLogo;
use crate::options::{CornerDotShape, CornerSquareShape, DotFill, DotShape, QrRenderOptions};
use crate::{QrRenderError, Result};

/// Side of a finder pattern in modules.
const FINDER: usize = 7;

/// Dark-module grid of an encoded symbol.
struct Matrix {
    width: usize,
    dark: Vec<bool>,
}

impl Matrix {
    fn encode(data: &str, ec: EcLevel) -> Result<Self> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), ec)
            .map_err(|e| QrRenderError::Encode(e.to_string()))?;
        let dark = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();
        Ok(Self {
            width: code.width(),
            dark,
        })
    }

    fn is_dark(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.width {
            return false;
        }
        self.dark[y as usize * self.width + x as usize]
    }

    fn in_finder(&self, x: usize, y: usize) -> bool {
        let far = self.width - FINDER;
        (x < FINDER && y < FINDER) || (x >= far && y < FINDER) || (x < FINDER && y >= far)
    }
}

/// Which of the four edge-adjacent modules are drawn dots.
#[derive(Debug, Clone, Copy, Default)]
struct Neighbours {
    top: bool,
    right: bool,
    bottom: bool,
    left: bool,
}

/// Render a QR bitmap of exactly `options.size` pixels square.
pub fn render_styled(options: &QrRenderOptions) -> Result<RgbaImage> {
    let ec = if options.logo.is_some() {
        EcLevel::H
    } else {
        EcLevel::Q
    };
    let matrix = Matrix::encode(&options.data, ec)?;
    let modules = matrix.width as u32;

    if options.size < modules {
        return Err(QrRenderError::InvalidSize {
            size: options.size,
            modules,
        });
    }

    let dot = (options.size / modules).max(1);
    let symbol_px = dot * modules;
    let offset = (options.size - symbol_px) / 2;

    debug!(
        size = options.size,
        modules,
        dot,
        offset,
        shape = options.dot_shape.id(),
        "Rendering styled QR code"
    );

    let mut img = RgbaImage::from_pixel(options.size, options.size, options.background);

    let logo = options
        .logo
        .as_ref()
        .map(|l| PlacedLogo::place(l, options.size, symbol_px));

    let cell = |m: usize| (offset + m as u32 * dot) as f32;

    // A module is drawn as a dot when dark, outside the finders and clear of the logo.
    let visible: Vec<bool> = (0..matrix.width * matrix.width)
        .map(|i| {
            let (x, y) = (i % matrix.width, i / matrix.width);
            matrix.dark[i]
                && !matrix.in_finder(x, y)
                && !logo.as_ref().is_some_and(|l| {
                    l.covers(cell(x) as u32, cell(y) as u32, dot, dot)
                })
        })
        .collect();
    let is_visible = |x: isize, y: isize| -> bool {
        matrix.is_dark(x, y) && visible[y as usize * matrix.width + x as usize]
    };

    let gradient = match options.dot_fill {
        DotFill::Gradient {
            start,
            end,
            rotation,
        } => Some(LinearGradient::rotated_square(
            options.size as f32,
            rotation,
            BackgroundGradient::two_color(start, end).stops(),
        )),
        DotFill::Solid(_) => None,
    };
    let paint = match (&gradient, options.dot_fill) {
        (Some(g), _) => Paint::Gradient(g),
        (None, DotFill::Solid(c)) => Paint::Solid(c),
        (None, DotFill::Gradient { start, .. }) => Paint::Solid(start),
    };

    let d = dot as f32;
    for y in 0..matrix.width {
        for x in 0..matrix.width {
            if !visible[y * matrix.width + x] {
                continue;
            }
            let (xi, yi) = (x as isize, y as isize);
            let n = Neighbours {
                top: is_visible(xi, yi - 1),
                right: is_visible(xi + 1, yi),
                bottom: is_visible(xi, yi + 1),
                left: is_visible(xi - 1, yi),
            };
            draw_dot(&mut img, options.dot_shape, n, cell(x), cell(y), d, paint);
        }
    }

    let far = matrix.width - FINDER;
    for (mx, my) in [(0, 0), (far, 0), (0, far)] {
        draw_finder(&mut img, options, cell(mx), cell(my), d);
    }

    if let Some(logo) = &logo {
        overlay(&mut img, &logo.image, logo.x, logo.y);
    }

    Ok(img)
}

fn draw_dot(
    img: &mut RgbaImage,
    shape: DotShape,
    n: Neighbours,
    x: f32,
    y: f32,
    d: f32,
    paint: Paint<'_>,
) {
    let full = d / 2.0;
    // Corner is free when neither edge touching it has a neighbour.
    let free = |a: bool, b: bool| !a && !b;
    let radius_if = |cond: bool, r: f32| if cond { r } else { 0.0 };

    let radii = match shape {
        DotShape::Dots => {
            fill_shape(
                img,
                &Circle {
                    cx: x + full,
                    cy: y + full,
                    radius: full,
                },
                paint,
            );
            return;
        }
        DotShape::Square => CornerRadii::default(),
        DotShape::Rounded => CornerRadii {
            top_left: radius_if(free(n.top, n.left), full),
            top_right: radius_if(free(n.top, n.right), full),
            bottom_right: radius_if(free(n.bottom, n.right), full),
            bottom_left: radius_if(free(n.bottom, n.left), full),
        },
        DotShape::ExtraRounded => CornerRadii {
            top_left: radius_if(!(n.top && n.left), full),
            top_right: radius_if(!(n.top && n.right), full),
            bottom_right: radius_if(!(n.bottom && n.right), full),
            bottom_left: radius_if(!(n.bottom && n.left), full),
        },
        DotShape::Classy => CornerRadii {
            top_left: radius_if(free(n.top, n.left), full),
            bottom_right: radius_if(free(n.bottom, n.right), full),
            ..CornerRadii::default()
        },
        DotShape::ClassyRounded => CornerRadii {
            top_left: radius_if(free(n.top, n.left), full),
            top_right: radius_if(free(n.top, n.right), full / 2.0),
            bottom_right: radius_if(free(n.bottom, n.right), full),
            bottom_left: radius_if(free(n.bottom, n.left), full / 2.0),
        },
    };

    fill_shape(img, &RoundedRect::with_radii(x, y, d, d, radii), paint);
}

fn draw_finder(img: &mut RgbaImage, options: &QrRenderOptions, x: f32, y: f32, d: f32) {
    let outer = FINDER as f32 * d;
    let ring_paint = Paint::Solid(options.corner_square_color);

    match options.corner_square_shape {
        CornerSquareShape::Square => fill_shape(
            img,
            &Ring {
                outer: RoundedRect::new(x, y, outer, outer, 0.0),
                inner: RoundedRect::new(x + d, y + d, outer - 2.0 * d, outer - 2.0 * d, 0.0),
            },
            ring_paint,
        ),
        CornerSquareShape::Dot => fill_shape(
            img,
            &Ring {
                outer: Circle {
                    cx: x + outer / 2.0,
                    cy: y + outer / 2.0,
                    radius: outer / 2.0,
                },
                inner: Circle {
                    cx: x + outer / 2.0,
                    cy: y + outer / 2.0,
                    radius: outer / 2.0 - d,
                },
            },
            ring_paint,
        ),
        CornerSquareShape::ExtraRounded => fill_shape(
            img,
            &Ring {
                outer: RoundedRect::new(x, y, outer, outer, 2.5 * d),
                inner: RoundedRect::new(x + d, y + d, outer - 2.0 * d, outer - 2.0 * d, 1.5 * d),
            },
            ring_paint,
        ),
    }

    let inner = 3.0 * d;
    let (ix, iy) = (x + 2.0 * d, y + 2.0 * d);
    let dot_paint = Paint::Solid(options.corner_dot_color);
    match options.corner_dot_shape {
        CornerDotShape::Square => {
            fill_shape(img, &RoundedRect::new(ix, iy, inner, inner, 0.0), dot_paint)
        }
        CornerDotShape::Dot => fill_shape(
            img,
            &Circle {
                cx: ix + inner / 2.0,
                cy: iy + inner / 2.0,
                radius: inner / 2.0,
            },
            dot_paint,
        ),
    }
}

#[cfg(test)]
mod tests;
