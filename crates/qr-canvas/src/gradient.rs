//! Linear gradients: the card background and the QR dot fill.

use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::color::to_hex;
use crate::{CanvasError, Result};

/// A `(position, color)` pair along a linear interpolation, position in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba<u8>,
}

/// Ordered background colors, at least two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundGradient {
    colors: Vec<Rgba<u8>>,
}

impl BackgroundGradient {
    /// Build a gradient from two or more colors, in the given order.
    pub fn new(colors: Vec<Rgba<u8>>) -> Result<Self> {
        if colors.len() < 2 {
            return Err(CanvasError::GradientTooShort(colors.len()));
        }
        Ok(Self { colors })
    }

    /// Two-color gradient; cannot fail.
    pub fn two_color(start: Rgba<u8>, end: Rgba<u8>) -> Self {
        Self {
            colors: vec![start, end],
        }
    }

    pub fn colors(&self) -> &[Rgba<u8>] {
        &self.colors
    }

    /// Stops for the colors.
    ///
    /// Two colors sit at 0 and 1. More colors are spaced evenly, stop `i` at `i / (n - 1)`.
    pub fn stops(&self) -> Vec<GradientStop> {
        if self.colors.len() > 2 {
            let step = 1.0 / (self.colors.len() - 1) as f32;
            self.colors
                .iter()
                .enumerate()
                .map(|(i, &color)| GradientStop {
                    offset: i as f32 * step,
                    color,
                })
                .collect()
        } else {
            vec![
                GradientStop {
                    offset: 0.0,
                    color: self.colors[0],
                },
                GradientStop {
                    offset: 1.0,
                    color: self.colors[1],
                },
            ]
        }
    }

    /// Corner-to-corner gradient (top-left to bottom-right) over a `width × height` area.
    pub fn diagonal(&self, width: u32, height: u32) -> LinearGradient {
        LinearGradient::new((0.0, 0.0), (width as f32, height as f32), self.stops())
    }

    /// CSS `linear-gradient(135deg, ...)` equivalent, for previews.
    pub fn css(&self) -> String {
        if self.colors.len() > 2 {
            let list: Vec<String> = self.colors.iter().map(|&c| to_hex(c)).collect();
            format!("linear-gradient(135deg, {})", list.join(", "))
        } else {
            format!(
                "linear-gradient(135deg, {} 0%, {} 100%)",
                to_hex(self.colors[0]),
                to_hex(self.colors[1])
            )
        }
    }
}

/// A linear gradient between two points, evaluated per pixel.
#[derive(Debug, Clone)]
pub struct LinearGradient {
    start: (f32, f32),
    end: (f32, f32),
    stops: Vec<GradientStop>,
}

impl LinearGradient {
    pub fn new(start: (f32, f32), end: (f32, f32), stops: Vec<GradientStop>) -> Self {
        Self { start, end, stops }
    }

    /// Gradient through the center of a `size × size` square at `degrees`
    /// (0 = left to right, 90 = top to bottom), spanning the square's projection.
    pub fn rotated_square(size: f32, degrees: f32, stops: Vec<GradientStop>) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let half = (cos.abs() + sin.abs()) * size / 2.0;
        let c = size / 2.0;
        Self::new(
            (c - cos * half, c - sin * half),
            (c + cos * half, c + sin * half),
            stops,
        )
    }

    /// Position along the gradient axis of the point `(x, y)`, clamped to `[0, 1]`.
    pub fn position(&self, x: f32, y: f32) -> f32 {
        let dx = self.end.0 - self.start.0;
        let dy = self.end.1 - self.start.1;
        let len_sq = dx * dx + dy * dy;
        if len_sq <= f32::EPSILON {
            return 0.0;
        }
        (((x - self.start.0) * dx + (y - self.start.1) * dy) / len_sq).clamp(0.0, 1.0)
    }

    /// Color at the point `(x, y)`.
    pub fn color_at(&self, x: f32, y: f32) -> Rgba<u8> {
        sample(&self.stops, self.position(x, y))
    }

    /// Fill every pixel of `img`, sampling at pixel centers.
    pub fn fill(&self, img: &mut RgbaImage) {
        debug!(
            width = img.width(),
            height = img.height(),
            stops = self.stops.len(),
            "Filling linear gradient"
        );
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = self.color_at(x as f32 + 0.5, y as f32 + 0.5);
        }
    }
}

/// Interpolate the color at `t` between the surrounding stops.
fn sample(stops: &[GradientStop], t: f32) -> Rgba<u8> {
    let Some(first) = stops.first() else {
        return Rgba([0, 0, 0, 0]);
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let f = if span <= f32::EPSILON {
                1.0
            } else {
                (t - a.offset) / span
            };
            return lerp(a.color, b.color, f);
        }
    }
    stops[stops.len() - 1].color
}

fn lerp(a: Rgba<u8>, b: Rgba<u8>, f: f32) -> Rgba<u8> {
    let mix = |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * f).round() as u8;
    Rgba([
        mix(a[0], b[0]),
        mix(a[1], b[1]),
        mix(a[2], b[2]),
        mix(a[3], b[3]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    #[test]
    fn rejects_single_color() {
        assert!(matches!(
            BackgroundGradient::new(vec![RED]),
            Err(CanvasError::GradientTooShort(1))
        ));
    }

    #[test]
    fn two_colors_sit_at_ends() {
        let g = BackgroundGradient::new(vec![RED, BLUE]).unwrap();
        assert_eq!(
            g.stops(),
            vec![
                GradientStop { offset: 0.0, color: RED },
                GradientStop { offset: 1.0, color: BLUE },
            ]
        );
    }

    #[test]
    fn many_colors_are_evenly_spaced_in_order() {
        let colors = vec![RED, GREEN, BLUE, RED, GREEN];
        let g = BackgroundGradient::new(colors.clone()).unwrap();
        let stops = g.stops();
        assert_eq!(stops.len(), 5);
        for (i, stop) in stops.iter().enumerate() {
            assert!((stop.offset - i as f32 / 4.0).abs() < 1e-6);
            assert_eq!(stop.color, colors[i]);
        }
    }

    #[test]
    fn diagonal_runs_corner_to_corner() {
        let g = BackgroundGradient::new(vec![RED, BLUE]).unwrap().diagonal(100, 50);
        assert_eq!(g.color_at(0.0, 0.0), RED);
        assert_eq!(g.color_at(100.0, 50.0), BLUE);
        let mid = g.color_at(50.0, 25.0);
        assert_eq!(mid, Rgba([128, 0, 128, 255]));
    }

    #[test]
    fn three_colors_hit_middle_stop_at_center() {
        let g = BackgroundGradient::new(vec![RED, GREEN, BLUE])
            .unwrap()
            .diagonal(10, 10);
        assert_eq!(g.color_at(5.0, 5.0), GREEN);
    }

    #[test]
    fn positions_outside_axis_are_clamped() {
        let g = LinearGradient::new((10.0, 0.0), (20.0, 0.0), BackgroundGradient::two_color(RED, BLUE).stops());
        assert_eq!(g.color_at(-5.0, 3.0), RED);
        assert_eq!(g.color_at(50.0, 3.0), BLUE);
    }

    #[test]
    fn rotated_square_at_45_degrees_spans_the_diagonal() {
        let g = LinearGradient::rotated_square(100.0, 45.0, BackgroundGradient::two_color(RED, BLUE).stops());
        assert!(g.position(0.0, 0.0) < 1e-4);
        assert!((g.position(100.0, 100.0) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn css_matches_preset_preview_format() {
        let two = BackgroundGradient::two_color(RED, BLUE);
        assert_eq!(two.css(), "linear-gradient(135deg, #ff0000 0%, #0000ff 100%)");
        let three = BackgroundGradient::new(vec![RED, GREEN, BLUE]).unwrap();
        assert_eq!(three.css(), "linear-gradient(135deg, #ff0000, #00ff00, #0000ff)");
    }
}
