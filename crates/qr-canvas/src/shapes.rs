//! Anti-aliased shape filling from signed distance fields.
//!
//! Coverage of a pixel is derived from the signed distance of its center to the
//! shape outline (negative inside), which keeps edges smooth and output
//! deterministic.

use image::{Rgba, RgbaImage};

use crate::color::blend;
use crate::gradient::LinearGradient;

/// A closed shape described by its signed distance function.
pub trait Shape {
    /// Distance from `(x, y)` to the outline; negative inside.
    fn signed_distance(&self, x: f32, y: f32) -> f32;

    /// Axis-aligned bounds as `(min_x, min_y, max_x, max_y)`.
    fn bounds(&self) -> (f32, f32, f32, f32);
}

/// What a shape is filled with.
#[derive(Debug, Clone, Copy)]
pub enum Paint<'a> {
    Solid(Rgba<u8>),
    Gradient(&'a LinearGradient),
}

impl Paint<'_> {
    fn color_at(&self, x: f32, y: f32) -> Rgba<u8> {
        match self {
            Paint::Solid(c) => *c,
            Paint::Gradient(g) => g.color_at(x, y),
        }
    }
}

/// Per-corner radii, clockwise from top-left.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    pub fn uniform(r: f32) -> Self {
        Self {
            top_left: r,
            top_right: r,
            bottom_right: r,
            bottom_left: r,
        }
    }
}

/// Rectangle with independently rounded corners.
#[derive(Debug, Clone, Copy)]
pub struct RoundedRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub radii: CornerRadii,
}

impl RoundedRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32, radius: f32) -> Self {
        Self::with_radii(x, y, width, height, CornerRadii::uniform(radius))
    }

    pub fn with_radii(x: f32, y: f32, width: f32, height: f32, radii: CornerRadii) -> Self {
        Self {
            x,
            y,
            width,
            height,
            radii,
        }
    }
}

impl Shape for RoundedRect {
    fn signed_distance(&self, x: f32, y: f32) -> f32 {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        let px = x - (self.x + hw);
        let py = y - (self.y + hh);

        let r = match (px > 0.0, py > 0.0) {
            (false, false) => self.radii.top_left,
            (true, false) => self.radii.top_right,
            (true, true) => self.radii.bottom_right,
            (false, true) => self.radii.bottom_left,
        }
        .clamp(0.0, hw.min(hh));

        let qx = px.abs() - hw + r;
        let qy = py.abs() - hh + r;
        let outside = qx.max(0.0).hypot(qy.max(0.0));
        outside + qx.max(qy).min(0.0) - r
    }

    fn bounds(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Filled circle.
#[derive(Debug, Clone, Copy)]
pub struct Circle {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
}

impl Shape for Circle {
    fn signed_distance(&self, x: f32, y: f32) -> f32 {
        (x - self.cx).hypot(y - self.cy) - self.radius
    }

    fn bounds(&self) -> (f32, f32, f32, f32) {
        (
            self.cx - self.radius,
            self.cy - self.radius,
            self.cx + self.radius,
            self.cy + self.radius,
        )
    }
}

/// Rhombus inscribed in the given box.
#[derive(Debug, Clone, Copy)]
pub struct Diamond {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Shape for Diamond {
    fn signed_distance(&self, x: f32, y: f32) -> f32 {
        let hw = (self.width / 2.0).max(f32::EPSILON);
        let hh = (self.height / 2.0).max(f32::EPSILON);
        let dx = (x - (self.x + hw)).abs();
        let dy = (y - (self.y + hh)).abs();
        (dx / hw + dy / hh - 1.0) * (hw * hh) / hw.hypot(hh)
    }

    fn bounds(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// The area of `outer` not covered by `inner`.
#[derive(Debug, Clone, Copy)]
pub struct Ring<A, B> {
    pub outer: A,
    pub inner: B,
}

impl<A: Shape, B: Shape> Shape for Ring<A, B> {
    fn signed_distance(&self, x: f32, y: f32) -> f32 {
        self.outer
            .signed_distance(x, y)
            .max(-self.inner.signed_distance(x, y))
    }

    fn bounds(&self) -> (f32, f32, f32, f32) {
        self.outer.bounds()
    }
}

/// Fraction of the pixel centered at `(x, y)` covered by the shape's interior.
pub fn fill_coverage(shape: &impl Shape, x: f32, y: f32) -> f32 {
    (0.5 - shape.signed_distance(x, y)).clamp(0.0, 1.0)
}

/// Fraction of the pixel covered by a stroke of `width` centered on the outline.
pub fn stroke_coverage(shape: &impl Shape, x: f32, y: f32, width: f32) -> f32 {
    (width / 2.0 + 0.5 - shape.signed_distance(x, y).abs()).clamp(0.0, 1.0)
}

/// Fill `shape` into `img`, blending by coverage.
pub fn fill_shape(img: &mut RgbaImage, shape: &impl Shape, paint: Paint<'_>) {
    paint_pixels(img, shape.bounds(), 1.0, |x, y| fill_coverage(shape, x, y), paint);
}

/// Stroke the outline of `shape` into `img` with the given line width.
pub fn stroke_shape(img: &mut RgbaImage, shape: &impl Shape, width: f32, paint: Paint<'_>) {
    let margin = width / 2.0 + 1.0;
    paint_pixels(
        img,
        shape.bounds(),
        margin,
        |x, y| stroke_coverage(shape, x, y, width),
        paint,
    );
}

/// Multiply the alpha of every pixel by its coverage of `shape`.
pub fn apply_mask(img: &mut RgbaImage, shape: &impl Shape) {
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let cov = fill_coverage(shape, x as f32 + 0.5, y as f32 + 0.5);
        pixel[3] = (f32::from(pixel[3]) * cov).round() as u8;
    }
}

fn paint_pixels(
    img: &mut RgbaImage,
    bounds: (f32, f32, f32, f32),
    margin: f32,
    coverage: impl Fn(f32, f32) -> f32,
    paint: Paint<'_>,
) {
    let (min_x, min_y, max_x, max_y) = bounds;
    let x0 = (min_x - margin).floor().max(0.0) as u32;
    let y0 = (min_y - margin).floor().max(0.0) as u32;
    let x1 = ((max_x + margin).ceil().max(0.0) as u32).min(img.width());
    let y1 = ((max_y + margin).ceil().max(0.0) as u32).min(img.height());

    for y in y0..y1 {
        for x in x0..x1 {
            let cx = x as f32 + 0.5;
            let cy = y as f32 + 0.5;
            let cov = coverage(cx, cy);
            if cov <= 0.0 {
                continue;
            }
            let bg = *img.get_pixel(x, y);
            img.put_pixel(x, y, blend(bg, paint.color_at(cx, cy), cov));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn rounded_rect_distance_signs() {
        let r = RoundedRect::new(10.0, 10.0, 80.0, 60.0, 20.0);
        assert!(r.signed_distance(50.0, 40.0) < 0.0);
        assert!(r.signed_distance(5.0, 40.0) > 0.0);
        // The sharp corner point lies outside once rounded.
        assert!(r.signed_distance(10.5, 10.5) > 0.0);
        // Edge midpoint sits on the outline.
        assert!(r.signed_distance(50.0, 10.0).abs() < 1e-4);
    }

    #[test]
    fn per_corner_radii_only_round_selected_corners() {
        let radii = CornerRadii {
            top_left: 5.0,
            ..CornerRadii::default()
        };
        let r = RoundedRect::with_radii(0.0, 0.0, 10.0, 10.0, radii);
        assert!(r.signed_distance(0.2, 0.2) > 0.0);
        assert!(r.signed_distance(9.8, 0.2) < 0.0);
    }

    #[test]
    fn fill_rect_covers_interior_only() {
        let mut img = RgbaImage::from_pixel(20, 20, WHITE);
        fill_shape(&mut img, &RoundedRect::new(5.0, 5.0, 10.0, 10.0, 0.0), Paint::Solid(BLACK));
        assert_eq!(*img.get_pixel(10, 10), BLACK);
        assert_eq!(*img.get_pixel(2, 2), WHITE);
        assert_eq!(*img.get_pixel(15, 15), WHITE);
    }

    #[test]
    fn stroke_leaves_interior_untouched() {
        let mut img = RgbaImage::from_pixel(40, 40, WHITE);
        let rect = RoundedRect::new(5.0, 5.0, 30.0, 30.0, 4.0);
        stroke_shape(&mut img, &rect, 2.0, Paint::Solid(BLACK));
        assert_eq!(*img.get_pixel(20, 20), WHITE);
        assert_eq!(*img.get_pixel(20, 5), BLACK);
        assert_eq!(*img.get_pixel(20, 0), WHITE);
    }

    #[test]
    fn ring_excludes_inner_area() {
        let ring = Ring {
            outer: Circle { cx: 10.0, cy: 10.0, radius: 8.0 },
            inner: Circle { cx: 10.0, cy: 10.0, radius: 4.0 },
        };
        assert!(ring.signed_distance(10.0, 10.0) > 0.0);
        assert!(ring.signed_distance(10.0, 4.0) < 0.0);
    }

    #[test]
    fn diamond_corners_are_outside() {
        let d = Diamond { x: 0.0, y: 0.0, width: 20.0, height: 20.0 };
        assert!(d.signed_distance(10.0, 10.0) < 0.0);
        assert!(d.signed_distance(1.0, 1.0) > 0.0);
    }

    #[test]
    fn mask_clears_alpha_outside_shape() {
        let mut img = RgbaImage::from_pixel(20, 20, BLACK);
        apply_mask(&mut img, &Circle { cx: 10.0, cy: 10.0, radius: 8.0 });
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(10, 10)[3], 255);
    }

    #[test]
    fn out_of_bounds_shapes_do_not_panic() {
        let mut img = RgbaImage::from_pixel(10, 10, WHITE);
        fill_shape(&mut img, &Circle { cx: -50.0, cy: 100.0, radius: 5.0 }, Paint::Solid(BLACK));
        stroke_shape(&mut img, &RoundedRect::new(-5.0, -5.0, 30.0, 30.0, 3.0), 2.0, Paint::Solid(BLACK));
    }
}
