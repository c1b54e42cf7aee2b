use std::sync::Arc;

use image::Rgba;

use super::*;
use crate::options::{LogoOptions, LogoShape};

const URL: &str = "https://restaurant-menu-3d-food.vercel.app/";
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Pixel geometry of a rendered symbol: (modules, dot size, offset).
fn geometry(data: &str, size: u32, ec: EcLevel) -> (usize, u32, u32) {
    let matrix = Matrix::encode(data, ec).unwrap();
    let modules = matrix.width as u32;
    let dot = size / modules;
    (matrix.width, dot, (size - dot * modules) / 2)
}

fn module_center(img: &RgbaImage, dot: u32, offset: u32, mx: usize, my: usize) -> Rgba<u8> {
    *img.get_pixel(offset + mx as u32 * dot + dot / 2, offset + my as u32 * dot + dot / 2)
}

#[test]
fn output_is_exactly_the_requested_size() {
    for size in [150, 250, 333, 400] {
        let img = render_styled(&QrRenderOptions::new(URL, size)).unwrap();
        assert_eq!(img.dimensions(), (size, size));
    }
}

#[test]
fn rendering_is_deterministic() {
    let opts = QrRenderOptions::new(URL, 250).with_dot_shape(DotShape::ClassyRounded);
    let a = render_styled(&opts).unwrap();
    let b = render_styled(&opts).unwrap();
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn square_finder_pattern_has_ring_gap_and_center() {
    let img = render_styled(&QrRenderOptions::new(URL, 300)).unwrap();
    let (_, dot, offset) = geometry(URL, 300, EcLevel::Q);

    assert_eq!(module_center(&img, dot, offset, 0, 0), BLACK);
    assert_eq!(module_center(&img, dot, offset, 1, 1), WHITE);
    assert_eq!(module_center(&img, dot, offset, 3, 3), BLACK);
    // Separator next to the finder stays background.
    assert_eq!(module_center(&img, dot, offset, 7, 7), WHITE);
}

#[test]
fn background_color_fills_light_modules() {
    let bg = Rgba([250, 240, 200, 255]);
    let img = render_styled(&QrRenderOptions::new(URL, 300).with_background(bg)).unwrap();
    let (_, dot, offset) = geometry(URL, 300, EcLevel::Q);
    assert_eq!(module_center(&img, dot, offset, 7, 7), bg);
}

#[test]
fn dot_corner_square_rounds_off_the_ring_corner() {
    let (_, dot, offset) = geometry(URL, 300, EcLevel::Q);
    let corner = (offset + 1, offset + 1);

    let square = render_styled(&QrRenderOptions::new(URL, 300)).unwrap();
    assert_eq!(*square.get_pixel(corner.0, corner.1), BLACK);

    let dot_ring = render_styled(
        &QrRenderOptions::new(URL, 300).with_corner_square(CornerSquareShape::Dot, BLACK),
    )
    .unwrap();
    assert_eq!(*dot_ring.get_pixel(corner.0, corner.1), WHITE);
    // The ring itself is still drawn at the middle of its left edge.
    assert_eq!(module_center(&dot_ring, dot, offset, 0, 3), BLACK);
}

#[test]
fn corner_colors_are_independent_of_dot_fill() {
    let ring = Rgba([200, 0, 0, 255]);
    let center = Rgba([0, 0, 200, 255]);
    let img = render_styled(
        &QrRenderOptions::new(URL, 300)
            .with_corner_square(CornerSquareShape::Square, ring)
            .with_corner_dot(CornerDotShape::Dot, center),
    )
    .unwrap();
    let (_, dot, offset) = geometry(URL, 300, EcLevel::Q);
    assert_eq!(module_center(&img, dot, offset, 0, 0), ring);
    assert_eq!(module_center(&img, dot, offset, 3, 3), center);
}

#[test]
fn dot_shapes_change_the_output() {
    let square = render_styled(&QrRenderOptions::new(URL, 250)).unwrap();
    for shape in [DotShape::Dots, DotShape::Rounded, DotShape::ExtraRounded, DotShape::Classy] {
        let styled = render_styled(&QrRenderOptions::new(URL, 250).with_dot_shape(shape)).unwrap();
        assert_ne!(square.as_raw(), styled.as_raw(), "{shape:?} looks like square");
    }
}

#[test]
fn gradient_fill_runs_across_the_symbol() {
    let red = Rgba([255, 0, 0, 255]);
    let blue = Rgba([0, 0, 255, 255]);
    let img = render_styled(&QrRenderOptions::new(URL, 330).with_dot_fill(DotFill::Gradient {
        start: red,
        end: blue,
        rotation: 45.0,
    }))
    .unwrap();

    let (width, dot, offset) = geometry(URL, 330, EcLevel::Q);
    let matrix = Matrix::encode(URL, EcLevel::Q).unwrap();
    assert!(width >= 25, "expected an alignment pattern");
    let far = width - 7;
    assert!(matrix.is_dark(8, 6));
    assert!(matrix.is_dark(far as isize, far as isize));

    let near = module_center(&img, dot, offset, 8, 6);
    let late = module_center(&img, dot, offset, far, far);
    assert!(near[0] > near[2], "top-left dots lean to the start color: {near:?}");
    assert!(late[2] > late[0], "bottom-right dots lean to the end color: {late:?}");
}

#[test]
fn logo_is_drawn_at_the_center() {
    let green = Rgba([0, 255, 0, 255]);
    let logo = LogoOptions::new(Arc::new(RgbaImage::from_pixel(20, 20, green)));
    let img = render_styled(&QrRenderOptions::new(URL, 300).with_logo(logo)).unwrap();
    assert_eq!(*img.get_pixel(150, 150), green);
}

#[test]
fn dots_under_the_logo_are_hidden() {
    let clear = Rgba([0, 0, 0, 0]);
    let mut logo = LogoOptions::new(Arc::new(RgbaImage::from_pixel(20, 20, clear)));
    logo.shape = LogoShape::Diamond;
    let opts = QrRenderOptions::new(URL, 300).with_logo(logo.clone());
    let img = render_styled(&opts).unwrap();

    let (width, dot, _) = geometry(URL, 300, EcLevel::H);
    let symbol_px = dot * width as u32;
    let placed = PlacedLogo::place(&logo, 300, symbol_px);
    for y in placed.y..placed.y + placed.image.height() {
        for x in placed.x..placed.x + placed.image.width() {
            assert_eq!(*img.get_pixel(x, y), WHITE, "dot visible under logo at ({x}, {y})");
        }
    }
}

#[test]
fn too_small_size_is_rejected() {
    let err = render_styled(&QrRenderOptions::new(URL, 10)).unwrap_err();
    assert!(matches!(err, QrRenderError::InvalidSize { size: 10, .. }));
}

#[test]
fn oversized_payload_fails_to_encode() {
    let data = "x".repeat(5000);
    let err = render_styled(&QrRenderOptions::new(data, 400)).unwrap_err();
    assert!(matches!(err, QrRenderError::Encode(_)));
}
