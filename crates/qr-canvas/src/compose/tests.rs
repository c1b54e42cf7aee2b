use image::Rgba;

use super::*;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
const QR_INK: Rgba<u8> = Rgba([10, 200, 30, 255]);

fn qr_bitmap(size: u32) -> RgbaImage {
    RgbaImage::from_pixel(size, size, QR_INK)
}

fn style(size: u32) -> StyleParameters {
    StyleParameters::default()
        .with_qr_size(size)
        .with_border_color(Rgba([0x12, 0x34, 0x56, 255]))
}

fn gradient() -> BackgroundGradient {
    BackgroundGradient::two_color(RED, BLUE)
}

fn compose_card(size: u32, title: &str, tagline: &str) -> RgbaImage {
    compose(
        Some(&qr_bitmap(size)),
        &style(size),
        &gradient(),
        &CardText::new(title, tagline),
        &FontLibrary::new(),
    )
    .unwrap()
}

#[test]
fn missing_bitmap_is_reported() {
    let err = compose(
        None,
        &style(250),
        &gradient(),
        &CardText::default(),
        &FontLibrary::new(),
    )
    .unwrap_err();
    assert!(matches!(err, CanvasError::MissingSourceBitmap));
}

#[test]
fn title_only_card_dimensions() {
    let img = compose_card(250, "Scan Me", "");
    assert_eq!(img.dimensions(), (330, 380));
}

#[test]
fn bare_card_dimensions_and_qr_position() {
    let layout = CardLayout::compute(300, &CardText::new("", ""));
    assert_eq!((layout.canvas_width, layout.canvas_height), (380, 380));
    assert_eq!((layout.qr_x, layout.qr_y), (40, 45));

    let img = compose_card(300, "", "");
    assert_eq!(img.dimensions(), (380, 380));
    assert_eq!(*img.get_pixel(40, 45), QR_INK);
    assert_eq!(*img.get_pixel(339, 344), QR_INK);
    assert_eq!(*img.get_pixel(39, 45), Rgba([255, 255, 255, 255]));
    assert_eq!(*img.get_pixel(40, 44), Rgba([255, 255, 255, 255]));
}

#[test]
fn text_blocks_add_height_independently() {
    let base = CardLayout::compute(200, &CardText::new("", "")).canvas_height;
    let title = CardLayout::compute(200, &CardText::new("Menu", "")).canvas_height;
    let tagline = CardLayout::compute(200, &CardText::new("", "Scan to order")).canvas_height;
    let both = CardLayout::compute(200, &CardText::new("Menu", "Scan to order")).canvas_height;

    assert_eq!(title - base, 50);
    assert_eq!(tagline - base, 30);
    assert_eq!(both - base, 80);
}

#[test]
fn whitespace_only_text_is_absent() {
    let blank = CardLayout::compute(250, &CardText::new("   ", "\t\n"));
    let bare = CardLayout::compute(250, &CardText::new("", ""));
    assert_eq!(blank, bare);
    assert_eq!(blank.title_baseline, None);
    assert_eq!(crate::export::slugify("   "), "qr-code");
}

#[test]
fn qr_shifts_down_below_text_blocks() {
    let layout = CardLayout::compute(250, &CardText::new("Menu", "Scan to order"));
    assert_eq!(layout.title_baseline, Some(70.0));
    assert_eq!(layout.tagline_baseline, Some(110.0));
    assert_eq!(layout.qr_y, 45 + 50 + 30);

    let tagline_only = CardLayout::compute(250, &CardText::new("", "Scan to order"));
    assert_eq!(tagline_only.title_baseline, None);
    assert_eq!(tagline_only.tagline_baseline, Some(60.0));
    assert_eq!(tagline_only.qr_y, 75);
}

#[test]
fn reserved_text_space_stays_blank_without_fonts() {
    let img = compose_card(200, "Menu", "");
    assert_eq!(*img.get_pixel(40, 95), QR_INK);
    assert_eq!(*img.get_pixel(140, 70), Rgba([255, 255, 255, 255]));
}

#[test]
fn border_is_stroked_on_card_edge() {
    let img = compose_card(250, "", "");
    let border = Rgba([0x12, 0x34, 0x56, 255]);
    assert_eq!(*img.get_pixel(165, 20), border);
    assert_eq!(*img.get_pixel(165, 19), border);
    assert_ne!(*img.get_pixel(165, 17), border);
}

#[test]
fn background_runs_from_first_to_last_color() {
    let img = compose_card(250, "", "");
    let top_left = img.get_pixel(0, 0);
    let bottom_right = img.get_pixel(329, 329);
    assert!(top_left[0] > 250 && top_left[2] < 5);
    assert!(bottom_right[2] > 250 && bottom_right[0] < 5);
    assert_eq!(top_left[3], 255);
}

#[test]
fn composition_is_deterministic() {
    let a = compose_card(180, "Scan Me", "Fresh menu");
    let b = compose_card(180, "Scan Me", "Fresh menu");
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn mismatched_bitmap_is_resized_to_configured_size() {
    let img = compose(
        Some(&qr_bitmap(100)),
        &style(200),
        &gradient(),
        &CardText::default(),
        &FontLibrary::new(),
    )
    .unwrap();
    assert_eq!(img.dimensions(), (280, 280));
    assert_eq!(*img.get_pixel(239, 244), QR_INK);
}

#[test]
fn inputs_are_not_mutated() {
    let qr = qr_bitmap(150);
    let before = qr.clone();
    let _ = compose(
        Some(&qr),
        &style(150),
        &gradient(),
        &CardText::new("A", "B"),
        &FontLibrary::new(),
    )
    .unwrap();
    assert_eq!(qr, before);
}

#[test]
fn overlay_does_not_panic_on_out_of_bounds() {
    let mut base = RgbaImage::new(100, 100);
    let top = RgbaImage::from_pixel(50, 50, QR_INK);
    overlay(&mut base, &top, 80, 80);
    assert_eq!(*base.get_pixel(99, 99), QR_INK);
}

#[test]
fn overlay_blends_translucent_pixels() {
    let mut base = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
    let top = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 128]));
    overlay(&mut base, &top, 0, 0);
    let px = base.get_pixel(0, 0);
    assert_eq!(px[3], 255);
    assert!(px[0] > 120 && px[0] < 136);
}
