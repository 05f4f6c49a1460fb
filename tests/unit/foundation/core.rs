use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(3, 4).unwrap();
    assert_eq!(c.diagonal(), 5.0);
}

#[test]
fn pixel_rect_clips_to_canvas() {
    let canvas = Canvas::new(10, 8).unwrap();
    let r = PixelRect::new(6, 5, 10, 10).clip_to(canvas);
    assert_eq!(r, PixelRect::new(6, 5, 4, 3));

    let outside = PixelRect::new(20, 20, 5, 5).clip_to(canvas);
    assert!(outside.is_empty());
    assert!(PixelRect::new(0, 0, 10, 8).fits_within(canvas));
    assert!(!PixelRect::new(1, 0, 10, 8).fits_within(canvas));
}

#[test]
fn rgb8_hex_parse_and_display() {
    let c: Rgb8 = "#1a2B3c".parse().unwrap();
    assert_eq!(c, Rgb8::new(0x1a, 0x2b, 0x3c));
    assert_eq!(c.to_string(), "#1a2b3c");
    assert_eq!("ffffff".parse::<Rgb8>().unwrap(), Rgb8::WHITE);

    assert!("#fff".parse::<Rgb8>().is_err());
    assert!("#gg0000".parse::<Rgb8>().is_err());
    assert!("#+1+2+3".parse::<Rgb8>().is_err());
    assert!("-10203".parse::<Rgb8>().is_err());
}

#[test]
fn rgb8_serde_uses_hex_strings() {
    let json = serde_json::to_string(&Rgb8::new(255, 0, 16)).unwrap();
    assert_eq!(json, "\"#ff0010\"");
    let back: Rgb8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Rgb8::new(255, 0, 16));
}

#[test]
fn opacity_maps_to_alpha() {
    assert_eq!(Rgb8::BLACK.with_opacity(0.1).a, 26);
    assert_eq!(Rgb8::BLACK.with_opacity(2.0).a, 255);
}

#[test]
fn premul_round_trips_opaque_and_clears_transparent() {
    let c = Rgba8::new(10, 200, 33, 255);
    assert_eq!(Rgba8Premul::from_straight(c).to_straight(), c);

    let p = Rgba8Premul::from_straight(Rgba8::new(200, 100, 50, 0));
    assert_eq!(p.to_straight(), Rgba8::new(0, 0, 0, 0));
}
