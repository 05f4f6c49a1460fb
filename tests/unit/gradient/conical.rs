use super::*;
use crate::foundation::core::{Canvas, Rgba8};
use crate::surface::recording::RecordingSurface;

fn surface(w: u32, h: u32) -> RecordingSurface {
    RecordingSurface::new(Canvas::new(w, h).unwrap()).unwrap()
}

fn concentric(r0: f64, r1: f64) -> ConicalGradient {
    ConicalGradient::new(Point::new(0.0, 0.0), r0, Point::new(0.0, 0.0), r1)
}

#[test]
fn concentric_ratio_is_normalized_distance() {
    let g = concentric(0.0, 100.0);
    assert!((g.ratio_at(30.0, 40.0) - 0.5).abs() < 1e-12);
    assert!((g.ratio_at(0.0, 0.0) - 0.0).abs() < 1e-12);
    assert_eq!(g.ratio_at(300.0, 0.0), 1.0);
}

#[test]
fn annulus_ratio_starts_at_inner_circle() {
    let g = concentric(10.0, 20.0);
    assert!((g.ratio_at(15.0, 0.0) - 0.5).abs() < 1e-12);
    assert_eq!(g.ratio_at(2.0, 0.0), 0.0);
}

#[test]
fn negative_discriminant_uses_undefined_ratio() {
    // Two disjoint equal circles: points far off the axis between them have no solution.
    let g = ConicalGradient::new(Point::new(0.0, 0.0), 5.0, Point::new(100.0, 0.0), 5.0);
    assert_eq!(g.ratio_at(50.0, 500.0), UNDEFINED_RATIO);
}

#[test]
fn tangent_circles_use_linear_root() {
    // r_diff equals center distance, so a == 0.
    let g = ConicalGradient::new(Point::new(0.0, 0.0), 0.0, Point::new(10.0, 0.0), 10.0);
    let t = g.ratio_at(15.0, 0.0);
    assert!((0.0..=1.0).contains(&t));
    // Point (20, 0) lies on the end circle.
    assert!((g.ratio_at(20.0, 0.0) - 1.0).abs() < 1e-12);
}

#[test]
fn out_of_range_stops_are_ignored() {
    let mut g = concentric(0.0, 10.0);
    g.add_color_stop(-0.5, Rgb8::WHITE);
    g.add_color_stop(1.5, Rgb8::WHITE);
    assert!(g.stops().is_empty());
}

#[test]
fn fill_without_stops_leaves_pixels_untouched() {
    let mut s = surface(6, 4);
    let mut seed = PixelBuffer::new(6, 4);
    for (i, v) in seed.data.iter_mut().enumerate() {
        *v = (i * 7 % 251) as u8;
    }
    s.write_pixels(PixelRect::new(0, 0, 6, 4), &seed).unwrap();
    s.clear_commands();

    let mut g = concentric(0.0, 10.0);
    g.fill_rect(&mut s, PixelRect::new(0, 0, 6, 4)).unwrap();
    assert_eq!(s.data(), seed.data.as_slice());
    assert!(s.commands().is_empty());
}

#[test]
fn single_stop_fills_flat_color() {
    let mut s = surface(9, 7);
    let mut g = concentric(0.0, 5.0);
    g.add_color_stop(0.4, Rgb8::new(12, 200, 99));
    g.fill_rect(&mut s, PixelRect::new(0, 0, 9, 7)).unwrap();
    for px in s.data().chunks_exact(4) {
        assert_eq!(px, &[12, 200, 99, 255]);
    }
    // Boundary stops were synthesized and remain.
    let ratios: Vec<f64> = g.stops().iter().map(|s| s.ratio).collect();
    assert_eq!(ratios, vec![0.0, 0.4, 1.0]);
}

#[test]
fn fill_only_touches_the_clipped_rect() {
    let mut s = surface(8, 8);
    let mut g = concentric(0.0, 4.0);
    g.add_color_stop(0.0, Rgb8::WHITE);
    g.fill_rect(&mut s, PixelRect::new(6, 6, 10, 10)).unwrap();
    let full = s.read_pixels(PixelRect::new(0, 0, 8, 8)).unwrap();
    assert_eq!(full.pixel(5, 5).unwrap(), Rgba8::new(0, 0, 0, 0));
    assert_eq!(full.pixel(7, 7).unwrap(), Rgba8::new(255, 255, 255, 255));
}

#[test]
fn fully_clipped_rect_is_a_no_op() {
    let mut s = surface(4, 4);
    let mut g = concentric(0.0, 4.0);
    g.add_color_stop(0.0, Rgb8::WHITE);
    g.fill_rect(&mut s, PixelRect::new(10, 10, 3, 3)).unwrap();
    assert!(s.data().iter().all(|&v| v == 0));
}

#[test]
fn dithered_ramp_tracks_the_float_gradient() {
    // Horizontal ramp from 0 to 10 over 200 pixels: each output stays within one level of
    // the exact value, and the row mean stays close to the exact mean.
    let (w, h) = (200u32, 16u32);
    let mut s = surface(w, h);
    let mut g = ConicalGradient::new(
        Point::new(-1_000_000.0, 0.0),
        1_000_000.0,
        Point::new(-1_000_000.0, 0.0),
        1_000_200.0,
    );
    g.add_color_stop(0.0, Rgb8::new(0, 0, 0));
    g.add_color_stop(1.0, Rgb8::new(10, 10, 10));
    g.fill_rect(&mut s, PixelRect::new(0, 0, w, h)).unwrap();

    let out = s.read_pixels(PixelRect::new(0, 0, w, h)).unwrap();
    let row = 8;
    let mut exact_sum = 0.0;
    let mut got_sum = 0.0;
    for x in 0..w {
        let exact = 10.0 * g.ratio_at(f64::from(x), f64::from(row));
        let got = f64::from(out.pixel(x, row).unwrap().r);
        assert!((got - exact).abs() <= 1.0 + 1e-9, "x={x}: got {got}, exact {exact}");
        exact_sum += exact;
        got_sum += got;
    }
    assert!((got_sum - exact_sum).abs() / f64::from(w) < 0.25);

    // Intermediate levels appear, so the output is not just banded truncation.
    let distinct: std::collections::BTreeSet<u8> =
        (0..w).map(|x| out.pixel(x, row).unwrap().r).collect();
    assert!(distinct.len() >= 10);
}

#[test]
fn background_layout_covers_every_pixel_opaquely() {
    // Same focal layout the scene uses for its background.
    let (w, h) = (40.0, 30.0);
    let mut g = ConicalGradient::new(
        Point::new(w * 0.75, h / 2.0 * 0.75),
        0.0,
        Point::new(w / 2.0, h / 4.0),
        (w * w + h * h).sqrt() / 2.0,
    );
    g.add_color_stop(0.0, Rgb8::WHITE);
    g.add_color_stop(1.0, Rgb8::new(0x66, 0x66, 0x66));
    let mut s = surface(40, 30);
    g.fill_rect(&mut s, PixelRect::new(0, 0, 40, 30)).unwrap();
    for px in s.data().chunks_exact(4) {
        assert_eq!(px[3], 255);
        assert!(px[0] >= 0x66);
    }
    // Brightest near the start focus.
    let out = s.read_pixels(PixelRect::new(0, 0, 40, 30)).unwrap();
    assert!(out.pixel(30, 11).unwrap().r > out.pixel(0, 29).unwrap().r);
}
