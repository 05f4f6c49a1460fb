use super::*;

#[test]
fn cosine_ease_hits_endpoints_and_midpoint() {
    assert!(cosine_ease(0.0).abs() < 1e-12);
    assert!((cosine_ease(0.5) - 0.5).abs() < 1e-12);
    assert!((cosine_ease(1.0) - 1.0).abs() < 1e-12);
}

#[test]
fn cosine_ease_is_monotonic_on_unit_interval() {
    let mut prev = cosine_ease(0.0);
    for i in 1..=100 {
        let v = cosine_ease(f64::from(i) / 100.0);
        assert!(v >= prev);
        prev = v;
    }
}

#[test]
fn truncate_channel_saturates() {
    assert_eq!(truncate_channel(12.99), 12);
    assert_eq!(truncate_channel(-3.0), 0);
    assert_eq!(truncate_channel(255.7), 255);
    assert_eq!(truncate_channel(f64::NAN), 0);
}

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
    assert_eq!(lerp(2.0, 6.0, 0.25), 3.0);
}
