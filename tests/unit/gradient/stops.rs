use super::*;
use crate::foundation::rng::Rng64;

fn red(v: u8) -> Rgb8 {
    Rgb8::new(v, 0, 0)
}

#[test]
fn inserts_in_ratio_order() {
    let mut list = ColorStopList::new();
    list.insert(0.5, red(1));
    list.insert(0.1, red(2));
    list.insert(0.9, red(3));
    list.insert(0.3, red(4));
    let ratios: Vec<f64> = list.as_slice().iter().map(|s| s.ratio).collect();
    assert_eq!(ratios, vec![0.1, 0.3, 0.5, 0.9]);
}

#[test]
fn duplicate_ratio_replaces_color() {
    let mut list = ColorStopList::new();
    list.insert(0.5, red(1));
    list.insert(0.5, red(2));
    assert_eq!(list.len(), 1);
    assert_eq!(list.as_slice()[0].color, red(2));
}

#[test]
fn out_of_range_ratios_are_ignored() {
    let mut list = ColorStopList::new();
    list.insert(0.25, red(1));
    let before = list.clone();
    list.insert(-0.01, red(9));
    list.insert(1.01, red(9));
    list.insert(f64::NAN, red(9));
    assert_eq!(list, before);
}

#[test]
fn random_insertions_keep_sorted_unique_latest_wins() {
    let mut rng = Rng64::new(2024);
    let mut list = ColorStopList::new();
    let mut latest = std::collections::BTreeMap::new();
    for i in 0..500u32 {
        // Coarse grid so duplicates are frequent.
        let ratio = (rng.next_f64_01() * 20.0).floor() / 20.0;
        let color = red((i % 256) as u8);
        list.insert(ratio, color);
        latest.insert((ratio * 20.0).round() as u32, color);
    }
    let stops = list.as_slice();
    for w in stops.windows(2) {
        assert!(w[0].ratio < w[1].ratio);
    }
    assert_eq!(stops.len(), latest.len());
    for s in stops {
        assert_eq!(latest[&((s.ratio * 20.0).round() as u32)], s.color);
    }
}

#[test]
fn boundaries_are_synthesized_from_endpoints() {
    let mut list = ColorStopList::new();
    list.insert(0.4, red(10));
    list.insert(0.6, red(20));
    list.complete_boundaries();
    let stops = list.as_slice();
    assert_eq!(stops.len(), 4);
    assert_eq!(stops[0], ColorStop { ratio: 0.0, color: red(10) });
    assert_eq!(stops[3], ColorStop { ratio: 1.0, color: red(20) });

    // Idempotent once the boundaries exist.
    list.complete_boundaries();
    assert_eq!(list.len(), 4);
}

#[test]
fn sample_interpolates_between_bracketing_stops() {
    let mut list = ColorStopList::new();
    list.insert(0.0, Rgb8::new(0, 100, 200));
    list.insert(0.5, Rgb8::new(100, 100, 0));
    list.insert(1.0, Rgb8::new(200, 0, 0));
    list.complete_boundaries();

    assert_eq!(list.sample(0.0), [0.0, 100.0, 200.0]);
    assert_eq!(list.sample(0.25), [50.0, 100.0, 100.0]);
    assert_eq!(list.sample(0.5), [100.0, 100.0, 0.0]);
    assert_eq!(list.sample(0.75), [150.0, 50.0, 0.0]);
    assert_eq!(list.sample(1.0), [200.0, 0.0, 0.0]);
}

#[test]
fn sample_single_stop_is_constant() {
    let mut list = ColorStopList::new();
    list.insert(0.3, Rgb8::new(7, 8, 9));
    list.complete_boundaries();
    for t in [0.0, 0.3, 0.7, 1.0] {
        assert_eq!(list.sample(t), [7.0, 8.0, 9.0]);
    }
}
