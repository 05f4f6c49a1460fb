use super::*;
use crate::foundation::rng::Rng64;

struct Constant(f64);

impl RandomSource for Constant {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

struct Cycle {
    values: Vec<f64>,
    at: usize,
}

impl RandomSource for Cycle {
    fn next_f64(&mut self) -> f64 {
        let v = self.values[self.at % self.values.len()];
        self.at += 1;
        v
    }
}

#[test]
fn point_count_doubles_per_iteration() {
    let mut rng = Rng64::new(1);
    for iterations in 0..=10 {
        let c = Contour::generate(iterations, &mut rng).unwrap();
        assert_eq!(c.len(), (1usize << iterations) + 1);
        assert_eq!(c.len(), point_count(iterations));
    }
}

#[test]
fn x_is_ordered_and_spans_unit_interval() {
    let mut rng = Rng64::new(42);
    let c = Contour::generate(7, &mut rng).unwrap();
    let pts = c.points();
    assert_eq!(pts[0].x, 0.0);
    assert_eq!(pts[pts.len() - 1].x, 1.0);
    for w in pts.windows(2) {
        assert!(w[0].x < w[1].x);
    }
}

#[test]
fn y_is_normalized_to_unit_interval() {
    for seed in 0..20 {
        let mut rng = Rng64::new(seed);
        let c = Contour::generate(6, &mut rng).unwrap();
        let min = c.points().iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max = c
            .points()
            .iter()
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(min.abs() < 1e-12, "seed {seed}: min {min}");
        assert!((max - 1.0).abs() < 1e-12, "seed {seed}: max {max}");
    }
}

#[test]
fn zero_iterations_is_flat_at_one() {
    let mut rng = Rng64::new(5);
    let c = Contour::generate(0, &mut rng).unwrap();
    assert_eq!(
        c.points(),
        &[ContourPoint { x: 0.0, y: 1.0 }, ContourPoint { x: 1.0, y: 1.0 }]
    );
}

#[test]
fn cancelling_displacement_falls_back_to_flat_line() {
    // rand() == 0.5 gives zero displacement, so every y stays at 1.
    let c = Contour::generate(4, &mut Constant(0.5)).unwrap();
    assert!(c.points().iter().all(|p| p.y == 1.0));
}

#[test]
fn single_iteration_matches_hand_computation() {
    // Midpoint y = 1 + 1 * (2 * 0.0 - 1) = 0, so normalization maps (1, 0, 1) to (1, 0, 1).
    let c = Contour::generate(1, &mut Constant(0.0)).unwrap();
    let ys: Vec<f64> = c.points().iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![1.0, 0.0, 1.0]);
    assert_eq!(c.points()[1].x, 0.5);
}

#[test]
fn displacement_scales_with_segment_width() {
    // Width 1 gives +0.5 for the midpoint; width 0.5 gives -0.125 for the quarter points.
    let mut rng = Cycle {
        values: vec![0.75, 0.375, 0.375],
        at: 0,
    };
    let c = Contour::generate(2, &mut rng).unwrap();
    // Raw y before normalization: [1, 1.125, 1.5, 1.125, 1], min 1, max 1.5.
    let ys: Vec<f64> = c.points().iter().map(|p| p.y).collect();
    let expected = [0.0, 0.25, 1.0, 0.25, 0.0];
    for (got, want) in ys.iter().zip(expected) {
        assert!((got - want).abs() < 1e-12, "{ys:?}");
    }
}

#[test]
fn same_seed_same_contour() {
    let a = Contour::generate(8, &mut Rng64::new(99)).unwrap();
    let b = Contour::generate(8, &mut Rng64::new(99)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rejects_iterations_above_cap() {
    let mut rng = Rng64::new(1);
    assert!(Contour::generate(MAX_ITERATIONS + 1, &mut rng).is_err());
}
