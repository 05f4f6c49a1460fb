use crate::foundation::error::{SmokeError, SmokeResult};
use crate::foundation::rng::RandomSource;

/// Upper bound on subdivision depth; a contour holds `2^iterations + 1` points.
pub const MAX_ITERATIONS: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContourPoint {
    pub x: f64,
    pub y: f64,
}

/// A fractal line over `x ∈ [0, 1]` with `y` normalized into `[0, 1]`.
///
/// Points are ordered by `x`; the first point is at `x = 0` and the last at `x = 1`. Closing
/// the line into a ring is left to the caller, which maps `x` to an angle.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    points: Vec<ContourPoint>,
}

impl Contour {
    /// Generate a contour by 1D midpoint displacement.
    ///
    /// Each pass inserts a midpoint between every adjacent pair, displaced by a uniform
    /// offset in `[-width, width)` where `width` is the pair's x-extent, so roughness
    /// shrinks with scale.
    pub fn generate(iterations: u32, rng: &mut impl RandomSource) -> SmokeResult<Self> {
        if iterations > MAX_ITERATIONS {
            return Err(SmokeError::validation(format!(
                "contour iterations must be <= {MAX_ITERATIONS}, got {iterations}"
            )));
        }

        let mut points = vec![ContourPoint { x: 0.0, y: 1.0 }, ContourPoint { x: 1.0, y: 1.0 }];
        let mut scratch = Vec::with_capacity(point_count(iterations));
        let mut min_y = 1.0f64;
        let mut max_y = 1.0f64;

        for _ in 0..iterations {
            scratch.clear();
            for pair in points.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let width = b.x - a.x;
                let y = 0.5 * (a.y + b.y) + width * (rng.next_f64() * 2.0 - 1.0);
                min_y = min_y.min(y);
                max_y = max_y.max(y);
                scratch.push(a);
                scratch.push(ContourPoint {
                    x: 0.5 * (a.x + b.x),
                    y,
                });
            }
            if let Some(&last) = points.last() {
                scratch.push(last);
            }
            std::mem::swap(&mut points, &mut scratch);
        }

        if max_y != min_y {
            let rate = 1.0 / (max_y - min_y);
            for p in &mut points {
                p.y = rate * (p.y - min_y);
            }
        } else {
            for p in &mut points {
                p.y = 1.0;
            }
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[ContourPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Number of points produced by `iterations` subdivision passes.
pub fn point_count(iterations: u32) -> usize {
    (1usize << iterations.min(MAX_ITERATIONS)) + 1
}

#[cfg(test)]
#[path = "../../tests/unit/contour/fractal.rs"]
mod tests;
