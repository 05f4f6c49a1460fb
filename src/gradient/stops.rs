use crate::foundation::core::Rgb8;
use crate::foundation::math::lerp;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub ratio: f64,
    pub color: Rgb8,
}

/// Stops kept sorted by ratio with at most one stop per ratio.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorStopList {
    stops: Vec<ColorStop>,
}

impl ColorStopList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a stop in ratio order, replacing any stop at the same ratio.
    ///
    /// Ratios outside `[0, 1]` (and NaN) are ignored.
    pub fn insert(&mut self, ratio: f64, color: Rgb8) {
        if !(0.0..=1.0).contains(&ratio) {
            return;
        }
        let stop = ColorStop { ratio, color };
        match self.stops.iter().position(|s| ratio <= s.ratio) {
            Some(i) if self.stops[i].ratio == ratio => self.stops[i] = stop,
            Some(i) => self.stops.insert(i, stop),
            None => self.stops.push(stop),
        }
    }

    pub fn as_slice(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Make sure stops exist at ratio 0 and ratio 1, cloning the nearest endpoint's color.
    pub(crate) fn complete_boundaries(&mut self) {
        if let Some(&first) = self.stops.first()
            && first.ratio != 0.0
        {
            self.stops.insert(
                0,
                ColorStop {
                    ratio: 0.0,
                    color: first.color,
                },
            );
        }
        if let Some(&last) = self.stops.last()
            && last.ratio != 1.0
        {
            self.stops.push(ColorStop {
                ratio: 1.0,
                color: last.color,
            });
        }
    }

    /// Interpolated color at `t ∈ [0, 1]` as float channels.
    ///
    /// Expects [`complete_boundaries`](Self::complete_boundaries) to have run.
    pub(crate) fn sample(&self, t: f64) -> [f64; 3] {
        let stops = &self.stops;
        let Some(last) = stops.last() else {
            return [0.0; 3];
        };
        if stops.len() == 1 || t >= 1.0 {
            return channels(last.color);
        }
        let hi = stops
            .iter()
            .position(|s| t < s.ratio)
            .unwrap_or(stops.len() - 1)
            .max(1);
        let (s0, s1) = (stops[hi - 1], stops[hi]);
        let f = (t - s0.ratio) / (s1.ratio - s0.ratio);
        let (c0, c1) = (channels(s0.color), channels(s1.color));
        [
            lerp(c0[0], c1[0], f),
            lerp(c0[1], c1[1], f),
            lerp(c0[2], c1[2], f),
        ]
    }
}

fn channels(c: Rgb8) -> [f64; 3] {
    [f64::from(c.r), f64::from(c.g), f64::from(c.b)]
}

#[cfg(test)]
#[path = "../../tests/unit/gradient/stops.rs"]
mod tests;
