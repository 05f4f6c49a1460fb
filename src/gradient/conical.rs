use crate::foundation::core::{PixelRect, Point, Rgb8};
use crate::foundation::error::SmokeResult;
use crate::gradient::dither::floyd_steinberg;
use crate::gradient::stops::{ColorStop, ColorStopList};
use crate::surface::backend::{PixelBuffer, Surface};

/// Ratio assigned to pixels no circle of the family passes through.
pub const UNDEFINED_RATIO: f64 = 1.0;

/// Two-circle ("conical") gradient rasterized on the CPU with Floyd–Steinberg dithering.
///
/// For every pixel the gradient solves for the interpolation fraction `t` at which the circle
/// blended between the start and end circles passes through the pixel, then maps `t` through
/// the color stops. Pixels outside the family (negative discriminant) get
/// [`UNDEFINED_RATIO`].
#[derive(Clone, Debug)]
pub struct ConicalGradient {
    start: Point,
    start_radius: f64,
    end: Point,
    end_radius: f64,
    stops: ColorStopList,
}

impl ConicalGradient {
    pub fn new(start: Point, start_radius: f64, end: Point, end_radius: f64) -> Self {
        Self {
            start,
            start_radius,
            end,
            end_radius,
            stops: ColorStopList::new(),
        }
    }

    /// Add a stop; ratios outside `[0, 1]` are ignored.
    pub fn add_color_stop(&mut self, ratio: f64, color: Rgb8) {
        self.stops.insert(ratio, color);
    }

    pub fn stops(&self) -> &[ColorStop] {
        self.stops.as_slice()
    }

    /// Interpolation fraction for the pixel at `(px, py)`, clamped to `[0, 1]`.
    pub fn ratio_at(&self, px: f64, py: f64) -> f64 {
        let x_diff = self.end.x - self.start.x;
        let y_diff = self.end.y - self.start.y;
        let r_diff = self.end_radius - self.start_radius;
        let a = r_diff * r_diff - x_diff * x_diff - y_diff * y_diff;

        let dx = px - self.start.x;
        let dy = py - self.start.y;
        let b = 2.0 * self.start_radius * r_diff + 2.0 * (dx * x_diff + dy * y_diff);
        let c = self.start_radius * self.start_radius - dx * dx - dy * dy;

        let t = if a == 0.0 {
            // Internally tangent circles: the quadratic collapses to `b·t + c = 0`.
            if b == 0.0 { f64::NAN } else { -c / b }
        } else {
            let discriminant = b * b - 4.0 * a * c;
            if discriminant < 0.0 {
                f64::NAN
            } else {
                (-b + discriminant.sqrt()) / (2.0 * a)
            }
        };

        if t.is_finite() {
            t.clamp(0.0, 1.0)
        } else {
            UNDEFINED_RATIO
        }
    }

    /// Fill `rect` (clipped to the surface) with the dithered gradient, alpha fully opaque.
    ///
    /// Does nothing without color stops. Missing stops at ratio 0 and 1 are synthesized
    /// first and stay in the stop list afterwards.
    #[tracing::instrument(skip(self, surface), fields(stops = self.stops.len()))]
    pub fn fill_rect(&mut self, surface: &mut dyn Surface, rect: PixelRect) -> SmokeResult<()> {
        if self.stops.is_empty() {
            return Ok(());
        }
        let rect = rect.clip_to(surface.canvas());
        if rect.is_empty() {
            return Ok(());
        }
        self.stops.complete_boundaries();

        let (w, h) = (rect.width as usize, rect.height as usize);
        let mut red = Vec::with_capacity(w * h);
        let mut green = Vec::with_capacity(w * h);
        let mut blue = Vec::with_capacity(w * h);
        for row in 0..rect.height {
            let py = f64::from(rect.y + row);
            for col in 0..rect.width {
                let px = f64::from(rect.x + col);
                let [r, g, b] = self.stops.sample(self.ratio_at(px, py));
                red.push(r);
                green.push(g);
                blue.push(b);
            }
        }

        let red = floyd_steinberg(&red, w, h);
        let green = floyd_steinberg(&green, w, h);
        let blue = floyd_steinberg(&blue, w, h);

        let mut pixels: PixelBuffer = surface.read_pixels(rect)?;
        for (i, px) in pixels.data.chunks_exact_mut(4).enumerate() {
            px.copy_from_slice(&[red[i], green[i], blue[i], 255]);
        }
        surface.write_pixels(rect, &pixels)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gradient/conical.rs"]
mod tests;
