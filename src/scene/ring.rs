use std::f64::consts::TAU;

use crate::contour::fractal::Contour;
use crate::foundation::core::{Affine, Point};
use crate::foundation::error::{SmokeError, SmokeResult};
use crate::foundation::math::{cosine_ease, lerp};
use crate::foundation::rng::RandomSource;
use crate::scene::config::ResolvedConfig;
use crate::surface::backend::{Paint, RadialPaint, Surface};

/// Initial state for a [`Ring`].
#[derive(Clone, Debug)]
pub struct RingParts {
    pub center: Point,
    pub min_radius: f64,
    pub max_radius: f64,
    pub phase: f64,
    pub global_phase: f64,
    pub change_speed: f64,
    pub paint: RadialPaint,
    pub current: Contour,
    pub next: Contour,
}

/// One smoke ring: a closed fractal contour that morphs between two shapes while drifting.
#[derive(Clone, Debug)]
pub struct Ring {
    center: Point,
    min_radius: f64,
    max_radius: f64,
    phase: f64,
    global_phase: f64,
    param: f64,
    change_speed: f64,
    bob: f64,
    paint: RadialPaint,
    current: Contour,
    next: Contour,
}

impl Ring {
    pub fn new(parts: RingParts) -> SmokeResult<Self> {
        check_same_len(&parts.current, &parts.next)?;
        Ok(Self {
            center: parts.center,
            min_radius: parts.min_radius,
            max_radius: parts.max_radius,
            phase: parts.phase,
            global_phase: parts.global_phase,
            param: 0.0,
            change_speed: parts.change_speed,
            bob: 0.0,
            paint: parts.paint,
            current: parts.current,
            next: parts.next,
        })
    }

    /// Randomized ring parked just off the left edge, as set up by scene generation.
    pub fn spawn(rc: &ResolvedConfig, rng: &mut impl RandomSource) -> SmokeResult<Self> {
        let cfg = &rc.cfg;
        let max_radius =
            rc.min_max_radius + rng.next_f64() * (rc.max_max_radius - rc.min_max_radius);
        let min_radius = cfg.min_radius_factor * max_radius;
        let phase = rng.next_f64() * TAU;
        let global_phase = rng.next_f64() * TAU;
        let current = Contour::generate(cfg.iterations, rng)?;
        let next = Contour::generate(cfg.iterations, rng)?;

        Self::new(RingParts {
            center: Point::new(
                -max_radius,
                f64::from(rc.canvas.height) / 2.0 + cfg.center_y_offset,
            ),
            min_radius,
            max_radius,
            phase,
            global_phase,
            change_speed: cfg.change_speed,
            paint: RadialPaint {
                center: Point::ZERO,
                inner_radius: min_radius,
                outer_radius: max_radius,
                inner: cfg.gradient_end.with_opacity(cfg.smoke_opacity),
                outer: cfg.gradient_start.with_opacity(cfg.smoke_opacity),
            },
            current,
            next,
        })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn min_radius(&self) -> f64 {
        self.min_radius
    }

    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Blend parameter, always in `[0, 1)` between steps.
    pub fn param(&self) -> f64 {
        self.param
    }

    /// Vertical offset applied at the last step.
    pub fn bob(&self) -> f64 {
        self.bob
    }

    pub fn paint(&self) -> &RadialPaint {
        &self.paint
    }

    pub fn current(&self) -> &Contour {
        &self.current
    }

    pub fn next(&self) -> &Contour {
        &self.next
    }

    /// Advance the blend and motion cycles by one step.
    ///
    /// `draw_count` is the scene's step counter after incrementing for this step.
    pub fn advance(
        &mut self,
        draw_count: u64,
        rc: &ResolvedConfig,
        rng: &mut impl RandomSource,
    ) -> SmokeResult<()> {
        let cfg = &rc.cfg;

        self.param += self.change_speed;
        if self.param >= 1.0 {
            let fresh = Contour::generate(cfg.iterations, rng)?;
            check_same_len(&self.next, &fresh)?;
            self.param = 0.0;
            self.current = std::mem::replace(&mut self.next, fresh);
        }

        self.phase += cfg.rotation_speed;
        self.center += cfg.drift;
        self.bob = cfg.bob_amplitude
            * (self.global_phase + draw_count as f64 / cfg.bob_period * TAU).sin();
        Ok(())
    }

    /// The outline for the current blend, in ring-local coordinates.
    pub fn vertices(&self, x_squeeze: f64) -> Vec<Point> {
        let w = cosine_ease(self.param);
        let span = self.max_radius - self.min_radius;
        self.current
            .points()
            .iter()
            .zip(self.next.points())
            .enumerate()
            .map(|(i, (a, b))| {
                let theta = if i == 0 {
                    self.phase
                } else {
                    TAU * lerp(a.x, b.x, w) + self.phase
                };
                let r = self.min_radius + lerp(a.y, b.y, w) * span;
                Point::new(x_squeeze * r * theta.cos(), r * theta.sin())
            })
            .collect()
    }

    pub fn transform(&self) -> Affine {
        Affine::translate((self.center.x, self.center.y + self.bob))
    }

    pub fn draw(&self, surface: &mut dyn Surface, rc: &ResolvedConfig) -> SmokeResult<()> {
        surface.set_transform(self.transform());
        surface.begin_path();
        for p in self.vertices(rc.cfg.x_squeeze) {
            surface.line_to(p);
        }
        surface.close_path();
        surface.stroke(&Paint::Radial(self.paint), rc.cfg.line_width)
    }

    /// The center has left the surface on the right, by at least the ring's own radius.
    pub fn is_expired(&self, surface_width: u32) -> bool {
        self.center.x >= f64::from(surface_width) + self.max_radius
    }
}

fn check_same_len(a: &Contour, b: &Contour) -> SmokeResult<()> {
    if a.len() != b.len() {
        return Err(SmokeError::fault(format!(
            "ring contours differ in length ({} vs {})",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/ring.rs"]
mod tests;
