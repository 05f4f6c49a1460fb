use std::time::Duration;

use crate::foundation::core::{Affine, Point};
use crate::foundation::error::SmokeResult;
use crate::foundation::rng::{RandomSource, Rng64};
use crate::gradient::conical::ConicalGradient;
use crate::scene::config::{ResolvedConfig, SmokeConfig};
use crate::scene::ring::Ring;
use crate::scene::ticker::{TickHandle, TickToken};
use crate::surface::backend::Surface;

/// What a call to [`SmokeScene::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No active tick source; nothing was drawn.
    Idle,
    /// All draws ran and the tick source is still active.
    Running,
    /// All draws ran and a ring expired, which cancelled the tick source.
    Expired,
}

/// Drives the smoke rings over a surface.
///
/// [`generate`](Self::generate) paints the background and spawns fresh rings; each
/// [`tick`](Self::tick) then strokes `draws_per_tick` more outlines on top, leaving trails.
#[derive(Debug)]
pub struct SmokeScene<R: RandomSource = Rng64> {
    config: SmokeConfig,
    rng: R,
    resolved: Option<ResolvedConfig>,
    rings: Vec<Ring>,
    draw_count: u64,
    generation: u64,
    ticker: Option<TickHandle>,
}

impl SmokeScene<Rng64> {
    pub fn with_seed(config: SmokeConfig, seed: u64) -> Self {
        Self::new(config, Rng64::new(seed))
    }
}

impl<R: RandomSource> SmokeScene<R> {
    pub fn new(config: SmokeConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            resolved: None,
            rings: Vec::new(),
            draw_count: 0,
            generation: 0,
            ticker: None,
        }
    }

    pub fn config(&self) -> &SmokeConfig {
        &self.config
    }

    /// Replace the configuration. The running scene is untouched until the next `generate`.
    pub fn set_config(&mut self, config: SmokeConfig) {
        self.config = config;
    }

    /// The configuration bound at the last `generate`.
    pub fn resolved(&self) -> Option<&ResolvedConfig> {
        self.resolved.as_ref()
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Steps taken since the last `generate`.
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    pub fn tick_handle(&self) -> Option<&TickHandle> {
        self.ticker.as_ref()
    }

    /// A token for the current tick source, for hosts that need to cancel from elsewhere.
    pub fn tick_token(&self) -> Option<TickToken> {
        self.ticker.as_ref().map(TickHandle::token)
    }

    pub fn is_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(TickHandle::is_active)
    }

    /// Cancel the tick source. Rings and pixels stay as they are.
    pub fn stop(&mut self) {
        if let Some(handle) = &self.ticker {
            handle.cancel();
            tracing::debug!(generation = handle.generation(), "tick source stopped");
        }
    }

    /// Reset the surface, paint the background, spawn rings and start a fresh tick source.
    ///
    /// Any previous tick source is cancelled first. On error the scene is left stopped.
    #[tracing::instrument(skip(self, surface), fields(generation = self.generation + 1))]
    pub fn generate(&mut self, surface: &mut dyn Surface) -> SmokeResult<()> {
        if let Some(old) = self.ticker.take() {
            old.cancel();
        }
        self.rings.clear();
        self.resolved = None;
        self.draw_count = 0;

        let canvas = surface.canvas();
        let rc = self.config.resolve(canvas)?;

        surface.set_transform(Affine::IDENTITY);
        surface.clear(canvas.full_rect())?;
        fill_background(surface, &rc)?;

        let mut rings = Vec::with_capacity(rc.cfg.ring_count as usize);
        for _ in 0..rc.cfg.ring_count {
            rings.push(Ring::spawn(&rc, &mut self.rng)?);
        }
        self.rings = rings;

        self.generation += 1;
        self.ticker = Some(TickHandle::start(
            Duration::from_millis(rc.cfg.tick_interval_ms),
            self.generation,
        ));
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            rings = self.rings.len(),
            max_max_radius = rc.max_max_radius,
            min_max_radius = rc.min_max_radius,
            "scene generated"
        );
        self.resolved = Some(rc);
        Ok(())
    }

    /// Run one tick: `draws_per_tick` steps, each advancing and stroking every ring once.
    ///
    /// A ring passing the right edge cancels the tick source, but the tick still completes.
    /// With no active tick source this is a no-op.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> SmokeResult<TickOutcome> {
        if !self.is_running() {
            return Ok(TickOutcome::Idle);
        }
        let Some(rc) = self.resolved.as_ref() else {
            return Ok(TickOutcome::Idle);
        };
        let width = rc.canvas.width;

        let mut expired = false;
        for _ in 0..rc.cfg.draws_per_tick {
            self.draw_count += 1;
            for ring in &mut self.rings {
                ring.advance(self.draw_count, rc, &mut self.rng)?;
                if ring.is_expired(width) {
                    expired = true;
                }
                ring.draw(surface, rc)?;
            }
        }

        if expired {
            if let Some(handle) = &self.ticker {
                handle.cancel();
            }
            tracing::debug!(draw_count = self.draw_count, "ring left the surface");
            return Ok(TickOutcome::Expired);
        }
        Ok(TickOutcome::Running)
    }
}

fn fill_background(surface: &mut dyn Surface, rc: &ResolvedConfig) -> SmokeResult<()> {
    let w = f64::from(rc.canvas.width);
    let h = f64::from(rc.canvas.height);
    let mut gradient = ConicalGradient::new(
        Point::new(w * 0.75, h / 2.0 * 0.75),
        0.0,
        Point::new(w / 2.0, h / 4.0),
        rc.canvas.diagonal() / 2.0,
    );
    gradient.add_color_stop(0.0, rc.cfg.background_inner);
    gradient.add_color_stop(1.0, rc.cfg.background_outer);
    gradient.fill_rect(surface, rc.canvas.full_rect())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/animator.rs"]
mod tests;
