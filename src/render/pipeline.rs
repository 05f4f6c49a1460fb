use std::time::{Duration, Instant};

use crate::foundation::error::{SmokeError, SmokeResult};
use crate::foundation::rng::RandomSource;
use crate::scene::animator::{SmokeScene, TickOutcome};
use crate::surface::backend::Surface;

/// Options for [`render_ticks`].
#[derive(Clone, Copy, Debug)]
pub struct RenderOpts {
    /// Upper bound on ticks to run; must be non-zero.
    pub max_ticks: u64,
    /// Sleep between ticks so each one takes at least the configured tick interval.
    pub realtime: bool,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            max_ticks: 1,
            realtime: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Ticks that actually drew.
    pub ticks: u64,
    /// Scene step counter when the loop ended.
    pub draws: u64,
    /// A ring left the surface during the run.
    pub expired: bool,
}

/// Drive a generated scene until its tick source is cancelled or `opts.max_ticks` is reached.
///
/// The scene must already be generated against `surface`; a stopped scene returns immediately
/// with zero ticks.
#[tracing::instrument(skip(scene, surface), fields(max_ticks = opts.max_ticks, realtime = opts.realtime))]
pub fn render_ticks<R: RandomSource>(
    scene: &mut SmokeScene<R>,
    surface: &mut dyn Surface,
    opts: RenderOpts,
) -> SmokeResult<RenderStats> {
    if opts.max_ticks == 0 {
        return Err(SmokeError::validation("max_ticks must be > 0"));
    }
    let interval = scene
        .tick_handle()
        .map(|h| h.interval())
        .unwrap_or(Duration::ZERO);

    let mut stats = RenderStats::default();
    let started = Instant::now();
    for _ in 0..opts.max_ticks {
        let tick_start = Instant::now();
        match scene.tick(surface)? {
            TickOutcome::Idle => break,
            TickOutcome::Running => stats.ticks += 1,
            TickOutcome::Expired => {
                stats.ticks += 1;
                stats.expired = true;
                break;
            }
        }
        if opts.realtime
            && let Some(rest) = interval.checked_sub(tick_start.elapsed())
        {
            std::thread::sleep(rest);
        }
    }
    stats.draws = scene.draw_count();

    tracing::info!(
        ticks = stats.ticks,
        draws = stats.draws,
        expired = stats.expired,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "render finished"
    );
    Ok(stats)
}
