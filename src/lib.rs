#![forbid(unsafe_code)]
//! Animated smoke-ring backgrounds.
//!
//! A [`SmokeScene`] paints a dithered two-circle gradient background onto a [`Surface`], then
//! on every tick strokes translucent fractal rings that morph, rotate and drift across it.
//! Drawing goes through the [`Surface`] trait; [`CpuSurface`] rasterizes with `vello_cpu` and
//! [`RecordingSurface`] records geometry for inspection.
//!
//! ```no_run
//! use smokeveil::{Canvas, CpuSurface, RenderOpts, SmokeConfig, SmokeScene};
//!
//! let mut surface = CpuSurface::new(Canvas::new(640, 360)?)?;
//! let mut scene = SmokeScene::with_seed(SmokeConfig::default(), 7);
//! scene.generate(&mut surface)?;
//! smokeveil::render_ticks(&mut scene, &mut surface, RenderOpts { max_ticks: 200, realtime: false })?;
//! let frame = smokeveil::snapshot(&mut surface, 640, 360)?;
//! # Ok::<(), smokeveil::SmokeError>(())
//! ```

mod contour;
mod foundation;
mod gradient;
mod render;
mod scene;
mod surface;

pub use contour::fractal::{Contour, ContourPoint, MAX_ITERATIONS, point_count};
pub use foundation::core::{
    Affine, Canvas, PixelRect, Point, Rect, Rgb8, Rgba8, Rgba8Premul, Vec2,
};
pub use foundation::error::{SmokeError, SmokeResult};
pub use foundation::rng::{RandomSource, Rng64};
pub use gradient::conical::{ConicalGradient, UNDEFINED_RATIO};
pub use gradient::stops::{ColorStop, ColorStopList};
pub use render::export::{FrameRGBA, snapshot};
pub use render::pipeline::{RenderOpts, RenderStats, render_ticks};
pub use scene::animator::{SmokeScene, TickOutcome};
pub use scene::config::{RadiusSetting, ResolvedConfig, SmokeConfig, auto_radius};
pub use scene::ring::{Ring, RingParts};
pub use scene::ticker::{TickHandle, TickToken};
pub use surface::backend::{Paint, PixelBuffer, RadialPaint, Surface};
pub use surface::cpu::CpuSurface;
pub use surface::recording::{DrawCmd, RecordingSurface, StrokeRecord};
