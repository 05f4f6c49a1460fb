use std::sync::Arc;

use crate::foundation::core::{Affine, Canvas, PixelRect, Point, Rgba8, Rgba8Premul};
use crate::foundation::error::{SmokeError, SmokeResult};
use crate::surface::backend::{Paint, PixelBuffer, Surface, check_rect};

/// Radii closer than this render as a solid paint instead of a radial one.
const DEGENERATE_RADIAL_EPS: f64 = 1e-6;

/// CPU surface powered by `vello_cpu`.
///
/// Strokes are batched into a pending render context that starts by drawing the current
/// pixmap, so they composite over whatever the surface already holds. Any pixel access
/// flushes the batch first.
pub struct CpuSurface {
    canvas: Canvas,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    pending: Option<vello_cpu::RenderContext>,
    transform: Affine,
    path: vello_cpu::kurbo::BezPath,
    has_current_point: bool,
}

impl CpuSurface {
    pub fn new(canvas: Canvas) -> SmokeResult<Self> {
        let canvas = Canvas::new(canvas.width, canvas.height)?;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| SmokeError::surface("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| SmokeError::surface("surface height exceeds u16"))?;
        Ok(Self {
            canvas,
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
            pending: None,
            transform: Affine::IDENTITY,
            path: vello_cpu::kurbo::BezPath::new(),
            has_current_point: false,
        })
    }

    /// Composite all batched strokes into the pixmap.
    pub fn flush(&mut self) {
        if let Some(mut ctx) = self.pending.take() {
            ctx.flush();
            ctx.render_to_pixmap(&mut self.pixmap);
        }
    }

    fn pending_ctx(&mut self) -> &mut vello_cpu::RenderContext {
        let (width, height) = (self.width, self.height);
        let pixmap = &self.pixmap;
        self.pending
            .get_or_insert_with(|| base_context(pixmap, width, height))
    }

    fn row_range(&self, rect: PixelRect, row: u32) -> std::ops::Range<usize> {
        let start = ((rect.y + row) as usize * self.canvas.width as usize + rect.x as usize) * 4;
        start..start + rect.width as usize * 4
    }
}

impl Surface for CpuSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self, rect: PixelRect) -> SmokeResult<()> {
        check_rect(self.canvas, rect)?;
        self.flush();
        for row in 0..rect.height {
            let range = self.row_range(rect, row);
            self.pixmap.data_as_u8_slice_mut()[range].fill(0);
        }
        self.pixmap.set_may_have_opacities(true);
        Ok(())
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn begin_path(&mut self) {
        self.path = vello_cpu::kurbo::BezPath::new();
        self.has_current_point = false;
    }

    fn line_to(&mut self, p: Point) {
        let p = point_to_cpu(self.transform * p);
        if self.has_current_point {
            self.path.line_to(p);
        } else {
            self.path.move_to(p);
            self.has_current_point = true;
        }
    }

    fn close_path(&mut self) {
        if self.has_current_point {
            self.path.close_path();
        }
    }

    fn stroke(&mut self, paint: &Paint, line_width: f64) -> SmokeResult<()> {
        if !line_width.is_finite() || line_width < 0.0 {
            return Err(SmokeError::validation(format!(
                "line width must be finite and >= 0, got {line_width}"
            )));
        }
        if !self.has_current_point || line_width == 0.0 {
            return Ok(());
        }
        let paint_transform = affine_to_cpu(self.transform);
        let cpu_paint = paint_to_cpu(paint);
        let path = self.path.clone();
        let ctx = self.pending_ctx();
        // Vertices are already in device space; the paint stays in path-local space.
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(paint_transform);
        ctx.set_paint(cpu_paint);
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(line_width));
        ctx.stroke_path(&path);
        Ok(())
    }

    fn read_pixels(&mut self, rect: PixelRect) -> SmokeResult<PixelBuffer> {
        check_rect(self.canvas, rect)?;
        self.flush();
        let mut out = PixelBuffer::new(rect.width, rect.height);
        let row_bytes = rect.width as usize * 4;
        for row in 0..rect.height {
            let range = self.row_range(rect, row);
            let src = &self.pixmap.data_as_u8_slice()[range];
            let dst = &mut out.data[row as usize * row_bytes..(row as usize + 1) * row_bytes];
            for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                let straight = Rgba8Premul {
                    r: s[0],
                    g: s[1],
                    b: s[2],
                    a: s[3],
                }
                .to_straight();
                d.copy_from_slice(&straight.to_array());
            }
        }
        Ok(out)
    }

    fn write_pixels(&mut self, rect: PixelRect, pixels: &PixelBuffer) -> SmokeResult<()> {
        check_rect(self.canvas, rect)?;
        pixels.check_matches(rect)?;
        self.flush();
        let row_bytes = rect.width as usize * 4;
        for row in 0..rect.height {
            let range = self.row_range(rect, row);
            let src = &pixels.data[row as usize * row_bytes..(row as usize + 1) * row_bytes];
            let dst = &mut self.pixmap.data_as_u8_slice_mut()[range];
            for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                let p = Rgba8Premul::from_straight(Rgba8::new(s[0], s[1], s[2], s[3]));
                d.copy_from_slice(&[p.r, p.g, p.b, p.a]);
            }
        }
        self.pixmap.set_may_have_opacities(true);
        Ok(())
    }
}

fn base_context(pixmap: &vello_cpu::Pixmap, width: u16, height: u16) -> vello_cpu::RenderContext {
    // The u8 pipeline drops alpha under repeated translucent compositing.
    let settings = vello_cpu::RenderSettings {
        render_mode: vello_cpu::RenderMode::OptimizeQuality,
        ..vello_cpu::RenderSettings::default()
    };
    let mut ctx = vello_cpu::RenderContext::new_with(width, height, settings);
    let base = vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap.clone())),
        sampler: vello_cpu::peniko::ImageSampler {
            quality: vello_cpu::peniko::ImageQuality::Low,
            ..vello_cpu::peniko::ImageSampler::default()
        },
    };
    ctx.set_paint(base);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(width),
        f64::from(height),
    ));
    ctx
}

fn paint_to_cpu(paint: &Paint) -> vello_cpu::PaintType {
    match *paint {
        Paint::Solid(c) => color_to_cpu(c).into(),
        Paint::Radial(r) => {
            if (r.outer_radius - r.inner_radius).abs() < DEGENERATE_RADIAL_EPS {
                return color_to_cpu(r.outer).into();
            }
            let center = point_to_cpu(r.center);
            vello_cpu::peniko::Gradient::new_two_point_radial(
                center,
                r.inner_radius as f32,
                center,
                r.outer_radius as f32,
            )
            .with_stops([(0.0f32, color_to_cpu(r.inner)), (1.0f32, color_to_cpu(r.outer))])
            .into()
        }
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/surface/cpu.rs"]
mod tests;
