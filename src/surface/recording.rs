use crate::foundation::core::{Affine, Canvas, PixelRect, Point};
use crate::foundation::error::{SmokeError, SmokeResult};
use crate::surface::backend::{Paint, PixelBuffer, Surface, check_rect};

/// A stroked path as issued to the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeRecord {
    /// Transform current at stroke time.
    pub transform: Affine,
    /// Vertices in the coordinate space they were added in.
    pub local: Vec<Point>,
    /// Vertices mapped through the transform current when each was added.
    pub device: Vec<Point>,
    pub closed: bool,
    pub paint: Paint,
    pub line_width: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Clear(PixelRect),
    SetTransform(Affine),
    Stroke(StrokeRecord),
    WritePixels(PixelRect),
}

/// Surface that keeps a plain pixel buffer and records every draw command.
///
/// Strokes are recorded, not rasterized; pixel reads and writes behave like a real surface.
/// Useful for tests and for inspecting the geometry a scene emits.
#[derive(Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    pixels: Vec<u8>,
    commands: Vec<DrawCmd>,
    transform: Affine,
    path: Vec<(Point, Affine)>,
    closed: bool,
}

impl RecordingSurface {
    pub fn new(canvas: Canvas) -> SmokeResult<Self> {
        let canvas = Canvas::new(canvas.width, canvas.height)?;
        let len = (canvas.width as usize)
            .checked_mul(canvas.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| SmokeError::surface("surface buffer size overflow"))?;
        Ok(Self {
            canvas,
            pixels: vec![0; len],
            commands: Vec::new(),
            transform: Affine::IDENTITY,
            path: Vec::new(),
            closed: false,
        })
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn strokes(&self) -> impl Iterator<Item = &StrokeRecord> {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::Stroke(s) => Some(s),
            _ => None,
        })
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// The whole canvas as straight RGBA8.
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    fn row_range(&self, rect: PixelRect, row: u32) -> std::ops::Range<usize> {
        let start = ((rect.y + row) as usize * self.canvas.width as usize + rect.x as usize) * 4;
        start..start + rect.width as usize * 4
    }
}

impl Surface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self, rect: PixelRect) -> SmokeResult<()> {
        check_rect(self.canvas, rect)?;
        for row in 0..rect.height {
            let range = self.row_range(rect, row);
            self.pixels[range].fill(0);
        }
        self.commands.push(DrawCmd::Clear(rect));
        Ok(())
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
        self.commands.push(DrawCmd::SetTransform(transform));
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.closed = false;
    }

    fn line_to(&mut self, p: Point) {
        self.path.push((p, self.transform));
    }

    fn close_path(&mut self) {
        if !self.path.is_empty() {
            self.closed = true;
        }
    }

    fn stroke(&mut self, paint: &Paint, line_width: f64) -> SmokeResult<()> {
        if !line_width.is_finite() || line_width < 0.0 {
            return Err(SmokeError::validation(format!(
                "line width must be finite and >= 0, got {line_width}"
            )));
        }
        self.commands.push(DrawCmd::Stroke(StrokeRecord {
            transform: self.transform,
            local: self.path.iter().map(|&(p, _)| p).collect(),
            device: self.path.iter().map(|&(p, t)| t * p).collect(),
            closed: self.closed,
            paint: *paint,
            line_width,
        }));
        Ok(())
    }

    fn read_pixels(&mut self, rect: PixelRect) -> SmokeResult<PixelBuffer> {
        check_rect(self.canvas, rect)?;
        let mut data = Vec::with_capacity(rect.pixel_count() * 4);
        for row in 0..rect.height {
            data.extend_from_slice(&self.pixels[self.row_range(rect, row)]);
        }
        PixelBuffer::from_rgba8(rect.width, rect.height, data)
    }

    fn write_pixels(&mut self, rect: PixelRect, pixels: &PixelBuffer) -> SmokeResult<()> {
        check_rect(self.canvas, rect)?;
        pixels.check_matches(rect)?;
        let row_bytes = rect.width as usize * 4;
        for row in 0..rect.height {
            let range = self.row_range(rect, row);
            let src = &pixels.data[row as usize * row_bytes..(row as usize + 1) * row_bytes];
            self.pixels[range].copy_from_slice(src);
        }
        self.commands.push(DrawCmd::WritePixels(rect));
        Ok(())
    }
}
