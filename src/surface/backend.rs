use crate::foundation::core::{Affine, Canvas, PixelRect, Point, Rgba8};
use crate::foundation::error::{SmokeError, SmokeResult};

/// A block of straight-alpha RGBA8 pixels, tightly packed, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> SmokeResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(SmokeError::surface(format!(
                "pixel buffer of {} bytes does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[i..i + 4];
        Some(Rgba8::new(px[0], px[1], px[2], px[3]))
    }

    pub(crate) fn check_matches(&self, rect: PixelRect) -> SmokeResult<()> {
        if self.width != rect.width || self.height != rect.height {
            return Err(SmokeError::surface(format!(
                "pixel buffer is {}x{} but target rect is {}x{}",
                self.width, self.height, rect.width, rect.height
            )));
        }
        if self.data.len() != rect.pixel_count() * 4 {
            return Err(SmokeError::surface("pixel buffer length mismatch"));
        }
        Ok(())
    }
}

/// Two-circle radial paint in the coordinate space of the path it strokes.
///
/// Ratio 0 sits on the inner circle, ratio 1 on the outer one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialPaint {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub inner: Rgba8,
    pub outer: Rgba8,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba8),
    Radial(RadialPaint),
}

/// The drawing-surface contract the scene renders through.
///
/// Path building follows 2D canvas semantics: the first `line_to` after `begin_path`
/// starts the sub-path, and `stroke` uses the transform that was current when each vertex
/// was added.
pub trait Surface {
    fn canvas(&self) -> Canvas;

    /// Reset to fully transparent pixels.
    fn clear(&mut self, rect: PixelRect) -> SmokeResult<()>;

    fn set_transform(&mut self, transform: Affine);

    fn begin_path(&mut self);

    fn line_to(&mut self, p: Point);

    fn close_path(&mut self);

    fn stroke(&mut self, paint: &Paint, line_width: f64) -> SmokeResult<()>;

    fn read_pixels(&mut self, rect: PixelRect) -> SmokeResult<PixelBuffer>;

    fn write_pixels(&mut self, rect: PixelRect, pixels: &PixelBuffer) -> SmokeResult<()>;
}

pub(crate) fn check_rect(canvas: Canvas, rect: PixelRect) -> SmokeResult<()> {
    if !rect.fits_within(canvas) {
        return Err(SmokeError::surface(format!(
            "rect {rect:?} exceeds surface {}x{}",
            canvas.width, canvas.height
        )));
    }
    Ok(())
}
