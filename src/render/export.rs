use crate::foundation::core::PixelRect;
use crate::foundation::error::{SmokeError, SmokeResult};
use crate::surface::backend::Surface;

/// An owned RGBA8 image, row-major and tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// Copy the top-left `width × height` region of the surface into a straight-alpha frame.
///
/// Parts of the region past the surface edge come back fully transparent.
pub fn snapshot(surface: &mut dyn Surface, width: u32, height: u32) -> SmokeResult<FrameRGBA> {
    if width == 0 || height == 0 {
        return Err(SmokeError::validation(format!(
            "snapshot must be non-empty, got {width}x{height}"
        )));
    }
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| SmokeError::validation("snapshot size overflow"))?;
    let mut data = vec![0u8; len];

    let visible = PixelRect::new(0, 0, width, height).clip_to(surface.canvas());
    if !visible.is_empty() {
        let px = surface.read_pixels(visible)?;
        let src_row = visible.width as usize * 4;
        let dst_row = width as usize * 4;
        for (y, row) in px.data.chunks_exact(src_row).enumerate() {
            data[y * dst_row..y * dst_row + src_row].copy_from_slice(row);
        }
    }

    Ok(FrameRGBA {
        width,
        height,
        data,
        premultiplied: false,
    })
}
