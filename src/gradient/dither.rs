use crate::foundation::math::truncate_channel;

const RIGHT: f64 = 7.0 / 16.0;
const BELOW_LEFT: f64 = 3.0 / 16.0;
const BELOW: f64 = 5.0 / 16.0;
const BELOW_RIGHT: f64 = 1.0 / 16.0;

/// Quantize one float channel to 8 bits with Floyd–Steinberg error diffusion.
///
/// `source` is never written; diffused error lives in a separate accumulator so the scan
/// reads `source[i] + carry[i]` and only pushes into pixels it has not visited yet.
/// Neighbors outside the `width × height` block are dropped.
pub(crate) fn floyd_steinberg(source: &[f64], width: usize, height: usize) -> Vec<u8> {
    debug_assert_eq!(source.len(), width * height);
    let mut carry = vec![0.0f64; source.len()];
    let mut out = vec![0u8; source.len()];

    for y in 0..height {
        let row = y * width;
        let has_below = y + 1 < height;
        for x in 0..width {
            let i = row + x;
            let value = source[i] + carry[i];
            let level = truncate_channel(value);
            out[i] = level;
            let err = value - f64::from(level);
            if err == 0.0 {
                continue;
            }

            if x + 1 < width {
                carry[i + 1] += RIGHT * err;
            }
            if has_below {
                let below = i + width;
                if x > 0 {
                    carry[below - 1] += BELOW_LEFT * err;
                }
                carry[below] += BELOW * err;
                if x + 1 < width {
                    carry[below + 1] += BELOW_RIGHT * err;
                }
            }
        }
    }

    out
}
