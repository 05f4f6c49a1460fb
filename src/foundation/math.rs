pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Cosine ease-in-out: 0 at `t = 0`, 1 at `t = 1`, zero slope at both ends.
pub(crate) fn cosine_ease(t: f64) -> f64 {
    0.5 - 0.5 * (std::f64::consts::PI * t).cos()
}

/// Truncates toward zero and saturates into `0..=255`.
pub(crate) fn truncate_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.trunc().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
