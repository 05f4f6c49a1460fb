use std::path::Path;

use crate::contour::fractal::MAX_ITERATIONS;
use crate::foundation::core::{Canvas, Rgb8, Vec2};
use crate::foundation::error::{SmokeError, SmokeResult};

/// A radius that is either explicit or derived from the surface height.
///
/// Deserializes from a number or the string `"auto"`; `0` also means auto.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum RadiusSetting {
    #[default]
    Auto,
    Px(f64),
}

impl RadiusSetting {
    pub fn resolve(self, canvas: Canvas) -> f64 {
        match self {
            Self::Px(v) if v != 0.0 => v,
            _ => auto_radius(canvas),
        }
    }
}

/// Default ring radius: 80% of the surface height, as a radius.
pub fn auto_radius(canvas: Canvas) -> f64 {
    f64::from(canvas.height) * 0.8 / 2.0
}

impl serde::Serialize for RadiusSetting {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Auto => serializer.serialize_str("auto"),
            Self::Px(v) => serializer.serialize_f64(v),
        }
    }
}

impl<'de> serde::Deserialize<'de> for RadiusSetting {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(f64),
            Str(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Num(v) => Ok(Self::Px(v)),
            Raw::Str(s) if s.eq_ignore_ascii_case("auto") => Ok(Self::Auto),
            Raw::Str(s) => Err(serde::de::Error::custom(format!(
                "radius must be a number or \"auto\", got \"{s}\""
            ))),
        }
    }
}

/// Scene configuration. Every field has a default; unset radii resolve from the surface.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmokeConfig {
    pub background_inner: Rgb8,
    pub background_outer: Rgb8,
    /// Ring color at the outer radius.
    pub gradient_start: Rgb8,
    /// Ring color at the inner radius.
    pub gradient_end: Rgb8,
    pub smoke_opacity: f64,
    pub ring_count: u32,
    pub max_max_radius: RadiusSetting,
    pub min_max_radius: RadiusSetting,
    pub min_radius_factor: f64,
    pub iterations: u32,
    pub draws_per_tick: u32,
    pub line_width: f64,
    pub tick_interval_ms: u64,
    /// Radians added to each ring's phase per step.
    pub rotation_speed: f64,
    /// Pixels each ring center moves per step.
    pub drift: Vec2,
    /// Blend parameter increment per step.
    pub change_speed: f64,
    pub bob_amplitude: f64,
    /// Steps per full bob cycle.
    pub bob_period: f64,
    pub x_squeeze: f64,
    pub center_y_offset: f64,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            background_inner: Rgb8::WHITE,
            background_outer: Rgb8::new(0x66, 0x66, 0x66),
            gradient_start: Rgb8::BLACK,
            gradient_end: Rgb8::new(0x22, 0x22, 0x22),
            smoke_opacity: 0.1,
            ring_count: 1,
            max_max_radius: RadiusSetting::Auto,
            min_max_radius: RadiusSetting::Auto,
            min_radius_factor: 0.0,
            iterations: 8,
            draws_per_tick: 10,
            line_width: 2.0,
            tick_interval_ms: 1,
            rotation_speed: 0.0002,
            drift: Vec2::new(0.5, 0.04),
            change_speed: 1.0 / 250.0,
            bob_amplitude: 40.0,
            bob_period: 1000.0,
            x_squeeze: 0.75,
            center_y_offset: -50.0,
        }
    }
}

impl SmokeConfig {
    pub fn from_json_str(s: &str) -> SmokeResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| SmokeError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SmokeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SmokeError::Other(anyhow::Error::new(e).context(format!(
                "read config '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> SmokeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SmokeError::serde(e.to_string()))
    }

    pub fn validate(&self) -> SmokeResult<()> {
        if self.iterations > MAX_ITERATIONS {
            return Err(SmokeError::validation(format!(
                "iterations must be <= {MAX_ITERATIONS}"
            )));
        }
        if self.draws_per_tick == 0 {
            return Err(SmokeError::validation("draws_per_tick must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.smoke_opacity) {
            return Err(SmokeError::validation("smoke_opacity must be in [0, 1]"));
        }
        if !(self.change_speed > 0.0 && self.change_speed.is_finite()) {
            return Err(SmokeError::validation("change_speed must be finite and > 0"));
        }
        if !(self.bob_period > 0.0 && self.bob_period.is_finite()) {
            return Err(SmokeError::validation("bob_period must be finite and > 0"));
        }
        if !(self.line_width >= 0.0 && self.line_width.is_finite()) {
            return Err(SmokeError::validation("line_width must be finite and >= 0"));
        }
        if !(self.min_radius_factor >= 0.0 && self.min_radius_factor.is_finite()) {
            return Err(SmokeError::validation(
                "min_radius_factor must be finite and >= 0",
            ));
        }
        for (name, v) in [
            ("rotation_speed", self.rotation_speed),
            ("drift.x", self.drift.x),
            ("drift.y", self.drift.y),
            ("bob_amplitude", self.bob_amplitude),
            ("x_squeeze", self.x_squeeze),
            ("center_y_offset", self.center_y_offset),
        ] {
            if !v.is_finite() {
                return Err(SmokeError::validation(format!("{name} must be finite")));
            }
        }
        for (name, r) in [
            ("max_max_radius", self.max_max_radius),
            ("min_max_radius", self.min_max_radius),
        ] {
            if let RadiusSetting::Px(v) = r
                && !(v >= 0.0 && v.is_finite())
            {
                return Err(SmokeError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }

    /// Validate and replace every sentinel with a concrete value for `canvas`.
    pub fn resolve(&self, canvas: Canvas) -> SmokeResult<ResolvedConfig> {
        self.validate()?;
        let max_max_radius = self.max_max_radius.resolve(canvas);
        let min_max_radius = self.min_max_radius.resolve(canvas);
        if min_max_radius > max_max_radius {
            return Err(SmokeError::validation(format!(
                "min_max_radius ({min_max_radius}) exceeds max_max_radius ({max_max_radius})"
            )));
        }
        Ok(ResolvedConfig {
            canvas,
            max_max_radius,
            min_max_radius,
            cfg: self.clone(),
        })
    }
}

/// A validated configuration bound to one surface size.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    pub canvas: Canvas,
    pub max_max_radius: f64,
    pub min_max_radius: f64,
    pub cfg: SmokeConfig,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
