use std::path::Path;

use serde::{Deserialize, Serialize};

/// Flight speed with the left index trigger held, in world units per second.
pub const FAST_MOVE_SPEED: f32 = 20.0;
/// Flight speed without the trigger.
pub const SLOW_MOVE_SPEED: f32 = 1.0;
/// Smallest viewer scale.
pub const MIN_SCALE: f32 = 1.0;
/// Largest viewer scale.
pub const MAX_SCALE: f32 = 100.0;

/// Errors from loading or validating a `LocomotionConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidSpeed { name: &'static str, value: f32 },
    #[error("min_scale must be finite and positive, got {0}")]
    InvalidMinScale(f32),
    #[error("scale range is empty: min_scale {min} > max_scale {max}")]
    InvertedScaleRange { min: f32, max: f32 },
}

/// Tuning for the locomotion controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub fast_move_speed: f32,
    pub slow_move_speed: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Apply the crawl drag on ticks the two-hand scale gesture already
    /// claimed. Off by default: the scale gesture owns the rig while both
    /// grips are held.
    pub crawl_during_scale: bool,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            fast_move_speed: FAST_MOVE_SPEED,
            slow_move_speed: SLOW_MOVE_SPEED,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            crawl_during_scale: false,
        }
    }
}

impl LocomotionConfig {
    /// Parse and validate a config from JSON text. Missing fields take their
    /// defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("fast_move_speed", self.fast_move_speed),
            ("slow_move_speed", self.slow_move_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidSpeed { name, value });
            }
        }
        if !self.min_scale.is_finite() || self.min_scale <= 0.0 {
            return Err(ConfigError::InvalidMinScale(self.min_scale));
        }
        if self.max_scale.is_nan() || self.min_scale > self.max_scale {
            return Err(ConfigError::InvertedScaleRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        Ok(())
    }

    /// Clamp `scale` into the configured range. NaN maps to `min_scale`.
    ///
    /// Never panics, even for a config that fails `validate`.
    pub fn clamp_scale(&self, scale: f32) -> f32 {
        if scale.is_nan() {
            return self.min_scale;
        }
        scale.max(self.min_scale).min(self.max_scale)
    }
}
