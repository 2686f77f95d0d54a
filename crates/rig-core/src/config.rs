//! Configuration surface for the rig.
//!
//! Every field is optional when deserializing; missing keys fall back to the
//! defaults in [`crate::constants`]. Keys are camelCase and flat, so a page can
//! pass `{"sensitivity": 0.3, "positionFactor": 0.2}` straight through.

use crate::constants::*;
use crate::error::ConfigError;
use glam::Vec3;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SmoothingConfig {
    pub sensitivity: f32,
    pub smoothing_factor: f32,
    pub throttle_ms: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
            throttle_ms: DEFAULT_THROTTLE_MS,
        }
    }
}

/// Interpolation factors for the camera controller.
///
/// When only `positionFactor` is supplied, `orientationFactor` follows it at
/// half the rate.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "CameraLerpFields")]
pub struct CameraLerpConfig {
    pub position_factor: f32,
    pub orientation_factor: f32,
}

impl CameraLerpConfig {
    pub fn from_position_factor(position_factor: f32) -> Self {
        Self {
            position_factor,
            orientation_factor: position_factor * 0.5,
        }
    }
}

impl Default for CameraLerpConfig {
    fn default() -> Self {
        Self {
            position_factor: DEFAULT_POSITION_FACTOR,
            orientation_factor: DEFAULT_ORIENTATION_FACTOR,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CameraLerpFields {
    position_factor: Option<f32>,
    orientation_factor: Option<f32>,
}

impl From<CameraLerpFields> for CameraLerpConfig {
    fn from(f: CameraLerpFields) -> Self {
        match (f.position_factor, f.orientation_factor) {
            (None, None) => Self::default(),
            (Some(p), None) => {
                let derived = Self::from_position_factor(p);
                log::warn!(
                    "[config] orientationFactor not set, using {} (half of positionFactor)",
                    derived.orientation_factor
                );
                derived
            }
            (p, Some(o)) => Self {
                position_factor: p.unwrap_or(DEFAULT_POSITION_FACTOR),
                orientation_factor: o,
            },
        }
    }
}

/// Rest pose the parallax offset is applied to.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetConfig {
    pub base_position: Vec3,
    pub base_look_at: Vec3,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_position: DEFAULT_BASE_POSITION,
            base_look_at: DEFAULT_BASE_LOOK_AT,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct RigOptions {
    #[serde(flatten)]
    pub smoothing: SmoothingConfig,
    #[serde(flatten)]
    pub camera: CameraLerpConfig,
    #[serde(flatten)]
    pub target: TargetConfig,
}

impl RigOptions {
    /// Parse and validate options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: RigOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.smoothing;
        if !s.sensitivity.is_finite() {
            return Err(ConfigError::InvalidSensitivity(s.sensitivity));
        }
        if !(s.throttle_ms.is_finite() && s.throttle_ms >= 0.0) {
            return Err(ConfigError::InvalidThrottle(s.throttle_ms));
        }
        check_factor("smoothingFactor", s.smoothing_factor)?;
        check_factor("positionFactor", self.camera.position_factor)?;
        check_factor("orientationFactor", self.camera.orientation_factor)?;
        if !self.target.base_position.is_finite() {
            return Err(ConfigError::NonFiniteTarget {
                name: "basePosition",
            });
        }
        if !self.target.base_look_at.is_finite() {
            return Err(ConfigError::NonFiniteTarget { name: "baseLookAt" });
        }
        Ok(())
    }
}

// NaN fails both comparisons, so it is rejected here too.
fn check_factor(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidFactor { name, value })
    }
}
