//! Configuration for the guidance engine.

use serde::{Deserialize, Serialize};

use crate::error::{GuidanceError, GuidanceResult};

/// Tunable guidance parameters.
///
/// The tilt tolerance and the height display range are fixed constants
/// (see [`crate::TILT_TOLERANCE_DEGREES`] and [`crate::HEIGHT_DISPLAY_RANGE_CM`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    // === Subject Matching ===
    /// Minimum IoU for a live box to count as matching a reference box (default: 0.5)
    pub min_match_iou: f64,

    // === Height ===
    /// Whether height must be within tolerance for the aggregate verdict (default: false)
    pub height_gates_alignment: bool,

    /// Height tolerance in centimeters, only used when height gates alignment (default: 5.0)
    pub height_tolerance_cm: f64,

    // === Indicators ===
    /// Marker displacement in points per degree or centimeter (default: 1.0)
    pub indicator_scale: f64,

    /// Maximum marker displacement in points on each axis (default: 30.0)
    pub indicator_max_displacement: f64,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            min_match_iou: 0.5,
            height_gates_alignment: false,
            height_tolerance_cm: 5.0,
            indicator_scale: 1.0,
            indicator_max_displacement: 30.0,
        }
    }
}

impl GuidanceConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_match_iou: env_parse("CHALKAK_MIN_MATCH_IOU").unwrap_or(defaults.min_match_iou),
            height_gates_alignment: env_parse("CHALKAK_HEIGHT_GATES_ALIGNMENT")
                .unwrap_or(defaults.height_gates_alignment),
            height_tolerance_cm: env_parse("CHALKAK_HEIGHT_TOLERANCE_CM")
                .unwrap_or(defaults.height_tolerance_cm),
            indicator_scale: env_parse("CHALKAK_INDICATOR_SCALE")
                .unwrap_or(defaults.indicator_scale),
            indicator_max_displacement: env_parse("CHALKAK_INDICATOR_MAX_DISPLACEMENT")
                .unwrap_or(defaults.indicator_max_displacement),
        }
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> GuidanceResult<()> {
        if !(self.min_match_iou > 0.0 && self.min_match_iou <= 1.0) {
            return Err(GuidanceError::invalid_config(format!(
                "min_match_iou must be in (0, 1], got {}",
                self.min_match_iou
            )));
        }
        if !(self.height_tolerance_cm.is_finite() && self.height_tolerance_cm > 0.0) {
            return Err(GuidanceError::invalid_config(format!(
                "height_tolerance_cm must be positive, got {}",
                self.height_tolerance_cm
            )));
        }
        if !(self.indicator_scale.is_finite() && self.indicator_scale > 0.0) {
            return Err(GuidanceError::invalid_config(format!(
                "indicator_scale must be positive, got {}",
                self.indicator_scale
            )));
        }
        if !(self.indicator_max_displacement.is_finite() && self.indicator_max_displacement > 0.0) {
            return Err(GuidanceError::invalid_config(format!(
                "indicator_max_displacement must be positive, got {}",
                self.indicator_max_displacement
            )));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}
