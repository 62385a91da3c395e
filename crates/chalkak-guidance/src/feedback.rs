//! Mapping from alignment state to on-screen feedback indicators.
//!
//! The tilt indicator is a small marker displaced from a fixed guide marker
//! by the tilt offsets; the height indicator is a vertical displacement shown
//! only once the ground anchor is established. Rendering is left to the UI.

use chalkak_models::AlignmentSnapshot;
use serde::Serialize;

use crate::config::GuidanceConfig;

/// Indicator tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorTint {
    /// Highlighted (within tolerance / aligned)
    Aligned,
    /// Default appearance
    #[default]
    Neutral,
}

impl IndicatorTint {
    fn from_flag(flag: bool) -> Self {
        if flag {
            Self::Aligned
        } else {
            Self::Neutral
        }
    }
}

/// Marker displacement relative to the fixed guide marker, in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MarkerDisplacement {
    pub dx: f64,
    pub dy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TiltIndicator {
    pub displacement: MarkerDisplacement,
    pub tint: IndicatorTint,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeightIndicator {
    pub displacement: MarkerDisplacement,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FeedbackIndicators {
    /// Absent until a tilt offset exists
    pub tilt: Option<TiltIndicator>,
    /// Absent until the ground is found and a height offset exists
    pub height: Option<HeightIndicator>,
    /// Whole-frame tint driven by the aggregate verdict
    pub frame_tint: IndicatorTint,
}

/// Converts offsets into marker displacements.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackMapper {
    scale: f64,
    max_displacement: f64,
}

impl FeedbackMapper {
    pub fn new(scale: f64, max_displacement: f64) -> Self {
        Self {
            scale,
            max_displacement,
        }
    }

    pub fn from_config(config: &GuidanceConfig) -> Self {
        Self::new(config.indicator_scale, config.indicator_max_displacement)
    }

    /// Build indicators for a snapshot.
    pub fn map(&self, snapshot: &AlignmentSnapshot) -> FeedbackIndicators {
        let offsets = &snapshot.offsets;

        let tilt = match (offsets.offset_x, offsets.offset_z) {
            (Some(x), Some(z)) => Some(TiltIndicator {
                displacement: MarkerDisplacement {
                    dx: self.scaled(x),
                    dy: self.scaled(z),
                },
                tint: IndicatorTint::from_flag(snapshot.is_proper_position),
            }),
            _ => None,
        };

        let height = offsets
            .offset_y
            .filter(|_| snapshot.is_ground_found)
            .map(|y| HeightIndicator {
                displacement: MarkerDisplacement {
                    dx: 0.0,
                    dy: self.scaled(y),
                },
            });

        FeedbackIndicators {
            tilt,
            height,
            frame_tint: IndicatorTint::from_flag(snapshot.is_aligned),
        }
    }

    #[inline]
    fn scaled(&self, offset: f64) -> f64 {
        (offset * self.scale).clamp(-self.max_displacement, self.max_displacement)
    }
}

impl Default for FeedbackMapper {
    fn default() -> Self {
        Self::from_config(&GuidanceConfig::default())
    }
}
