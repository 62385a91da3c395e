//! Observable alignment state exposed to feedback consumers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Offsets driving the on-screen feedback indicators.
///
/// `None` means the offset is undefined (no reference or no sample yet).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct FeedbackOffsets {
    /// Left/right tilt offset in degrees
    pub offset_x: Option<f64>,
    /// Forward/backward tilt offset in degrees
    pub offset_z: Option<f64>,
    /// Height offset in centimeters, clamped to the display range
    pub offset_y: Option<f64>,
}

/// Aggregate alignment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentStatus {
    /// No guide installed; nothing to align to.
    #[default]
    NoReference,
    /// Guide installed, live framing does not match yet.
    Searching,
    /// Live framing matches the guide.
    Aligned,
}

impl AlignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlignmentStatus::NoReference => "no_reference",
            AlignmentStatus::Searching => "searching",
            AlignmentStatus::Aligned => "aligned",
        }
    }

    pub fn is_aligned(&self) -> bool {
        matches!(self, AlignmentStatus::Aligned)
    }
}

impl fmt::Display for AlignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlignmentStatus {
    type Err = AlignmentStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "no_reference" => Ok(AlignmentStatus::NoReference),
            "searching" => Ok(AlignmentStatus::Searching),
            "aligned" => Ok(AlignmentStatus::Aligned),
            _ => Err(AlignmentStatusParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown alignment status: {0}")]
pub struct AlignmentStatusParseError(String);

/// Point-in-time copy of a guidance session's alignment state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct AlignmentSnapshot {
    /// Aggregate status
    pub status: AlignmentStatus,
    /// Aggregate verdict used to gate session actions
    pub is_aligned: bool,
    /// Both tilt offsets within tolerance
    pub is_proper_position: bool,
    /// Tracking origin anchored to a detected ground plane
    pub is_ground_found: bool,
    /// Every reference subject matched by a live detection
    pub boxes_matched: bool,
    /// Feedback indicator offsets
    pub offsets: FeedbackOffsets,
    /// Number of boxes in the latest live detection set
    pub live_box_count: usize,
}

impl AlignmentSnapshot {
    /// Returns true if height feedback should be shown.
    pub fn shows_height_feedback(&self) -> bool {
        self.is_ground_found && self.offsets.offset_y.is_some()
    }
}
