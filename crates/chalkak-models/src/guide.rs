//! Guide definitions.
//!
//! A guide is the persisted snapshot of a correct camera framing. It is
//! produced by the storage layer when the first take of a clip is recorded
//! and consumed read-only by the guidance engine.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{BoundingBox, Tilt};

/// Unique identifier for a guide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct GuideId(pub String);

impl GuideId {
    /// Generate a new random guide ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for GuideId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GuideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference framing for a clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct Guide {
    /// Guide identifier
    #[serde(default)]
    pub id: GuideId,

    /// Clip the guide was captured from
    #[validate(length(min = 1))]
    pub clip_id: String,

    /// Device tilt at capture time
    #[validate(custom(function = "validate_tilt"))]
    pub camera_tilt: Tilt,

    /// Camera height above the ground plane at capture time (meters)
    #[validate(custom(function = "validate_height"))]
    pub camera_height: f64,

    /// Subject regions detected at capture time
    #[serde(default)]
    #[validate(nested)]
    pub bounding_boxes: Vec<BoundingBox>,

    /// Outline overlay shown to the operator (display only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_image: Option<String>,

    /// When the guide was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Guide {
    /// Create a new guide with a fresh ID.
    pub fn new(
        clip_id: impl Into<String>,
        camera_tilt: Tilt,
        camera_height: f64,
        bounding_boxes: Vec<BoundingBox>,
    ) -> Self {
        Self {
            id: GuideId::new(),
            clip_id: clip_id.into(),
            camera_tilt,
            camera_height,
            bounding_boxes,
            outline_image: None,
            created_at: Utc::now(),
        }
    }

    /// Attach an outline image reference.
    pub fn with_outline_image(mut self, outline_image: impl Into<String>) -> Self {
        self.outline_image = Some(outline_image.into());
        self
    }
}

fn validate_tilt(tilt: &Tilt) -> Result<(), ValidationError> {
    if !tilt.is_finite() {
        return Err(ValidationError::new("tilt_not_finite"));
    }
    Ok(())
}

fn validate_height(height: f64) -> Result<(), ValidationError> {
    if !height.is_finite() || height < 0.0 {
        return Err(ValidationError::new("height_out_of_range"));
    }
    Ok(())
}
