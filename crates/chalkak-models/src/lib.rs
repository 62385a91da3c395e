//! Shared data models for Chalkak pose guidance.
//!
//! This crate provides Serde-serializable types for:
//! - Device tilt and height samples and targets
//! - Normalized rectangles and labelled bounding boxes
//! - Guides (persisted reference framings)
//! - Alignment snapshots exposed to feedback indicators

pub mod bounding_box;
pub mod guide;
pub mod height;
pub mod rect;
pub mod snapshot;
pub mod tilt;

// Re-export common types
pub use bounding_box::BoundingBox;
pub use guide::{Guide, GuideId};
pub use height::{HeightSample, TargetHeight};
pub use rect::NormalizedRect;
pub use snapshot::{AlignmentSnapshot, AlignmentStatus, AlignmentStatusParseError, FeedbackOffsets};
pub use tilt::{TargetTilt, Tilt, TiltSample};
