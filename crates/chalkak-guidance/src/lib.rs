#![deny(unreachable_patterns)]
//! Pose guidance and alignment engine.
//!
//! Fuses three live signal channels against a guide and produces a
//! tolerance-based alignment verdict plus feedback offsets:
//!
//! ```text
//!  tilt samples ──► TiltTracker ──────────┐
//!                                         │
//!  height samples ─► HeightTracker ───────┼──► AlignmentCoordinator ──► snapshot / is_aligned
//!                                         │
//!  detections ────► BoundingBoxMatcher ───┘
//! ```
//!
//! Every operation is synchronous and performs no I/O. The coordinator must
//! be driven from a single execution context; marshaling samples from
//! capture threads is the host's job.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod feedback;
pub mod height;
pub mod matcher;
pub mod metrics;
pub mod tilt;

pub use config::GuidanceConfig;
pub use coordinator::AlignmentCoordinator;
pub use error::{GuidanceError, GuidanceResult};
pub use feedback::{
    FeedbackIndicators, FeedbackMapper, HeightIndicator, IndicatorTint, MarkerDisplacement,
    TiltIndicator,
};
pub use height::{height_offset_cm, HeightTracker, HEIGHT_DISPLAY_RANGE_CM};
pub use matcher::{BoundingBoxMatcher, BoxMatch, MatchReport};
pub use tilt::{TiltOffset, TiltTracker, TILT_TOLERANCE_DEGREES};
