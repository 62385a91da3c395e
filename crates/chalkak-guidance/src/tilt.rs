//! Device tilt tracking against a target orientation.
//!
//! Runs on every orientation sample (tens of hertz), so all computation
//! here is O(1) and allocation-free.

use chalkak_models::{TargetTilt, TiltSample};

/// Both tilt offsets must be strictly below this (degrees) for the
/// device to be in proper position.
pub const TILT_TOLERANCE_DEGREES: f64 = 3.0;

/// Signed tilt offset relative to a target, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltOffset {
    /// Left/right offset
    pub offset_x: f64,
    /// Forward/backward offset
    pub offset_z: f64,
}

impl TiltOffset {
    /// Offset of `sample` relative to `target`.
    #[inline]
    pub fn between(sample: &TiltSample, target: &TargetTilt) -> Self {
        Self {
            offset_x: sample.degree_x - target.degree_x,
            offset_z: sample.degree_z - target.degree_z,
        }
    }

    /// True iff both offsets are strictly within the tilt tolerance.
    ///
    /// NaN offsets are never in proper position.
    #[inline]
    pub fn is_proper_position(&self) -> bool {
        self.offset_x.abs() < TILT_TOLERANCE_DEGREES && self.offset_z.abs() < TILT_TOLERANCE_DEGREES
    }
}

/// Tracks the latest tilt offset for a target orientation.
#[derive(Debug, Clone, Default)]
pub struct TiltTracker {
    target: Option<TargetTilt>,
    offset: Option<TiltOffset>,
}

impl TiltTracker {
    /// Create a tracker with no target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker for a target orientation.
    pub fn with_target(target: TargetTilt) -> Self {
        Self {
            target: Some(target),
            offset: None,
        }
    }

    /// Replace the target. Clears the last offset.
    pub fn set_target(&mut self, target: Option<TargetTilt>) {
        self.target = target;
        self.offset = None;
    }

    pub fn target(&self) -> Option<TargetTilt> {
        self.target
    }

    /// Ingest a sample and return the new offset, or `None` without a target.
    #[inline]
    pub fn update(&mut self, sample: &TiltSample) -> Option<TiltOffset> {
        self.offset = self.target.map(|target| TiltOffset::between(sample, &target));
        self.offset
    }

    /// Latest offset, if a target is set and a sample has arrived.
    pub fn offset(&self) -> Option<TiltOffset> {
        self.offset
    }

    /// False until a sample has been compared against a target.
    pub fn is_proper_position(&self) -> bool {
        self.offset.map_or(false, |offset| offset.is_proper_position())
    }
}
