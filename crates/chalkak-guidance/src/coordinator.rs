//! Session-scoped alignment coordinator.
//!
//! Owns the reference installed from a guide plus the live alignment state,
//! and recomputes the aggregate verdict synchronously on every ingestion:
//!
//! ```text
//! is_aligned = reference installed
//!            && tilt in proper position
//!            && every reference subject matched
//!            && (height within tolerance, only if height gates alignment)
//! ```
//!
//! # Usage
//! ```rust
//! use chalkak_guidance::{AlignmentCoordinator, GuidanceConfig};
//! use chalkak_models::{BoundingBox, Guide, NormalizedRect, Tilt};
//!
//! let guide = Guide::new(
//!     "clip-1",
//!     Tilt::new(0.0, 0.0),
//!     1.10,
//!     vec![BoundingBox::new("person", NormalizedRect::new(0.4, 0.4, 0.2, 0.2))],
//! );
//!
//! let mut coordinator = AlignmentCoordinator::new(GuidanceConfig::default()).unwrap();
//! coordinator.set_reference(&guide).unwrap();
//!
//! coordinator.ingest_tilt(Tilt::new(1.0, 1.0));
//! coordinator.ingest_height(1.10);
//! coordinator.ingest_live_bounding_boxes(vec![BoundingBox::new(
//!     "person",
//!     NormalizedRect::new(0.41, 0.41, 0.2, 0.2),
//! )]);
//!
//! assert!(coordinator.compare());
//! ```

use chalkak_models::{
    AlignmentSnapshot, AlignmentStatus, BoundingBox, FeedbackOffsets, Guide, GuideId,
    HeightSample, TiltSample,
};
use tracing::{debug, info};
use validator::Validate;

use crate::config::GuidanceConfig;
use crate::error::GuidanceResult;
use crate::height::HeightTracker;
use crate::matcher::{BoundingBoxMatcher, MatchReport};
use crate::metrics;
use crate::tilt::TiltTracker;

/// Reference installed from a guide.
#[derive(Debug, Clone)]
struct Reference {
    guide_id: GuideId,
    boxes: Vec<BoundingBox>,
    height: HeightTracker,
}

/// Live inputs and derived verdicts. Discarded whenever the reference changes.
#[derive(Debug, Clone, Default)]
struct AlignmentState {
    live_boxes: Vec<BoundingBox>,
    last_report: MatchReport,
    boxes_matched: bool,
    is_aligned: bool,
}

/// Fuses tilt, height, and subject detections against a guide.
///
/// Must be mutated from one execution context at a time; wrap it in an
/// actor or a lock on the host side if samples arrive on several threads.
#[derive(Debug, Clone)]
pub struct AlignmentCoordinator {
    config: GuidanceConfig,
    matcher: BoundingBoxMatcher,
    tilt: TiltTracker,
    reference: Option<Reference>,
    is_ground_found: bool,
    state: AlignmentState,
}

impl AlignmentCoordinator {
    /// Create a coordinator with no reference installed.
    pub fn new(config: GuidanceConfig) -> GuidanceResult<Self> {
        config.validate()?;
        Ok(Self {
            matcher: BoundingBoxMatcher::new(config.min_match_iou),
            config,
            tilt: TiltTracker::new(),
            reference: None,
            is_ground_found: false,
            state: AlignmentState::default(),
        })
    }

    pub fn config(&self) -> &GuidanceConfig {
        &self.config
    }

    /// Install the guide's tilt, height, and subject boxes as the reference.
    ///
    /// Discards live tilt, height, and detection inputs; the ground anchor
    /// flag belongs to the tracking provider and is kept. Installing the
    /// same guide again restarts comparison from the same baseline. An
    /// invalid guide is rejected and the previous reference stays in place.
    pub fn set_reference(&mut self, guide: &Guide) -> GuidanceResult<()> {
        guide.validate()?;

        self.tilt.set_target(Some(guide.camera_tilt));
        self.reference = Some(Reference {
            guide_id: guide.id.clone(),
            boxes: guide.bounding_boxes.clone(),
            height: HeightTracker::new(guide.camera_height),
        });
        self.state = AlignmentState::default();
        self.refresh_match();
        self.recompute();

        metrics::record_reference_install(guide.bounding_boxes.len());
        info!(
            guide_id = %guide.id,
            clip_id = %guide.clip_id,
            reference_boxes = guide.bounding_boxes.len(),
            target_height_m = guide.camera_height,
            "Guidance reference installed"
        );

        Ok(())
    }

    /// Remove the reference; subsequent comparisons report no reference.
    pub fn clear_reference(&mut self) {
        if let Some(reference) = self.reference.take() {
            debug!(guide_id = %reference.guide_id, "Guidance reference cleared");
        }
        self.tilt.set_target(None);
        self.state = AlignmentState::default();
    }

    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// ID of the installed guide.
    pub fn reference_guide_id(&self) -> Option<&GuideId> {
        self.reference.as_ref().map(|r| &r.guide_id)
    }

    /// Ingest an orientation sample. O(1), allocation-free.
    pub fn ingest_tilt(&mut self, sample: TiltSample) {
        self.tilt.update(&sample);
        self.recompute();
    }

    /// Ingest a measured height in meters.
    ///
    /// The offset is computed whatever the ground anchor state; consumers
    /// check `is_ground_found` before showing it.
    pub fn ingest_height(&mut self, sample: HeightSample) {
        if let Some(reference) = self.reference.as_mut() {
            reference.height.update(sample);
        }
        if self.config.height_gates_alignment {
            self.recompute();
        }
    }

    /// Ingest the tracking provider's ground anchor flag.
    pub fn ingest_ground_anchor(&mut self, found: bool) {
        self.is_ground_found = found;
        if self.config.height_gates_alignment {
            self.recompute();
        }
    }

    /// Replace the live detection set and re-run subject matching.
    ///
    /// Returns whether every reference subject is matched.
    pub fn ingest_live_bounding_boxes(&mut self, boxes: Vec<BoundingBox>) -> bool {
        self.state.live_boxes = boxes;
        self.refresh_match();
        self.recompute();
        self.state.boxes_matched
    }

    /// Recompute and return the aggregate verdict.
    ///
    /// Without a reference this is always false; it never fails.
    pub fn compare(&mut self) -> bool {
        self.recompute();
        self.state.is_aligned
    }

    /// Aggregate verdict as of the last ingestion.
    pub fn is_aligned(&self) -> bool {
        self.state.is_aligned
    }

    pub fn is_proper_position(&self) -> bool {
        self.tilt.is_proper_position()
    }

    pub fn is_ground_found(&self) -> bool {
        self.is_ground_found
    }

    pub fn boxes_matched(&self) -> bool {
        self.state.boxes_matched
    }

    /// Report from the latest subject match.
    pub fn match_report(&self) -> &MatchReport {
        &self.state.last_report
    }

    pub fn live_boxes(&self) -> &[BoundingBox] {
        &self.state.live_boxes
    }

    pub fn status(&self) -> AlignmentStatus {
        match (&self.reference, self.state.is_aligned) {
            (None, _) => AlignmentStatus::NoReference,
            (Some(_), true) => AlignmentStatus::Aligned,
            (Some(_), false) => AlignmentStatus::Searching,
        }
    }

    /// Offsets for the feedback indicators; undefined without a reference.
    pub fn feedback_offsets(&self) -> FeedbackOffsets {
        let tilt = self.tilt.offset();
        FeedbackOffsets {
            offset_x: tilt.map(|t| t.offset_x),
            offset_z: tilt.map(|t| t.offset_z),
            offset_y: self.reference.as_ref().and_then(|r| r.height.offset_cm()),
        }
    }

    /// Point-in-time copy of the observable state.
    pub fn snapshot(&self) -> AlignmentSnapshot {
        AlignmentSnapshot {
            status: self.status(),
            is_aligned: self.state.is_aligned,
            is_proper_position: self.tilt.is_proper_position(),
            is_ground_found: self.is_ground_found,
            boxes_matched: self.state.boxes_matched,
            offsets: self.feedback_offsets(),
            live_box_count: self.state.live_boxes.len(),
        }
    }

    fn refresh_match(&mut self) {
        let Some(reference) = self.reference.as_ref() else {
            self.state.last_report = MatchReport::default();
            self.state.boxes_matched = false;
            return;
        };

        let report = self.matcher.evaluate(&reference.boxes, &self.state.live_boxes);
        self.state.boxes_matched = report.is_matched();
        metrics::record_match_evaluation(self.state.boxes_matched, report.mean_iou());
        self.state.last_report = report;
    }

    fn recompute(&mut self) {
        let aligned = match self.reference.as_ref() {
            None => false,
            Some(reference) => {
                let height_ok = !self.config.height_gates_alignment
                    || (self.is_ground_found
                        && reference.height.is_within(self.config.height_tolerance_cm));
                self.tilt.is_proper_position() && self.state.boxes_matched && height_ok
            }
        };

        if aligned != self.state.is_aligned {
            metrics::record_alignment_transition(aligned);
            debug!(
                aligned,
                boxes_matched = self.state.boxes_matched,
                proper_position = self.tilt.is_proper_position(),
                "Alignment changed"
            );
        }
        self.state.is_aligned = aligned;
    }
}
