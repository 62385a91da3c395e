//! Guidance metrics collection.
//!
//! Provides standardized metrics for monitoring guidance sessions:
//! - Reference installs
//! - Alignment transitions by direction
//! - Subject match evaluations and overlap quality

use ::metrics::{counter, histogram};

// =============================================================================
// Metric Names
// =============================================================================

/// Metric name constants for consistency.
pub mod names {
    /// Total guide installs.
    pub const REFERENCE_INSTALLS_TOTAL: &str = "guidance_reference_installs_total";

    /// Total aggregate verdict flips by direction.
    pub const ALIGNMENT_TRANSITIONS_TOTAL: &str = "guidance_alignment_transitions_total";

    /// Total subject match evaluations by outcome.
    pub const MATCH_EVALUATIONS_TOTAL: &str = "guidance_match_evaluations_total";

    /// Mean IoU of accepted subject matches.
    pub const MATCH_IOU: &str = "guidance_match_iou";
}

// =============================================================================
// Recording Functions
// =============================================================================

/// Record a guide being installed as reference.
pub fn record_reference_install(reference_boxes: usize) {
    counter!(
        names::REFERENCE_INSTALLS_TOTAL,
        "has_subjects" => if reference_boxes > 0 { "true" } else { "false" }
    )
    .increment(1);
}

/// Record a flip of the aggregate alignment verdict.
pub fn record_alignment_transition(aligned: bool) {
    counter!(
        names::ALIGNMENT_TRANSITIONS_TOTAL,
        "direction" => if aligned { "aligned" } else { "lost" }
    )
    .increment(1);
}

/// Record one subject match evaluation.
pub fn record_match_evaluation(matched: bool, mean_iou: Option<f64>) {
    counter!(
        names::MATCH_EVALUATIONS_TOTAL,
        "outcome" => if matched { "matched" } else { "unmatched" }
    )
    .increment(1);

    if let Some(iou) = mean_iou {
        histogram!(names::MATCH_IOU).record(iou);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names() {
        assert!(names::REFERENCE_INSTALLS_TOTAL.starts_with("guidance_"));
        assert!(names::ALIGNMENT_TRANSITIONS_TOTAL.contains("transitions"));
        assert!(names::MATCH_EVALUATIONS_TOTAL.contains("evaluations"));
        assert!(names::MATCH_IOU.contains("iou"));
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_reference_install(2);
        record_alignment_transition(true);
        record_match_evaluation(false, None);
        record_match_evaluation(true, Some(0.8));
    }
}
