//! IoU-based matching of live detections against reference subjects.
//!
//! The comparison is reference-driven: every reference box needs its own
//! live box of the same label with enough overlap, while extra live boxes
//! (background detections) are ignored. There is no partial credit.

use chalkak_models::BoundingBox;

/// A reference box paired with the live box that satisfies it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxMatch {
    pub reference_index: usize,
    pub live_index: usize,
    pub iou: f64,
}

/// Outcome of comparing a live detection set against the reference set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchReport {
    /// Accepted pairs, ordered by reference index
    pub matches: Vec<BoxMatch>,
    /// Reference boxes left without a live partner
    pub unmatched_references: Vec<usize>,
}

impl MatchReport {
    /// True iff no reference box is left unmatched.
    pub fn is_matched(&self) -> bool {
        self.unmatched_references.is_empty()
    }

    /// Mean IoU over accepted pairs.
    pub fn mean_iou(&self) -> Option<f64> {
        if self.matches.is_empty() {
            return None;
        }
        Some(self.matches.iter().map(|m| m.iou).sum::<f64>() / self.matches.len() as f64)
    }
}

/// Compares live bounding boxes to reference bounding boxes.
#[derive(Debug, Clone)]
pub struct BoundingBoxMatcher {
    /// Pairs below this IoU count as unmatched
    min_iou: f64,
}

impl BoundingBoxMatcher {
    /// Create a new matcher.
    pub fn new(min_iou: f64) -> Self {
        Self { min_iou }
    }

    pub fn min_iou(&self) -> f64 {
        self.min_iou
    }

    /// Match every reference box to at most one live box.
    ///
    /// Candidate pairs (same label, IoU at or above the threshold) form a
    /// bipartite graph, and each live box can satisfy only one reference
    /// box. The assignment is a maximum matching found with augmenting
    /// paths, so a high-overlap pair never blocks the only partner of
    /// another reference box. Each reference box tries its candidates in
    /// descending IoU order. Cost is O(R·C) for R reference boxes and C
    /// candidate pairs.
    pub fn evaluate(&self, reference: &[BoundingBox], live: &[BoundingBox]) -> MatchReport {
        if reference.is_empty() {
            return MatchReport::default();
        }
        if live.is_empty() {
            return MatchReport {
                matches: Vec::new(),
                unmatched_references: (0..reference.len()).collect(),
            };
        }

        let candidates: Vec<Vec<(usize, f64)>> = reference
            .iter()
            .map(|ref_box| {
                let mut row: Vec<(usize, f64)> = live
                    .iter()
                    .enumerate()
                    .filter(|(_, live_box)| ref_box.same_label(live_box))
                    .map(|(live_index, live_box)| (live_index, ref_box.iou(live_box)))
                    .filter(|(_, iou)| *iou >= self.min_iou)
                    .collect();
                // Stable sort keeps index order among equal IoUs
                row.sort_by(|a, b| b.1.total_cmp(&a.1));
                row
            })
            .collect();

        let mut live_owner: Vec<Option<(usize, f64)>> = vec![None; live.len()];
        let mut unmatched_references = Vec::new();

        for reference_index in 0..reference.len() {
            let mut visited = vec![false; live.len()];
            if !augment(reference_index, &candidates, &mut visited, &mut live_owner) {
                unmatched_references.push(reference_index);
            }
        }

        let mut matches: Vec<BoxMatch> = live_owner
            .iter()
            .enumerate()
            .filter_map(|(live_index, owner)| {
                owner.map(|(reference_index, iou)| BoxMatch {
                    reference_index,
                    live_index,
                    iou,
                })
            })
            .collect();
        matches.sort_by_key(|m| m.reference_index);

        MatchReport {
            matches,
            unmatched_references,
        }
    }

    /// Boolean verdict: does the live framing match the reference framing.
    pub fn is_match(&self, reference: &[BoundingBox], live: &[BoundingBox]) -> bool {
        self.evaluate(reference, live).is_matched()
    }
}

/// Try to give `reference_index` a live box, re-seating earlier owners
/// along an alternating path when its candidates are taken.
fn augment(
    reference_index: usize,
    candidates: &[Vec<(usize, f64)>],
    visited: &mut [bool],
    live_owner: &mut [Option<(usize, f64)>],
) -> bool {
    for &(live_index, iou) in &candidates[reference_index] {
        if visited[live_index] {
            continue;
        }
        visited[live_index] = true;

        let free = match live_owner[live_index] {
            None => true,
            Some((owner, _)) => augment(owner, candidates, visited, live_owner),
        };
        if free {
            live_owner[live_index] = Some((reference_index, iou));
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use chalkak_models::NormalizedRect;

    fn bbox(label: &str, x: f64, y: f64, w: f64, h: f64) -> BoundingBox {
        BoundingBox::new(label, NormalizedRect::new(x, y, w, h))
    }

    #[test]
    fn test_empty_reference_always_matches() {
        let matcher = BoundingBoxMatcher::new(0.5);
        assert!(matcher.is_match(&[], &[]));
        assert!(matcher.is_match(&[], &[bbox("person", 0.1, 0.1, 0.2, 0.2)]));
    }

    #[test]
    fn test_empty_live_never_matches() {
        let matcher = BoundingBoxMatcher::new(0.5);
        let reference = vec![bbox("person", 0.4, 0.4, 0.2, 0.2)];
        let report = matcher.evaluate(&reference, &[]);
        assert!(!report.is_matched());
        assert_eq!(report.unmatched_references, vec![0]);
    }

    #[test]
    fn test_identical_box_matches() {
        let matcher = BoundingBoxMatcher::new(0.5);
        let reference = vec![bbox("person", 0.4, 0.4, 0.2, 0.2)];
        let report = matcher.evaluate(&reference, &reference.clone());
        assert!(report.is_matched());
        assert_eq!(report.matches.len(), 1);
        assert!((report.matches[0].iou - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_match_is_not_matched() {
        let matcher = BoundingBoxMatcher::new(0.5);
        let reference = vec![
            bbox("person", 0.1, 0.1, 0.2, 0.2),
            bbox("person", 0.6, 0.6, 0.2, 0.2),
        ];
        let live = vec![bbox("person", 0.1, 0.1, 0.2, 0.2)];
        let report = matcher.evaluate(&reference, &live);
        assert!(!report.is_matched());
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.unmatched_references, vec![1]);
    }

    #[test]
    fn test_label_mismatch_is_unmatched() {
        let matcher = BoundingBoxMatcher::new(0.5);
        let reference = vec![bbox("person", 0.4, 0.4, 0.2, 0.2)];
        let live = vec![bbox("dog", 0.4, 0.4, 0.2, 0.2)];
        assert!(!matcher.is_match(&reference, &live));
    }

    #[test]
    fn test_low_overlap_is_unmatched() {
        let matcher = BoundingBoxMatcher::new(0.5);
        let reference = vec![bbox("person", 0.4, 0.4, 0.2, 0.2)];
        // IoU = 0.01 / 0.07
        let live = vec![bbox("person", 0.5, 0.5, 0.2, 0.2)];
        assert!(!matcher.is_match(&reference, &live));
    }

    #[test]
    fn test_extra_live_boxes_are_ignored() {
        let matcher = BoundingBoxMatcher::new(0.5);
        let reference = vec![bbox("person", 0.4, 0.4, 0.2, 0.2)];
        let live = vec![
            bbox("chair", 0.0, 0.0, 0.1, 0.1),
            bbox("person", 0.41, 0.41, 0.2, 0.2),
            bbox("person", 0.8, 0.1, 0.1, 0.3),
        ];
        let report = matcher.evaluate(&reference, &live);
        assert!(report.is_matched());
        assert_eq!(report.matches[0].live_index, 1);
    }

    #[test]
    fn test_live_box_satisfies_only_one_reference() {
        let matcher = BoundingBoxMatcher::new(0.3);
        let reference = vec![
            bbox("person", 0.40, 0.40, 0.2, 0.2),
            bbox("person", 0.42, 0.42, 0.2, 0.2),
        ];
        let live = vec![bbox("person", 0.41, 0.41, 0.2, 0.2)];
        let report = matcher.evaluate(&reference, &live);
        assert!(!report.is_matched());
        assert_eq!(report.matches.len(), 1);
    }

    #[test]
    fn test_best_overlap_wins() {
        let matcher = BoundingBoxMatcher::new(0.3);
        let reference = vec![
            bbox("person", 0.10, 0.10, 0.2, 0.2),
            bbox("person", 0.15, 0.10, 0.2, 0.2),
        ];
        let live = vec![
            bbox("person", 0.15, 0.10, 0.2, 0.2),
            bbox("person", 0.09, 0.10, 0.2, 0.2),
        ];
        let report = matcher.evaluate(&reference, &live);
        assert!(report.is_matched());
        assert_eq!(report.matches[0].live_index, 1);
        assert_eq!(report.matches[1].live_index, 0);
        assert!(report.mean_iou().unwrap() > 0.9);
    }

    #[test]
    fn test_close_subjects_are_reassigned() {
        // ref0 overlaps live0 best (0.818) but live0 is ref1's only partner
        // (0.667), so ref0 has to settle for live1 (0.600).
        let matcher = BoundingBoxMatcher::new(0.5);
        let reference = vec![
            bbox("person", 0.40, 0.40, 0.2, 0.2),
            bbox("person", 0.46, 0.40, 0.2, 0.2),
        ];
        let live = vec![
            bbox("person", 0.42, 0.40, 0.2, 0.2),
            bbox("person", 0.35, 0.40, 0.2, 0.2),
        ];
        let report = matcher.evaluate(&reference, &live);

        assert!(report.is_matched());
        assert!(report.unmatched_references.is_empty());
        assert_eq!(report.matches.len(), 2);
        assert_eq!(report.matches[0].reference_index, 0);
        assert_eq!(report.matches[0].live_index, 1);
        assert!((report.matches[0].iou - 0.6).abs() < 1e-9);
        assert_eq!(report.matches[1].reference_index, 1);
        assert_eq!(report.matches[1].live_index, 0);
        assert!((report.matches[1].iou - 0.032 / 0.048).abs() < 1e-9);
    }

    #[test]
    fn test_contested_live_box_goes_to_one_reference() {
        // Both references only overlap live0; exactly one gets it.
        let matcher = BoundingBoxMatcher::new(0.5);
        let reference = vec![
            bbox("person", 0.40, 0.40, 0.2, 0.2),
            bbox("person", 0.42, 0.40, 0.2, 0.2),
        ];
        let live = vec![
            bbox("person", 0.41, 0.40, 0.2, 0.2),
            bbox("person", 0.05, 0.05, 0.1, 0.1),
        ];
        let report = matcher.evaluate(&reference, &live);

        assert!(!report.is_matched());
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].reference_index, 0);
        assert_eq!(report.unmatched_references, vec![1]);
    }
}
