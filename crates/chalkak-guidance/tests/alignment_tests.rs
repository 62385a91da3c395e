//! Engine-level alignment tests.
//!
//! Drive the coordinator the way a host would: install a guide, push
//! samples, and check the verdict and feedback offsets.

use chalkak_guidance::{
    height_offset_cm, AlignmentCoordinator, BoundingBoxMatcher, FeedbackMapper, GuidanceConfig,
    IndicatorTint, TiltOffset, HEIGHT_DISPLAY_RANGE_CM,
};
use chalkak_models::{AlignmentStatus, BoundingBox, Guide, NormalizedRect, Tilt};

fn box_a(x: f64, y: f64) -> BoundingBox {
    BoundingBox::new("person", NormalizedRect::new(x, y, 0.2, 0.2))
}

fn reference_guide() -> Guide {
    Guide::new("clip-a", Tilt::new(0.0, 0.0), 1.10, vec![box_a(0.4, 0.4)])
}

/// The reference scenario: slight tilt, exact height, nearly identical box.
#[test]
fn test_end_to_end_scenario() {
    let mut coordinator = AlignmentCoordinator::new(GuidanceConfig::default()).unwrap();
    coordinator.set_reference(&reference_guide()).unwrap();

    coordinator.ingest_tilt(Tilt::new(1.0, 1.0));
    coordinator.ingest_height(1.10);
    let matched = coordinator.ingest_live_bounding_boxes(vec![box_a(0.41, 0.41)]);

    assert!(coordinator.is_proper_position());
    assert!(matched);
    assert!(coordinator.compare());

    let snapshot = coordinator.snapshot();
    assert_eq!(snapshot.status, AlignmentStatus::Aligned);
    assert!(snapshot.offsets.offset_y.unwrap().abs() < 1e-9);
    assert!(coordinator.match_report().matches[0].iou > 0.8);
}

#[test]
fn test_no_reference_is_not_aligned() {
    let mut coordinator = AlignmentCoordinator::new(GuidanceConfig::default()).unwrap();
    assert!(!coordinator.compare());
    assert!(!coordinator.compare());
    assert_eq!(coordinator.snapshot().status, AlignmentStatus::NoReference);
}

#[test]
fn test_tilt_offsets_are_exact_differences() {
    let pairs = [
        (Tilt::new(12.5, -3.25), Tilt::new(0.0, -0.5)),
        (Tilt::new(-7.0, 0.125), Tilt::new(2.0, 4.0)),
        (Tilt::new(0.1, 0.2), Tilt::new(0.3, 0.4)),
    ];
    for (sample, target) in pairs {
        let offset = TiltOffset::between(&sample, &target);
        assert!((offset.offset_x - (sample.degree_x - target.degree_x)).abs() <= f64::EPSILON);
        assert!((offset.offset_z - (sample.degree_z - target.degree_z)).abs() <= f64::EPSILON);
    }
}

#[test]
fn test_height_clamping() {
    for measured in [-2.0, 0.0, 0.1, 0.19] {
        assert_eq!(height_offset_cm(measured, 1.10), HEIGHT_DISPLAY_RANGE_CM);
    }
    for measured in [2.01, 2.5, 10.0] {
        assert_eq!(height_offset_cm(measured, 1.10), -HEIGHT_DISPLAY_RANGE_CM);
    }
    assert!((height_offset_cm(1.00, 1.10) - 10.0).abs() < 1e-9);
}

#[test]
fn test_matcher_policy_table() {
    let matcher = BoundingBoxMatcher::new(GuidanceConfig::default().min_match_iou);
    let one = vec![box_a(0.4, 0.4)];
    let two = vec![box_a(0.1, 0.1), box_a(0.6, 0.6)];

    assert!(matcher.is_match(&[], &[]));
    assert!(matcher.is_match(&[], &one));
    assert!(!matcher.is_match(&one, &[]));
    assert!(matcher.is_match(&one, &one));
    assert!(!matcher.is_match(&two, &[box_a(0.1, 0.1)]));
    assert!(matcher.is_match(&two, &[box_a(0.6, 0.6), box_a(0.1, 0.1)]));
}

#[test]
fn test_repeated_reference_install_is_deterministic() {
    let guide = reference_guide();
    let mut coordinator = AlignmentCoordinator::new(GuidanceConfig::default()).unwrap();

    let mut results = Vec::new();
    for _ in 0..2 {
        coordinator.set_reference(&guide).unwrap();
        coordinator.ingest_ground_anchor(true);
        coordinator.ingest_tilt(Tilt::new(2.5, -1.0));
        coordinator.ingest_height(1.3);
        coordinator.ingest_live_bounding_boxes(vec![box_a(0.45, 0.4)]);
        results.push((coordinator.compare(), coordinator.snapshot()));
    }

    assert_eq!(results[0], results[1]);
}

#[test]
fn test_replacing_reference_restarts_comparison() {
    let mut coordinator = AlignmentCoordinator::new(GuidanceConfig::default()).unwrap();
    coordinator.set_reference(&reference_guide()).unwrap();
    coordinator.ingest_tilt(Tilt::new(0.0, 0.0));
    coordinator.ingest_live_bounding_boxes(vec![box_a(0.4, 0.4)]);
    assert!(coordinator.is_aligned());

    let other = Guide::new("clip-b", Tilt::new(10.0, 0.0), 1.5, vec![box_a(0.0, 0.0)]);
    coordinator.set_reference(&other).unwrap();
    assert!(!coordinator.is_aligned());
    assert_eq!(coordinator.reference_guide_id(), Some(&other.id));

    coordinator.ingest_tilt(Tilt::new(10.5, 0.0));
    coordinator.ingest_live_bounding_boxes(vec![box_a(0.0, 0.0)]);
    assert!(coordinator.compare());
}

#[test]
fn test_feedback_indicators_from_coordinator() {
    let config = GuidanceConfig::default();
    let mut coordinator = AlignmentCoordinator::new(config.clone()).unwrap();
    coordinator.set_reference(&reference_guide()).unwrap();
    coordinator.ingest_tilt(Tilt::new(2.0, -1.0));
    coordinator.ingest_height(1.0);

    let mapper = FeedbackMapper::from_config(&config);
    let indicators = mapper.map(&coordinator.snapshot());
    let tilt = indicators.tilt.unwrap();
    assert_eq!(tilt.displacement.dx, 2.0);
    assert_eq!(tilt.displacement.dy, -1.0);
    assert_eq!(tilt.tint, IndicatorTint::Aligned);
    assert!(indicators.height.is_none(), "ground not found yet");
    assert_eq!(indicators.frame_tint, IndicatorTint::Neutral);

    coordinator.ingest_ground_anchor(true);
    let indicators = mapper.map(&coordinator.snapshot());
    assert!((indicators.height.unwrap().displacement.dy - 10.0).abs() < 1e-9);
}

/// Two subjects standing close together: the tightest pair would steal the
/// only live box the second subject overlaps, yet a full assignment exists.
#[test]
fn test_close_subjects_align() {
    let guide = Guide::new(
        "clip-pair",
        Tilt::new(0.0, 0.0),
        1.10,
        vec![box_a(0.40, 0.40), box_a(0.46, 0.40)],
    );
    let mut coordinator = AlignmentCoordinator::new(GuidanceConfig::default()).unwrap();
    coordinator.set_reference(&guide).unwrap();
    coordinator.ingest_tilt(Tilt::new(0.5, -0.5));

    let matched = coordinator.ingest_live_bounding_boxes(vec![box_a(0.42, 0.40), box_a(0.35, 0.40)]);

    assert!(matched);
    assert!(coordinator.boxes_matched());
    assert!(coordinator.compare());
    let report = coordinator.match_report();
    assert_eq!(report.matches.len(), 2);
    assert_eq!(report.matches[0].live_index, 1);
    assert_eq!(report.matches[1].live_index, 0);
    assert_eq!(coordinator.snapshot().status, AlignmentStatus::Aligned);
}
