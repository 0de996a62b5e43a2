use std::collections::{HashMap, HashSet};

use detprep::{
    FramePipeline, Metric, NeighborMode, PrepError, PreprocessConfig, RawDetection, Strategy,
    SuppressConfig,
};

const IDENTITY: [f64; 4] = [1.0, 0.0, 0.0, 0.0];

fn detection(center: [f64; 3], score: f64, class: &str) -> RawDetection {
    let size = match class {
        "pedestrian" => [0.6, 0.6, 1.8],
        _ => [2.0, 4.6, 1.7],
    };
    RawDetection::new(center, size, IDENTITY, score, class)
}

fn config() -> PreprocessConfig {
    PreprocessConfig {
        score_thresholds: HashMap::from([
            ("car".to_owned(), 0.2),
            ("pedestrian".to_owned(), 0.3),
        ]),
        suppress: SuppressConfig {
            strategy: Strategy::Blend {
                metric: Metric::FootprintIou,
                threshold: 0.3,
            },
            use_voxel_mask: true,
            voxel_size: 8.0,
            neighbor_mode: NeighborMode::Adjacent26,
        },
        has_velocity: true,
        parallel: false,
    }
}

fn boundaries() -> HashSet<String> {
    HashSet::from(["first".to_owned()])
}

#[test]
fn frames_shrink_monotonically_through_the_stages() {
    let mut pipeline = FramePipeline::new(config(), boundaries());
    let raw = vec![
        detection([0.0, 0.0, 0.0], 0.92, "car"),
        detection([0.2, 0.0, 0.0], 0.80, "car"), // duplicate of the first
        detection([12.0, 3.0, 0.0], 0.55, "car"),
        detection([5.0, 5.0, 0.0], 0.25, "pedestrian"), // below class cutoff
        detection([8.0, -2.0, 0.0], 0.70, "pedestrian"),
    ];
    let frame = pipeline.process("first", &raw).unwrap();

    assert_eq!(frame.stats.decoded, 5);
    assert_eq!(frame.stats.score_filtered, 1);
    assert_eq!(frame.stats.nms_filtered, 1);
    assert_eq!(frame.stats.kept, 3);
    assert!(frame.stats.kept <= frame.stats.decoded - frame.stats.score_filtered);

    assert_eq!(frame.len(), 3);
    assert!(!frame.is_empty());
    assert!(frame.has_velocity);
    assert_eq!(frame.candidates.len(), frame.footprints.len());
    // Survivors come back in descending-score order.
    for pair in frame.candidates.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert_eq!(frame.candidates[0].score, 0.92);
}

#[test]
fn zero_survivors_still_yields_a_well_formed_frame() {
    let mut pipeline = FramePipeline::new(config(), boundaries());

    let no_detections = pipeline.process("first", &[]).unwrap();
    assert!(no_detections.is_empty());
    assert_eq!(no_detections.stats, Default::default());
    assert_eq!(no_detections.seq_id, 1);
    assert!(no_detections.is_first_frame);

    let all_filtered = pipeline
        .process("second", &[detection([0.0; 3], 0.05, "car")])
        .unwrap();
    assert!(all_filtered.is_empty());
    assert_eq!(all_filtered.stats.decoded, 1);
    assert_eq!(all_filtered.stats.score_filtered, 1);
    assert_eq!(all_filtered.stats.kept, 0);
    assert_eq!(all_filtered.frame_id, 2);
}

#[test]
fn decode_failure_surfaces_instead_of_skipping_the_frame() {
    let mut pipeline = FramePipeline::new(config(), boundaries());
    let mut bad = detection([0.0; 3], 0.9, "car");
    bad.rotation = None;
    let err = pipeline.process("first", &[bad]).err().unwrap();
    assert_eq!(
        err,
        PrepError::MissingField {
            index: 0,
            field: "rotation"
        }
    );
}

#[test]
fn suppression_is_frame_local() {
    let mut pipeline = FramePipeline::new(config(), boundaries());
    let duplicate = detection([0.0, 0.0, 0.0], 0.9, "car");

    let first = pipeline.process("first", std::slice::from_ref(&duplicate)).unwrap();
    // Same box again next frame: nothing from the previous frame suppresses it.
    let second = pipeline.process("second", &[duplicate]).unwrap();
    assert_eq!(first.stats.kept, 1);
    assert_eq!(second.stats.kept, 1);
    assert_eq!(second.timestamp, 1);
}
