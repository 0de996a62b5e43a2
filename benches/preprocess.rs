use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

use detprep::{
    derive_footprints, suppress, BoxCandidate, Metric, NeighborMode, Strategy, SuppressConfig,
};

fn make_candidates(count: usize) -> Vec<BoxCandidate> {
    let mut rng = StdRng::seed_from_u64(11);
    (0..count)
        .map(|_| {
            let yaw: f64 = rng.random_range(-std::f64::consts::PI..std::f64::consts::PI);
            let half = yaw / 2.0;
            BoxCandidate {
                center: [
                    rng.random_range(0.0..120.0),
                    rng.random_range(0.0..120.0),
                    rng.random_range(-1.0..1.0),
                ],
                extent: [
                    rng.random_range(0.5..2.5),
                    rng.random_range(0.8..5.0),
                    rng.random_range(1.0..2.0),
                ],
                velocity: [0.0; 2],
                heading: [half.cos(), 0.0, 0.0, half.sin()],
                score: rng.random_range(0.05..1.0),
                class: "car".to_owned(),
            }
        })
        .collect()
}

fn suppress_config(use_voxel_mask: bool) -> SuppressConfig {
    SuppressConfig {
        strategy: Strategy::Blend {
            metric: Metric::FootprintIou,
            threshold: 0.1,
        },
        use_voxel_mask,
        voxel_size: 8.0,
        neighbor_mode: NeighborMode::Adjacent26,
    }
}

fn bench_suppression(c: &mut Criterion) {
    let candidates = make_candidates(512);
    let footprints = derive_footprints(&candidates);

    c.bench_function("blend_nms_512_masked", |b| {
        let config = suppress_config(true);
        b.iter(|| {
            let kept = suppress(
                black_box(&candidates),
                black_box(&footprints),
                black_box(&config),
            )
            .unwrap();
            black_box(kept)
        })
    });

    c.bench_function("blend_nms_512_exact", |b| {
        let config = suppress_config(false);
        b.iter(|| {
            let kept = suppress(
                black_box(&candidates),
                black_box(&footprints),
                black_box(&config),
            )
            .unwrap();
            black_box(kept)
        })
    });

    c.bench_function("derive_footprints_512", |b| {
        b.iter(|| black_box(derive_footprints(black_box(&candidates))))
    });
}

criterion_group!(benches, bench_suppression);
criterion_main!(benches);
