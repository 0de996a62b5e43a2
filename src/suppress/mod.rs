//! Greedy non-maximum suppression over class-blended candidates.
//!
//! All classes are suppressed together in one score-sorted sweep. The
//! strategy is a closed enum: [`Strategy::Blend`] applies one metric and
//! threshold uniformly, [`Strategy::Scale`] runs one or more passes that
//! fatten each candidate's extent by a per-class factor before measuring
//! overlap, each pass operating on the survivors of the previous one.

pub(crate) mod greedy;
pub mod metric;

use std::collections::HashMap;

use crate::config::SuppressConfig;
use crate::geometry::corners::{footprint, Footprint};
use crate::geometry::decode::BoxCandidate;
use crate::suppress::greedy::{greedy_suppress, SuppressItem};
use crate::util::{PrepError, PrepResult};
use crate::voxel::VoxelIndex;

pub use metric::Metric;

/// One pass of the scale strategy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalePass {
    /// Overlap metric for this pass.
    pub metric: Metric,
    /// Suppression threshold for this pass.
    pub threshold: f64,
    /// Per-class extent multipliers applied before measuring overlap.
    pub factors: HashMap<String, f64>,
}

/// Suppression strategy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// One metric and one scalar threshold across all classes.
    Blend { metric: Metric, threshold: f64 },
    /// Sequential passes over scaled geometry; kept indices always refer to
    /// the original, unscaled candidates.
    Scale { passes: Vec<ScalePass> },
}

impl Strategy {
    /// Builds a strategy from the external configuration vocabulary:
    /// `"blend_nms"` takes the first threshold, `"scale_nms"` turns every
    /// threshold into one pass sharing `metric` and `factors`.
    pub fn from_name(
        name: &str,
        metric: Metric,
        thresholds: &[f64],
        factors: &HashMap<String, f64>,
    ) -> PrepResult<Self> {
        match name {
            "blend_nms" => {
                let threshold = *thresholds.first().ok_or(PrepError::EmptyPassList)?;
                Ok(Strategy::Blend { metric, threshold })
            }
            "scale_nms" => {
                if thresholds.is_empty() {
                    return Err(PrepError::EmptyPassList);
                }
                let passes = thresholds
                    .iter()
                    .map(|&threshold| ScalePass {
                        metric,
                        threshold,
                        factors: factors.clone(),
                    })
                    .collect();
                Ok(Strategy::Scale { passes })
            }
            _ => Err(PrepError::UnknownStrategy { name: name.to_owned() }),
        }
    }
}

/// Suppresses duplicates among `candidates` and returns the kept indices in
/// descending-score order.
///
/// `footprints` must be index-aligned 1:1 with `candidates` (as produced by
/// [`crate::geometry::derive_footprints`]); scale passes recompute their own
/// scaled geometry and ignore it. Suppression is frame-local: only the given
/// candidates are ever compared, and never a candidate with itself.
pub fn suppress(
    candidates: &[BoxCandidate],
    footprints: &[Footprint],
    config: &SuppressConfig,
) -> PrepResult<Vec<usize>> {
    debug_assert_eq!(candidates.len(), footprints.len());
    if candidates.is_empty() {
        return Ok(Vec::new());
    }
    match &config.strategy {
        Strategy::Blend { metric, threshold } => {
            let items: Vec<SuppressItem> = candidates
                .iter()
                .zip(footprints)
                .map(|(c, f)| SuppressItem {
                    center: c.center,
                    score: c.score,
                    footprint: *f,
                })
                .collect();
            run_pass(&items, *metric, *threshold, config)
        }
        Strategy::Scale { passes } => {
            if passes.is_empty() {
                return Err(PrepError::EmptyPassList);
            }
            let mut survivors: Vec<usize> = (0..candidates.len()).collect();
            for pass in passes {
                let mut items = Vec::with_capacity(survivors.len());
                for &idx in &survivors {
                    let candidate = &candidates[idx];
                    let factor = pass.factors.get(&candidate.class).copied().ok_or_else(|| {
                        PrepError::MissingClassEntry {
                            class: candidate.class.clone(),
                            table: "scale_factors",
                        }
                    })?;
                    let extent = [
                        candidate.extent[0] * factor,
                        candidate.extent[1] * factor,
                        candidate.extent[2] * factor,
                    ];
                    items.push(SuppressItem {
                        center: candidate.center,
                        score: candidate.score,
                        footprint: footprint(&candidate.center, &extent, candidate.yaw()),
                    });
                }
                let kept = run_pass(&items, pass.metric, pass.threshold, config)?;
                survivors = kept.into_iter().map(|local| survivors[local]).collect();
            }
            Ok(survivors)
        }
    }
}

fn run_pass(
    items: &[SuppressItem],
    metric: Metric,
    threshold: f64,
    config: &SuppressConfig,
) -> PrepResult<Vec<usize>> {
    let voxel = if config.use_voxel_mask {
        let centers: Vec<[f64; 3]> = items.iter().map(|item| item.center).collect();
        Some(VoxelIndex::build(
            &centers,
            config.voxel_size,
            config.neighbor_mode,
        )?)
    } else {
        None
    };
    Ok(greedy_suppress(items, metric, threshold, voxel.as_ref()))
}
