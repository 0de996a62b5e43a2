//! Configuration surface of the preprocessing pipeline.

use std::collections::HashMap;

use crate::suppress::{Metric, Strategy};
use crate::voxel::NeighborMode;

/// Suppression-stage configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuppressConfig {
    /// Which suppression strategy runs; see [`Strategy`].
    pub strategy: Strategy,
    /// Restrict pairwise overlap tests to voxel neighborhoods. Disabling
    /// falls back to the exact full pairwise sweep.
    pub use_voxel_mask: bool,
    /// Voxel edge length; keep it at least as large as the largest expected
    /// box extent (see the caveat on [`crate::VoxelIndex`]).
    pub voxel_size: f64,
    /// Which cells a voxel neighborhood lookup draws from.
    pub neighbor_mode: NeighborMode,
}

impl Default for SuppressConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Blend {
                metric: Metric::FootprintIou,
                threshold: 0.1,
            },
            use_voxel_mask: true,
            voxel_size: 8.0,
            neighbor_mode: NeighborMode::Adjacent26,
        }
    }
}

/// Full pipeline configuration, immutable for the run's duration.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreprocessConfig {
    /// Per-class confidence cutoffs; every class the detector can emit must
    /// have an entry.
    pub score_thresholds: HashMap<String, f64>,
    /// Suppression stage settings.
    pub suppress: SuppressConfig,
    /// Whether the detector estimates velocity; recorded on every frame for
    /// the downstream tracker.
    pub has_velocity: bool,
    /// Parallelize per-candidate geometry derivation (`rayon` feature).
    pub parallel: bool,
}
