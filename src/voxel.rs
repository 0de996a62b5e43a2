//! Coarse voxel grid restricting NMS pairwise tests to plausible neighbors.
//!
//! Candidates are bucketed by `floor(center / voxel_size)` componentwise;
//! the suppression core then only compares a kept candidate against indices
//! returned by [`VoxelIndex::neighbors`] instead of all O(n²) pairs. The
//! index is rebuilt fresh for every frame (and every scale pass) and never
//! persisted.
//!
//! Correctness caveat: with [`NeighborMode::OwnCell`], a box whose extent
//! straddles a cell boundary can escape comparison and the result may be
//! under-suppressed. Choosing `voxel_size` at least as large as the largest
//! expected box extent together with [`NeighborMode::Adjacent26`] keeps the
//! accelerated result identical to the full pairwise sweep; disabling the
//! mask falls back to the exact O(n²) comparison.

use std::collections::HashMap;

use crate::util::{PrepError, PrepResult};

/// Which cells `neighbors` draws from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeighborMode {
    /// Only the candidate's own cell.
    OwnCell,
    /// The candidate's cell plus the 26 surrounding cells.
    #[default]
    Adjacent26,
}

/// Spatial hash over candidate centers, rebuilt per frame.
#[derive(Debug)]
pub struct VoxelIndex {
    cells: HashMap<[i64; 3], Vec<usize>>,
    keys: Vec<[i64; 3]>,
    mode: NeighborMode,
}

impl VoxelIndex {
    /// Buckets `centers` into a grid with the given edge length.
    pub fn build(centers: &[[f64; 3]], voxel_size: f64, mode: NeighborMode) -> PrepResult<Self> {
        if !(voxel_size > 0.0) {
            return Err(PrepError::InvalidVoxelSize { size: voxel_size });
        }
        let mut cells: HashMap<[i64; 3], Vec<usize>> = HashMap::new();
        let mut keys = Vec::with_capacity(centers.len());
        for (idx, center) in centers.iter().enumerate() {
            let key = cell_of(center, voxel_size);
            cells.entry(key).or_default().push(idx);
            keys.push(key);
        }
        Ok(Self { cells, keys, mode })
    }

    /// Candidate indices sharing candidate `i`'s cell (or, under
    /// [`NeighborMode::Adjacent26`], its 27-cell neighborhood), including
    /// `i` itself. Output order is deterministic: cells are visited in a
    /// fixed offset order and each holds indices in insertion order.
    pub fn neighbors(&self, i: usize) -> Vec<usize> {
        let key = self.keys[i];
        match self.mode {
            NeighborMode::OwnCell => self.cells[&key].clone(),
            NeighborMode::Adjacent26 => {
                let mut out = Vec::new();
                for dx in -1..=1 {
                    for dy in -1..=1 {
                        for dz in -1..=1 {
                            let probe = [key[0] + dx, key[1] + dy, key[2] + dz];
                            if let Some(bucket) = self.cells.get(&probe) {
                                out.extend_from_slice(bucket);
                            }
                        }
                    }
                }
                out
            }
        }
    }
}

fn cell_of(center: &[f64; 3], voxel_size: f64) -> [i64; 3] {
    [
        (center[0] / voxel_size).floor() as i64,
        (center[1] / voxel_size).floor() as i64,
        (center[2] / voxel_size).floor() as i64,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_coordinates_floor_toward_negative_infinity() {
        assert_eq!(cell_of(&[-0.5, 0.5, 2.5], 1.0), [-1, 0, 2]);
    }

    #[test]
    fn own_cell_mode_ignores_adjacent_cells() {
        let centers = [[0.5, 0.5, 0.5], [0.6, 0.5, 0.5], [1.5, 0.5, 0.5]];
        let index = VoxelIndex::build(&centers, 1.0, NeighborMode::OwnCell).unwrap();
        assert_eq!(index.neighbors(0), vec![0, 1]);
        assert_eq!(index.neighbors(2), vec![2]);
    }

    #[test]
    fn adjacent_mode_reaches_across_the_boundary() {
        let centers = [[0.9, 0.5, 0.5], [1.1, 0.5, 0.5]];
        let index = VoxelIndex::build(&centers, 1.0, NeighborMode::Adjacent26).unwrap();
        let mut reached = index.neighbors(0);
        reached.sort_unstable();
        assert_eq!(reached, vec![0, 1]);
    }

    #[test]
    fn non_positive_voxel_size_is_rejected() {
        let err = VoxelIndex::build(&[], 0.0, NeighborMode::Adjacent26).unwrap_err();
        assert_eq!(err, PrepError::InvalidVoxelSize { size: 0.0 });
    }
}
