//! Greedy score-descending suppression core shared by both strategies.

use crate::geometry::corners::Footprint;
use crate::suppress::metric::{overlap, Metric};
use crate::voxel::VoxelIndex;

/// One candidate as seen by the suppression core. Scale passes substitute a
/// fattened footprint here while indices keep referring to the original
/// candidates.
pub(crate) struct SuppressItem {
    pub(crate) center: [f64; 3],
    pub(crate) score: f64,
    pub(crate) footprint: Footprint,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Undecided,
    Kept,
    Suppressed,
}

/// Runs one greedy pass and returns the kept indices in descending-score
/// order.
///
/// Candidates are visited by descending score with a stable tie-break on the
/// original index, so the result is deterministic. A visited undecided
/// candidate is kept; every undecided candidate in its voxel neighborhood
/// (or all remaining candidates when no index is supplied) whose overlap
/// with it strictly exceeds `threshold` is suppressed. A candidate is never
/// compared with itself, and an already-kept candidate is never revisited.
pub(crate) fn greedy_suppress(
    items: &[SuppressItem],
    metric: Metric,
    threshold: f64,
    voxel: Option<&VoxelIndex>,
) -> Vec<usize> {
    let n = items.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| items[b].score.total_cmp(&items[a].score).then(a.cmp(&b)));

    let mut marks = vec![Mark::Undecided; n];
    let mut kept = Vec::new();
    for &i in &order {
        if marks[i] != Mark::Undecided {
            continue;
        }
        marks[i] = Mark::Kept;
        kept.push(i);
        match voxel {
            Some(index) => {
                for j in index.neighbors(i) {
                    suppress_if_overlapping(items, &mut marks, metric, threshold, i, j);
                }
            }
            None => {
                for j in 0..n {
                    suppress_if_overlapping(items, &mut marks, metric, threshold, i, j);
                }
            }
        }
    }
    kept
}

fn suppress_if_overlapping(
    items: &[SuppressItem],
    marks: &mut [Mark],
    metric: Metric,
    threshold: f64,
    kept: usize,
    other: usize,
) {
    if other == kept || marks[other] != Mark::Undecided {
        return;
    }
    if overlap(metric, &items[kept], &items[other]) > threshold {
        marks[other] = Mark::Suppressed;
    }
}
