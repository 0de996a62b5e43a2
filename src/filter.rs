//! Class-specific confidence filtering.

use std::collections::HashMap;

use crate::geometry::decode::BoxCandidate;
use crate::util::{PrepError, PrepResult};

/// Keeps candidates whose score strictly exceeds their class threshold.
///
/// Order preserving; a score exactly equal to the threshold is filtered out.
/// Zero survivors is a valid outcome. A class label with no entry in the
/// threshold table is a configuration error, never a silent pass.
pub fn score_filter(
    candidates: Vec<BoxCandidate>,
    thresholds: &HashMap<String, f64>,
) -> PrepResult<Vec<BoxCandidate>> {
    let mut survivors = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let threshold =
            thresholds
                .get(&candidate.class)
                .copied()
                .ok_or_else(|| PrepError::MissingClassEntry {
                    class: candidate.class.clone(),
                    table: "score_threshold",
                })?;
        if candidate.score > threshold {
            survivors.push(candidate);
        }
    }
    Ok(survivors)
}
