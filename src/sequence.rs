//! Sequence and frame id assignment from externally marked boundaries.

use std::collections::HashSet;

/// Running sequence/frame counters, advanced once per token in strict
/// chronological input order.
///
/// State starts at `(seq_id = 0, frame_id = 0)`. A boundary token opens a
/// new sequence (`seq_id + 1`, `frame_id = 1`); any other token increments
/// `frame_id`. Calling out of chronological order silently produces wrong
/// ids; the tracker cannot detect it on its own. Callers that know the
/// authoritative token order can enable the strict check on
/// [`crate::FramePipeline`].
pub struct SequenceTracker {
    boundaries: HashSet<String>,
    seq_id: u32,
    frame_id: u32,
}

impl SequenceTracker {
    /// Creates a tracker over the run's boundary token set.
    pub fn new(boundaries: HashSet<String>) -> Self {
        Self {
            boundaries,
            seq_id: 0,
            frame_id: 0,
        }
    }

    /// Consumes one token and returns `(seq_id, frame_id, is_first_frame)`.
    pub fn advance(&mut self, token: &str) -> (u32, u32, bool) {
        let is_first = self.boundaries.contains(token);
        if is_first {
            self.seq_id += 1;
            self.frame_id = 1;
        } else {
            self.frame_id += 1;
        }
        (self.seq_id, self.frame_id, is_first)
    }
}
