//! Per-frame assembly: the pipeline driver and its output record.

use std::collections::HashSet;

use crate::config::PreprocessConfig;
use crate::filter::score_filter;
use crate::geometry::corners::{derive_footprints, Footprint};
use crate::geometry::decode::{decode_frame, BoxCandidate, RawDetection};
use crate::sequence::SequenceTracker;
use crate::suppress::suppress;
use crate::trace::{trace_event, trace_span};
use crate::util::{PrepError, PrepResult};

/// Diagnostic counts for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Raw detections decoded for this frame.
    pub decoded: usize,
    /// Removed by the score filter.
    pub score_filtered: usize,
    /// Removed by suppression.
    pub nms_filtered: usize,
    /// Final survivors handed to the tracker.
    pub kept: usize,
}

/// One preprocessed frame, immutable after assembly and owned by the caller.
///
/// A frame with no surviving candidates is well-formed: `candidates` is
/// genuinely empty and [`Frame::is_empty`] reports it, no sentinel values.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Opaque frame token.
    pub token: String,
    /// Running input index of this frame within the stream.
    pub timestamp: usize,
    /// Sequence this frame belongs to, starting at 1.
    pub seq_id: u32,
    /// Position within the sequence, starting at 1.
    pub frame_id: u32,
    /// Whether the token was a sequence boundary.
    pub is_first_frame: bool,
    /// Whether the detector estimates velocity (run-level flag).
    pub has_velocity: bool,
    /// Surviving candidates in descending-score order.
    pub candidates: Vec<BoxCandidate>,
    /// Derived geometry, index-aligned with `candidates`.
    pub footprints: Vec<Footprint>,
    /// Diagnostic counts.
    pub stats: FrameStats,
}

impl Frame {
    /// Number of surviving candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// True when no candidate survived (or none was detected).
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Stateful per-run pipeline: decode, score-filter, suppress, assemble.
///
/// Frames must be processed in the exact chronological order of the input
/// stream; the sequence counters depend on it. Supplying the authoritative
/// token order via [`FramePipeline::with_token_order`] turns that
/// precondition into a checked error.
pub struct FramePipeline {
    config: PreprocessConfig,
    tracker: SequenceTracker,
    cursor: usize,
    token_order: Option<Vec<String>>,
}

impl FramePipeline {
    /// Creates a pipeline over the run's boundary token set.
    pub fn new(config: PreprocessConfig, boundaries: HashSet<String>) -> Self {
        Self {
            config,
            tracker: SequenceTracker::new(boundaries),
            cursor: 0,
            token_order: None,
        }
    }

    /// Enables the strict ordering check against the authoritative token
    /// order of the input stream.
    pub fn with_token_order(mut self, order: Vec<String>) -> Self {
        self.token_order = Some(order);
        self
    }

    /// Number of frames processed so far; also the next frame's timestamp.
    pub fn frames_processed(&self) -> usize {
        self.cursor
    }

    /// Processes one frame's raw detections and assembles its record.
    ///
    /// Always returns a well-formed frame when the inputs are valid, even
    /// with zero surviving detections.
    pub fn process(&mut self, token: &str, raw: &[RawDetection]) -> PrepResult<Frame> {
        if let Some(order) = &self.token_order {
            let expected = order.get(self.cursor).map(String::as_str).unwrap_or("");
            if token != expected {
                return Err(PrepError::OrderViolation {
                    token: token.to_owned(),
                    expected: expected.to_owned(),
                });
            }
        }
        let (seq_id, frame_id, is_first_frame) = self.tracker.advance(token);
        let timestamp = self.cursor;
        self.cursor += 1;

        let _span = trace_span!("process_frame", seq = seq_id, frame = frame_id).entered();

        let decoded = decode_frame(raw)?;
        let total = decoded.len();
        let survivors = score_filter(decoded, &self.config.score_thresholds)?;
        let survived = survivors.len();

        // Corner case: nothing left after the score filter, the suppression
        // stage is not invoked at all.
        let (candidates, footprints) = if survivors.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            let derived = self.derive(&survivors);
            let kept = suppress(&survivors, &derived, &self.config.suppress)?;
            let candidates: Vec<BoxCandidate> =
                kept.iter().map(|&i| survivors[i].clone()).collect();
            let footprints: Vec<Footprint> = kept.iter().map(|&i| derived[i]).collect();
            (candidates, footprints)
        };

        let stats = FrameStats {
            decoded: total,
            score_filtered: total - survived,
            nms_filtered: survived - candidates.len(),
            kept: candidates.len(),
        };
        trace_event!(
            "frame_assembled",
            decoded = stats.decoded,
            score_filtered = stats.score_filtered,
            nms_filtered = stats.nms_filtered,
            kept = stats.kept,
        );

        Ok(Frame {
            token: token.to_owned(),
            timestamp,
            seq_id,
            frame_id,
            is_first_frame,
            has_velocity: self.config.has_velocity,
            candidates,
            footprints,
            stats,
        })
    }

    #[cfg(feature = "rayon")]
    fn derive(&self, survivors: &[BoxCandidate]) -> Vec<Footprint> {
        if self.config.parallel {
            crate::geometry::corners::derive_footprints_par(survivors)
        } else {
            derive_footprints(survivors)
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn derive(&self, survivors: &[BoxCandidate]) -> Vec<Footprint> {
        derive_footprints(survivors)
    }
}
