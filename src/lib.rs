//! detprep cleans per-frame 3D detection sets for a multi-object tracker.
//!
//! The crate decodes heterogeneous raw detections into a uniform box layout
//! with derived corner geometry, filters by class-specific confidence, and
//! suppresses duplicates across all classes with a greedy, voxel-accelerated
//! NMS offering a fixed-threshold "blend" strategy and a multi-pass "scale"
//! strategy. A stateful pipeline assigns sequence/frame ids from externally
//! marked boundaries and emits one immutable [`Frame`] per token. Optional
//! parallelism via the `rayon` feature never changes results.

mod config;
mod filter;
mod frame;
pub mod geometry;
mod sequence;
pub mod suppress;
mod trace;
pub mod util;
mod voxel;

pub use config::{PreprocessConfig, SuppressConfig};
pub use filter::score_filter;
pub use frame::{Frame, FramePipeline, FrameStats};
pub use geometry::{decode_frame, derive_footprints, Aabb, BoxCandidate, Footprint, RawDetection};
pub use sequence::SequenceTracker;
pub use suppress::metric::{footprint_iou, iou_3d};
pub use suppress::{suppress, Metric, ScalePass, Strategy};
pub use util::{ErrorKind, PrepError, PrepResult};
pub use voxel::{NeighborMode, VoxelIndex};
