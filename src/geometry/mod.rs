//! Box decoding and derived corner geometry.
//!
//! `decode` turns heterogeneous raw detection records into the uniform
//! [`BoxCandidate`] layout; `corners` derives the bottom-face footprint and
//! its axis-aligned bound used for fast overlap pruning.

pub mod corners;
pub mod decode;

pub use corners::{derive_footprints, footprint, Aabb, Footprint};
pub use decode::{decode_frame, BoxCandidate, RawDetection};

#[cfg(feature = "rayon")]
pub use corners::derive_footprints_par;
