//! Error types for detprep.

use thiserror::Error;

/// Result alias for preprocessing operations.
pub type PrepResult<T> = std::result::Result<T, PrepError>;

/// Broad error families, for callers that route on the kind of failure
/// rather than on an individual variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A raw detection could not be decoded.
    Decode,
    /// A configured table or identifier is invalid.
    Config,
    /// A frame token was requested out of chronological order.
    Order,
}

/// Errors that can occur while preprocessing a frame of detections.
///
/// Decode and config errors are fatal to the current frame and must be
/// surfaced to the caller; a frame with zero surviving detections is a valid
/// outcome, not an error.
#[derive(Debug, Error, PartialEq)]
pub enum PrepError {
    /// A raw detection lacks a required field.
    #[error("detection {index}: missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },
    /// A raw detection's extent has a non-positive dimension.
    #[error("detection {index}: extent must be positive, got {extent:?}")]
    NonPositiveExtent { index: usize, extent: [f64; 3] },
    /// A class label has no entry in a per-class table.
    #[error("class `{class}` has no entry in the `{table}` table")]
    MissingClassEntry { class: String, table: &'static str },
    /// The configured suppression strategy name is not recognized.
    #[error("unrecognized NMS strategy `{name}`")]
    UnknownStrategy { name: String },
    /// The configured overlap metric name is not recognized.
    #[error("unrecognized overlap metric `{name}`")]
    UnknownMetric { name: String },
    /// The voxel mask edge length must be strictly positive.
    #[error("voxel size must be positive, got {size}")]
    InvalidVoxelSize { size: f64 },
    /// The suppression configuration carries no threshold pass at all.
    #[error("NMS configuration requires at least one threshold pass")]
    EmptyPassList,
    /// A token arrived out of the authoritative chronological order.
    #[error("token `{token}` requested out of order, expected `{expected}`")]
    OrderViolation { token: String, expected: String },
}

impl PrepError {
    /// Returns the broad family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PrepError::MissingField { .. } | PrepError::NonPositiveExtent { .. } => {
                ErrorKind::Decode
            }
            PrepError::MissingClassEntry { .. }
            | PrepError::UnknownStrategy { .. }
            | PrepError::UnknownMetric { .. }
            | PrepError::InvalidVoxelSize { .. }
            | PrepError::EmptyPassList => ErrorKind::Config,
            PrepError::OrderViolation { .. } => ErrorKind::Order,
        }
    }
}
