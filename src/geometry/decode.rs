//! Decoding raw detection records into the uniform candidate layout.

use crate::util::math::quat_yaw;
use crate::util::{PrepError, PrepResult};

/// One raw detection as supplied by the external detector.
///
/// Fields mirror the detector's own record: all of them may be absent in a
/// malformed record, and velocity is genuinely optional for detectors that do
/// not estimate it. The excluded loader components deserialize straight into
/// this type (enable the `serde` feature).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawDetection {
    /// Box center `[x, y, z]` in the global frame.
    pub translation: Option<[f64; 3]>,
    /// Box extent `[w, l, h]`; length runs along the heading direction.
    pub size: Option<[f64; 3]>,
    /// Ground-plane velocity `[vx, vy]`, absent for velocity-less detectors.
    pub velocity: Option<[f64; 2]>,
    /// Heading as a `[w, x, y, z]` unit quaternion.
    pub rotation: Option<[f64; 4]>,
    /// Detection confidence in `[0, 1]`.
    #[cfg_attr(feature = "serde", serde(rename = "detection_score"))]
    pub score: Option<f64>,
    /// Detector class label.
    #[cfg_attr(feature = "serde", serde(rename = "detection_name"))]
    pub class: Option<String>,
}

impl RawDetection {
    /// Builds a record with every required field present and no velocity.
    pub fn new(
        translation: [f64; 3],
        size: [f64; 3],
        rotation: [f64; 4],
        score: f64,
        class: impl Into<String>,
    ) -> Self {
        Self {
            translation: Some(translation),
            size: Some(size),
            velocity: None,
            rotation: Some(rotation),
            score: Some(score),
            class: Some(class.into()),
        }
    }
}

/// The decoded, uniform candidate record: the 14 scalar core fields of one
/// detection, insertion-ordered within its frame.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxCandidate {
    /// Box center `[x, y, z]`.
    pub center: [f64; 3],
    /// Box extent `[w, l, h]`, all strictly positive.
    pub extent: [f64; 3],
    /// Ground-plane velocity, zero-filled when the detector supplied none.
    pub velocity: [f64; 2],
    /// Heading quaternion `[w, x, y, z]`.
    pub heading: [f64; 4],
    /// Detection confidence.
    pub score: f64,
    /// Class label, the key into per-class threshold and factor tables.
    pub class: String,
}

impl BoxCandidate {
    /// Yaw angle of the heading quaternion, radians about +z.
    pub fn yaw(&self) -> f64 {
        quat_yaw(self.heading)
    }
}

/// Decodes one frame's raw detections, preserving input order.
///
/// Fails on the first record with a missing required field or a non-positive
/// extent dimension; a malformed detection is a data-integrity problem the
/// downstream tracker must not silently ingest.
pub fn decode_frame(raw: &[RawDetection]) -> PrepResult<Vec<BoxCandidate>> {
    raw.iter()
        .enumerate()
        .map(|(index, det)| decode_one(index, det))
        .collect()
}

fn decode_one(index: usize, det: &RawDetection) -> PrepResult<BoxCandidate> {
    let center = det
        .translation
        .ok_or(PrepError::MissingField { index, field: "translation" })?;
    let extent = det
        .size
        .ok_or(PrepError::MissingField { index, field: "size" })?;
    // NaN fails the comparison too, so it is rejected by the same check.
    if !extent.iter().all(|d| *d > 0.0) {
        return Err(PrepError::NonPositiveExtent { index, extent });
    }
    let heading = det
        .rotation
        .ok_or(PrepError::MissingField { index, field: "rotation" })?;
    let score = det
        .score
        .ok_or(PrepError::MissingField { index, field: "detection_score" })?;
    let class = det
        .class
        .clone()
        .ok_or(PrepError::MissingField { index, field: "detection_name" })?;
    let velocity = det.velocity.unwrap_or([0.0, 0.0]);

    Ok(BoxCandidate {
        center,
        extent,
        velocity,
        heading,
        score,
        class,
    })
}
