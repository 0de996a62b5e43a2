//! Bottom-face footprint geometry derived from decoded candidates.
//!
//! Each candidate gets a `Footprint`: the four corners of its yaw-rotated
//! footprint rectangle at the box's lowest z, plus the axis-aligned bound of
//! those corners (the "normalized corners") used to prune overlap tests
//! before the exact rotated-rectangle intersection runs.

use crate::geometry::decode::BoxCandidate;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Axis-aligned bounding rectangle of a footprint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Aabb {
    pub(crate) fn from_corners(corners: &[[f64; 2]; 4]) -> Self {
        let mut aabb = Aabb {
            min_x: corners[0][0],
            min_y: corners[0][1],
            max_x: corners[0][0],
            max_y: corners[0][1],
        };
        for corner in &corners[1..] {
            aabb.min_x = aabb.min_x.min(corner[0]);
            aabb.min_y = aabb.min_y.min(corner[1]);
            aabb.max_x = aabb.max_x.max(corner[0]);
            aabb.max_y = aabb.max_y.max(corner[1]);
        }
        aabb
    }

    /// True when the two rectangles share any area.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

/// Derived planar geometry of one candidate, index-aligned with it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    /// Bottom-face corners, counter-clockwise, starting front-right.
    pub corners: [[f64; 2]; 4],
    /// Axis-aligned bound of `corners`, for fast overlap rejection.
    pub aabb: Aabb,
    /// Footprint rectangle area (`w * l`).
    pub area: f64,
    /// Lowest z of the box.
    pub z_min: f64,
    /// Highest z of the box.
    pub z_max: f64,
}

/// Computes the footprint of a box given its center, `[w, l, h]` extent and
/// yaw. Length runs along the heading direction.
pub fn footprint(center: &[f64; 3], extent: &[f64; 3], yaw: f64) -> Footprint {
    let (sin, cos) = yaw.sin_cos();
    let hw = extent[0] / 2.0;
    let hl = extent[1] / 2.0;
    let local = [[hl, -hw], [hl, hw], [-hl, hw], [-hl, -hw]];
    let corners = local.map(|[x, y]| {
        [
            center[0] + x * cos - y * sin,
            center[1] + x * sin + y * cos,
        ]
    });
    let half_h = extent[2] / 2.0;
    Footprint {
        corners,
        aabb: Aabb::from_corners(&corners),
        area: extent[0] * extent[1],
        z_min: center[2] - half_h,
        z_max: center[2] + half_h,
    }
}

/// Derives footprints for every candidate, index-aligned 1:1 with the input.
pub fn derive_footprints(candidates: &[BoxCandidate]) -> Vec<Footprint> {
    candidates
        .iter()
        .map(|c| footprint(&c.center, &c.extent, c.yaw()))
        .collect()
}

/// Parallel variant of [`derive_footprints`]; the index-aligned collect keeps
/// the output identical to the sequential result.
#[cfg(feature = "rayon")]
pub fn derive_footprints_par(candidates: &[BoxCandidate]) -> Vec<Footprint> {
    candidates
        .par_iter()
        .map(|c| footprint(&c.center, &c.extent, c.yaw()))
        .collect()
}
