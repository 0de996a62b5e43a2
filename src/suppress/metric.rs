//! Overlap metrics shared by both suppression strategies.
//!
//! The canonical metric is the rotated-rectangle footprint IoU: intersection
//! area of the two yaw-rotated footprints (Sutherland-Hodgman convex clip,
//! shoelace area) divided by union area. `Iou3d` extends it with the
//! vertical overlap; `CenterDistance` maps the 3D center distance `d` to
//! `1 / (1 + d)` so every metric grows with "more duplicate" and shares the
//! strictly-greater-than-threshold suppression rule.

use crate::geometry::corners::Footprint;
use crate::suppress::greedy::SuppressItem;
use crate::util::math::dist3;
use crate::util::{PrepError, PrepResult};

/// Overlap metric identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    /// Rotated-rectangle IoU of the bottom-face footprints.
    FootprintIou,
    /// Volumetric IoU: footprint intersection times vertical overlap.
    Iou3d,
    /// `1 / (1 + d)` over the 3D center distance `d`.
    CenterDistance,
}

impl Metric {
    /// Resolves a metric from the external configuration vocabulary.
    pub fn from_name(name: &str) -> PrepResult<Self> {
        match name {
            "iou_bev" => Ok(Metric::FootprintIou),
            "iou_3d" => Ok(Metric::Iou3d),
            "d_eucl" => Ok(Metric::CenterDistance),
            _ => Err(PrepError::UnknownMetric { name: name.to_owned() }),
        }
    }
}

pub(crate) fn overlap(metric: Metric, a: &SuppressItem, b: &SuppressItem) -> f64 {
    match metric {
        Metric::FootprintIou => footprint_iou(&a.footprint, &b.footprint),
        Metric::Iou3d => iou_3d(&a.footprint, &b.footprint),
        Metric::CenterDistance => 1.0 / (1.0 + dist3(a.center, b.center)),
    }
}

/// IoU of two yaw-rotated footprint rectangles.
pub fn footprint_iou(a: &Footprint, b: &Footprint) -> f64 {
    if !a.aabb.overlaps(&b.aabb) {
        return 0.0;
    }
    let inter = intersection_area(&a.corners, &b.corners);
    if inter <= 0.0 {
        return 0.0;
    }
    inter / (a.area + b.area - inter)
}

/// Volumetric IoU of two boxes from their footprints and z-extents.
pub fn iou_3d(a: &Footprint, b: &Footprint) -> f64 {
    if !a.aabb.overlaps(&b.aabb) {
        return 0.0;
    }
    let z_overlap = (a.z_max.min(b.z_max) - a.z_min.max(b.z_min)).max(0.0);
    if z_overlap <= 0.0 {
        return 0.0;
    }
    let inter = intersection_area(&a.corners, &b.corners) * z_overlap;
    if inter <= 0.0 {
        return 0.0;
    }
    let vol_a = a.area * (a.z_max - a.z_min);
    let vol_b = b.area * (b.z_max - b.z_min);
    inter / (vol_a + vol_b - inter)
}

/// Intersection area of two convex quadrilaterals with CCW corners.
fn intersection_area(subject: &[[f64; 2]; 4], clip: &[[f64; 2]; 4]) -> f64 {
    let mut output: Vec<[f64; 2]> = subject.to_vec();
    for i in 0..4 {
        if output.is_empty() {
            return 0.0;
        }
        let a = clip[i];
        let b = clip[(i + 1) % 4];
        let input = std::mem::take(&mut output);
        for j in 0..input.len() {
            let p = input[j];
            let q = input[(j + 1) % input.len()];
            let p_inside = side(a, b, p) >= 0.0;
            let q_inside = side(a, b, q) >= 0.0;
            if p_inside {
                output.push(p);
            }
            if p_inside != q_inside {
                output.push(edge_intersection(a, b, p, q));
            }
        }
    }
    polygon_area(&output)
}

/// Signed distance sign of `p` relative to the directed line `a -> b`;
/// non-negative means left of (inside, for a CCW clip edge).
fn side(a: [f64; 2], b: [f64; 2], p: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
}

fn edge_intersection(a: [f64; 2], b: [f64; 2], p: [f64; 2], q: [f64; 2]) -> [f64; 2] {
    let sp = side(a, b, p);
    let sq = side(a, b, q);
    let t = sp / (sp - sq);
    [p[0] + t * (q[0] - p[0]), p[1] + t * (q[1] - p[1])]
}

fn polygon_area(points: &[[f64; 2]]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut doubled = 0.0;
    for i in 0..points.len() {
        let [x0, y0] = points[i];
        let [x1, y1] = points[(i + 1) % points.len()];
        doubled += x0 * y1 - x1 * y0;
    }
    doubled.abs() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::corners::footprint;

    #[test]
    fn identical_footprints_have_unit_iou() {
        let fp = footprint(&[0.0, 0.0, 0.0], &[2.0, 4.0, 1.5], 0.3);
        assert!((footprint_iou(&fp, &fp) - 1.0).abs() < 1e-9);
        assert!((iou_3d(&fp, &fp) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_footprints_have_zero_iou() {
        let a = footprint(&[0.0, 0.0, 0.0], &[2.0, 2.0, 1.0], 0.0);
        let b = footprint(&[100.0, 0.0, 0.0], &[2.0, 2.0, 1.0], 0.0);
        assert_eq!(footprint_iou(&a, &b), 0.0);
    }

    #[test]
    fn axis_aligned_half_overlap_matches_closed_form() {
        // Two 2x2 squares offset by 1 along x: inter 2, union 6.
        let a = footprint(&[0.0, 0.0, 0.0], &[2.0, 2.0, 1.0], 0.0);
        let b = footprint(&[1.0, 0.0, 0.0], &[2.0, 2.0, 1.0], 0.0);
        assert!((footprint_iou(&a, &b) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn rotation_does_not_change_self_area() {
        let a = footprint(&[0.0, 0.0, 0.0], &[2.0, 4.0, 1.0], 0.0);
        let b = footprint(&[0.0, 0.0, 0.0], &[2.0, 4.0, 1.0], std::f64::consts::PI);
        // A half turn maps the rectangle onto itself.
        assert!((footprint_iou(&a, &b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn vertical_separation_kills_3d_iou_only() {
        let a = footprint(&[0.0, 0.0, 0.0], &[2.0, 2.0, 1.0], 0.0);
        let b = footprint(&[0.0, 0.0, 5.0], &[2.0, 2.0, 1.0], 0.0);
        assert!((footprint_iou(&a, &b) - 1.0).abs() < 1e-9);
        assert_eq!(iou_3d(&a, &b), 0.0);
    }

    #[test]
    fn unknown_metric_name_is_rejected() {
        assert_eq!(Metric::from_name("iou_bev").unwrap(), Metric::FootprintIou);
        let err = Metric::from_name("giou_bev").unwrap_err();
        assert_eq!(
            err,
            PrepError::UnknownMetric {
                name: "giou_bev".to_owned()
            }
        );
    }
}
