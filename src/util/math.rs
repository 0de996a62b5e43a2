//! Numeric helpers for box geometry.

/// Extracts the yaw angle (rotation about +z, radians) from a `[w, x, y, z]`
/// unit quaternion.
pub(crate) fn quat_yaw(q: [f64; 4]) -> f64 {
    let [w, x, y, z] = q;
    (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z))
}

/// Euclidean distance between two 3D points.
pub(crate) fn dist3(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}
