//! Axis convention conversion between the authoring tool (Z-up) and the
//! scene convention (Y-up).

use crate::Point3;

/// Map an authoring-space coordinate `(x, y, z)` to scene space `(x, z, -y)`.
pub fn to_scene(p: Point3) -> Point3 {
    Point3::new(p.x, p.z, -p.y)
}

/// Inverse of [`to_scene`]: scene `(x, y, z)` back to authoring `(x, -z, y)`.
pub fn to_authoring(p: Point3) -> Point3 {
    Point3::new(p.x, -p.z, p.y)
}

/// Convert a raw `[x, y, z]` triple as stored in the extension payload.
pub fn array_to_scene(co: [f64; 3]) -> Point3 {
    to_scene(Point3::from_array(co))
}
