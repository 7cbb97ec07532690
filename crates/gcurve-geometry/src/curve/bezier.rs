//! Cubic Bezier segment.

use gcurve_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Curve;

/// A cubic Bezier segment from `v0` to `v3` with control handles `v1`, `v2`,
/// parameterized over `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub v0: Point3,
    pub v1: Point3,
    pub v2: Point3,
    pub v3: Point3,
}

impl CubicBezier {
    pub fn new(v0: Point3, v1: Point3, v2: Point3, v3: Point3) -> Self {
        Self { v0, v1, v2, v3 }
    }

    pub fn start(&self) -> Point3 {
        self.v0
    }

    pub fn end(&self) -> Point3 {
        self.v3
    }
}

impl Curve for CubicBezier {
    fn point_at(&self, t: f64) -> Point3 {
        let inv = 1.0 - t;
        inv * inv * inv * self.v0
            + 3.0 * inv * inv * t * self.v1
            + 3.0 * inv * t * t * self.v2
            + t * t * t * self.v3
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        let inv = 1.0 - t;
        3.0 * inv * inv * (self.v1 - self.v0)
            + 6.0 * inv * t * (self.v2 - self.v1)
            + 3.0 * t * t * (self.v3 - self.v2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use gcurve_math::DVec3;

    fn arch() -> CubicBezier {
        CubicBezier::new(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
        )
    }

    #[test]
    fn test_endpoints() {
        let c = arch();
        assert_abs_diff_eq!(c.point_at(0.0).distance(c.v0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.point_at(1.0).distance(c.v3), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_midpoint() {
        // 0.125 P0 + 0.375 P1 + 0.375 P2 + 0.125 P3
        let p = arch().point_at(0.5);
        assert_relative_eq!(p.x, 0.5);
        assert_relative_eq!(p.y, 0.75);
        assert_abs_diff_eq!(p.z, 0.0);
    }

    #[test]
    fn test_tangent_follows_handles() {
        let c = arch();
        let t0 = c.tangent_at(0.0);
        assert_relative_eq!(t0.y, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t0.x, 0.0, epsilon = 1e-12);
        let t1 = c.tangent_at(1.0);
        assert_relative_eq!(t1.y, -3.0, epsilon = 1e-12);
    }
}
