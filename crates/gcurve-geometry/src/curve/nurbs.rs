//! NURBS curve evaluated over a sub-range of its knot vector.

use gcurve_math::{DVec4, Point3};
use serde::{Deserialize, Serialize};

use super::Curve;
use crate::nurbs::deboor;

/// A NURBS (Non-Uniform Rational B-Spline) curve.
///
/// Control points are homogeneous `(x, y, z, w)`. The evaluated range is
/// `[knots[start_knot], knots[end_knot]]`; a periodic knot vector uses
/// `degree..=len - degree - 1` so every evaluated point has full support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NurbsCurve {
    pub degree: usize,
    pub knots: Vec<f64>,
    pub control_points: Vec<DVec4>,
    pub start_knot: usize,
    pub end_knot: usize,
}

impl NurbsCurve {
    /// Curve over the full knot range.
    pub fn new(degree: usize, knots: Vec<f64>, control_points: Vec<DVec4>) -> Self {
        let end_knot = knots.len().saturating_sub(1);
        Self {
            degree,
            knots,
            control_points,
            start_knot: 0,
            end_knot,
        }
    }

    /// Restrict evaluation to `[knots[start_knot], knots[end_knot]]`.
    pub fn with_knot_range(mut self, start_knot: usize, end_knot: usize) -> Self {
        self.start_knot = start_knot;
        self.end_knot = end_knot;
        self
    }

    /// Whether the knot vector length matches `points + degree + 1`.
    pub fn is_well_formed(&self) -> bool {
        !self.control_points.is_empty()
            && self.knots.len() == self.control_points.len() + self.degree + 1
            && self.start_knot <= self.end_knot
            && self.end_knot < self.knots.len()
    }

    /// `divisions + 1` points evenly spaced over the evaluated range.
    pub fn divide(&self, divisions: usize) -> Vec<Point3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f64 / divisions as f64))
            .collect()
    }
}

impl Curve for NurbsCurve {
    /// `t` in `[0, 1]` is mapped linearly onto the evaluated knot range.
    fn point_at(&self, t: f64) -> Point3 {
        let u0 = self.knots[self.start_knot];
        let u1 = self.knots[self.end_knot];
        let u = u0 + t * (u1 - u0);
        deboor::rational_curve_point(self.degree, &self.knots, &self.control_points, u)
    }
}
