//! Discretization of curves into point sequences for line rendering.

use gcurve_math::Point3;

use crate::curve::Curve;

/// Sample exactly `count` points evenly over the curve's parameter domain,
/// both endpoints included.
///
/// `count == 1` returns the start point; `count == 0` returns nothing.
pub fn sample_points(curve: &dyn Curve, count: usize) -> Vec<Point3> {
    let (t_min, t_max) = curve.domain();
    match count {
        0 => Vec::new(),
        1 => vec![curve.point_at(t_min)],
        _ => {
            let last = (count - 1) as f64;
            (0..count)
                .map(|i| curve.point_at(t_min + (t_max - t_min) * i as f64 / last))
                .collect()
        }
    }
}
