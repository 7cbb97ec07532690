//! Rational De Boor evaluation for NURBS curves.

use gcurve_core::Tolerance;
use gcurve_math::{DVec3, DVec4, Point3};

use super::knot::{basis_functions, find_span};

/// Evaluate a NURBS curve point at knot parameter `t`.
///
/// Each control point is `(x, y, z, w)` with the position unweighted and the
/// weight in `w`. The result is projected back by the accumulated weight.
pub fn rational_curve_point(
    degree: usize,
    knots: &[f64],
    control_points: &[DVec4],
    t: f64,
) -> Point3 {
    let n = control_points.len() - 1;
    let span = find_span(degree, knots, n, t);
    let basis = basis_functions(degree, knots, span, t);

    let mut point = DVec3::ZERO;
    let mut w = 0.0;

    for (i, b) in basis.iter().enumerate() {
        let cp = control_points[span - degree + i];
        let bw = b * cp.w;
        point += bw * cp.truncate();
        w += bw;
    }

    if w.abs() < Tolerance::WEIGHT_EPSILON {
        point
    } else {
        point / w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nurbs::generate_knots;

    fn hom(x: f64, y: f64, z: f64, w: f64) -> DVec4 {
        DVec4::new(x, y, z, w)
    }

    #[test]
    fn test_linear_interpolates() {
        let knots = vec![0.0, 0.0, 1.0, 2.0, 2.0];
        let cps = vec![
            hom(0.0, 0.0, 0.0, 1.0),
            hom(1.0, 0.0, 0.0, 1.0),
            hom(1.0, 1.0, 0.0, 1.0),
        ];

        let p = rational_curve_point(1, &knots, &cps, 0.5);
        assert!((p - DVec3::new(0.5, 0.0, 0.0)).length() < 1e-10);

        let p = rational_curve_point(1, &knots, &cps, 1.5);
        assert!((p - DVec3::new(1.0, 0.5, 0.0)).length() < 1e-10);
    }

    #[test]
    fn test_clamped_endpoints() {
        let cps = vec![
            hom(0.0, 0.0, 0.0, 1.0),
            hom(1.0, 2.0, 0.0, 1.0),
            hom(3.0, 2.0, 0.0, 1.0),
            hom(4.0, 0.0, 1.0, 1.0),
            hom(5.0, -1.0, 1.0, 1.0),
        ];
        let knots = generate_knots(cps.len(), 3, false);

        let start = rational_curve_point(3, &knots, &cps, 0.0);
        let end = rational_curve_point(3, &knots, &cps, 1.0);
        assert!((start - DVec3::ZERO).length() < 1e-10);
        assert!((end - DVec3::new(5.0, -1.0, 1.0)).length() < 1e-10);
    }

    #[test]
    fn test_quarter_circle() {
        // Quadratic rational arc from (1,0) to (0,1)
        let w = 1.0_f64 / 2.0_f64.sqrt();
        let cps = vec![
            hom(1.0, 0.0, 0.0, 1.0),
            hom(1.0, 1.0, 0.0, w),
            hom(0.0, 1.0, 0.0, 1.0),
        ];
        let knots = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        for i in 0..=10 {
            let p = rational_curve_point(2, &knots, &cps, i as f64 / 10.0);
            assert!((p.length() - 1.0).abs() < 1e-10, "radius {}", p.length());
        }
    }

    #[test]
    fn test_weight_pulls_toward_control_point() {
        let knots = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let light = vec![
            hom(0.0, 0.0, 0.0, 1.0),
            hom(0.5, 1.0, 0.0, 1.0),
            hom(1.0, 0.0, 0.0, 1.0),
        ];
        let mut heavy = light.clone();
        heavy[1].w = 4.0;

        let a = rational_curve_point(2, &knots, &light, 0.5);
        let b = rational_curve_point(2, &knots, &heavy, 0.5);
        assert!(b.y > a.y);
    }
}
