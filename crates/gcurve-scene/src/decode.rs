//! Spline definition → curve math.

use gcurve_core::{CurveError, Result, Validate};
use gcurve_geometry::nurbs::generate_knots;
use gcurve_geometry::{CatmullRom, CubicBezier, CurvePath, CurveShape, NurbsCurve};
use gcurve_math::axis::array_to_scene;
use gcurve_math::{DVec4, Point3};

use crate::extension::{SplineDefinition, SplineType};
use crate::options::CurveOptions;

/// Decode one spline into scene-space curve geometry.
///
/// Structurally unusable splines (see [`SplineDefinition::validate`]) are
/// reported as [`CurveError::InvalidSpline`].
pub fn decode_spline(spline: &SplineDefinition, options: &CurveOptions) -> Result<CurveShape> {
    spline.validate()?;
    match spline.spline_type {
        SplineType::Bezier => Ok(decode_bezier(spline)),
        SplineType::Nurbs => decode_nurbs(spline, options),
        SplineType::Poly => Ok(decode_poly(spline, options)),
    }
}

fn decode_bezier(spline: &SplineDefinition) -> CurveShape {
    let anchors: Vec<Point3> = spline.points.iter().map(|p| array_to_scene(p.co)).collect();
    // a missing handle collapses onto its anchor
    let left: Vec<Point3> = spline
        .points
        .iter()
        .map(|p| array_to_scene(p.handle_left.unwrap_or(p.co)))
        .collect();
    let right: Vec<Point3> = spline
        .points
        .iter()
        .map(|p| array_to_scene(p.handle_right.unwrap_or(p.co)))
        .collect();

    let segment = |from: usize, to: usize| {
        CubicBezier::new(anchors[from], right[from], left[to], anchors[to])
    };

    let n = anchors.len();
    if n == 2 && !spline.use_cyclic_u {
        return segment(0, 1).into();
    }

    let mut path = CurvePath::new();
    for i in 0..n - 1 {
        path.push(segment(i, i + 1));
    }
    if spline.use_cyclic_u {
        // closing segment ends on anchors[0], the exact start of the first segment
        path.push(segment(n - 1, 0));
    }
    path.into()
}

fn decode_nurbs(spline: &SplineDefinition, options: &CurveOptions) -> Result<CurveShape> {
    let order = spline.order_u.unwrap_or(1);
    let degree = order - 1;
    let cyclic = spline.use_cyclic_u;

    let knots = match &spline.knots {
        Some(knots) => knots.clone(),
        None => generate_knots(spline.points.len(), degree, cyclic),
    };

    let control_points: Vec<DVec4> = spline
        .points
        .iter()
        .map(|p| array_to_scene(p.co).extend(p.weight()))
        .collect();

    let (start_knot, end_knot) = if cyclic {
        (degree, knots.len() - degree - 1)
    } else {
        (0, knots.len() - 1)
    };

    let nurbs = NurbsCurve::new(degree, knots, control_points).with_knot_range(start_knot, end_knot);
    if !nurbs.is_well_formed() {
        return Err(CurveError::InvalidSpline(format!(
            "NURBS knot range {}..={} over {} knots",
            start_knot,
            end_knot,
            nurbs.knots.len()
        )));
    }

    let samples = nurbs.divide(options.nurbs_divisions(spline.resolution_u));
    let resampled = CatmullRom::new(samples, cyclic).with_kind(options.catmull_rom);
    Ok(CurvePath::from_segments([resampled.into()]).into())
}

fn decode_poly(spline: &SplineDefinition, options: &CurveOptions) -> CurveShape {
    let points = spline.points.iter().map(|p| array_to_scene(p.co)).collect();
    CatmullRom::new(points, spline.use_cyclic_u)
        .with_kind(options.catmull_rom)
        .into()
}
