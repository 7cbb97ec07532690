//! Catmull-Rom spline through a sequence of points.

use gcurve_core::Tolerance;
use gcurve_math::Point3;
use serde::{Deserialize, Serialize};

use super::Curve;

/// Knot spacing used between consecutive points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatmullRomKind {
    /// Uniform spacing with the given tension (0.5 is the classic spline).
    Uniform { tension: f64 },
    /// Square root of chord length. Avoids cusps and self-intersections.
    #[default]
    Centripetal,
    /// Chord length.
    Chordal,
}

/// An interpolating spline passing through every point in `points`.
///
/// The parameter runs over `[0, 1]`; each consecutive pair of points occupies
/// an equal share of it. A closed spline also interpolates the last point
/// back to the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatmullRom {
    pub points: Vec<Point3>,
    pub closed: bool,
    #[serde(default)]
    pub kind: CatmullRomKind,
}

/// Cubic `c0 + c1 t + c2 t^2 + c3 t^3` for one coordinate.
#[derive(Debug, Clone, Copy)]
struct CubicPoly {
    c0: f64,
    c1: f64,
    c2: f64,
    c3: f64,
}

impl CubicPoly {
    /// Hermite form from end values and end tangents.
    fn hermite(x0: f64, x1: f64, t0: f64, t1: f64) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    fn uniform(x0: f64, x1: f64, x2: f64, x3: f64, tension: f64) -> Self {
        Self::hermite(x1, x2, tension * (x2 - x0), tension * (x3 - x1))
    }

    fn non_uniform(x0: f64, x1: f64, x2: f64, x3: f64, dt0: f64, dt1: f64, dt2: f64) -> Self {
        let mut t1 = (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
        let mut t2 = (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
        // rescale tangents for parametrization in [0, 1]
        t1 *= dt1;
        t2 *= dt1;
        Self::hermite(x1, x2, t1, t2)
    }

    fn eval(&self, t: f64) -> f64 {
        let t2 = t * t;
        let t3 = t2 * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }
}

impl CatmullRom {
    pub fn new(points: Vec<Point3>, closed: bool) -> Self {
        Self {
            points,
            closed,
            kind: CatmullRomKind::Centripetal,
        }
    }

    pub fn with_kind(mut self, kind: CatmullRomKind) -> Self {
        self.kind = kind;
        self
    }

    /// Locate the span for `t` and return its four support points plus the
    /// local weight within the span.
    fn support(&self, t: f64) -> ([Point3; 4], f64) {
        let pts = &self.points;
        let l = pts.len();

        let p = (l - usize::from(!self.closed)) as f64 * t;
        let mut int_point = p.floor().max(0.0) as usize;
        let mut weight = p - int_point as f64;

        if self.closed {
            if int_point == 0 {
                int_point += l;
            }
        } else if int_point >= l - 1 {
            int_point = l - 2;
            weight = 1.0;
        }

        let p0 = if self.closed || int_point > 0 {
            pts[(int_point + l - 1) % l]
        } else {
            // extrapolate a phantom point before the start
            pts[0] - (pts[1] - pts[0])
        };
        let p1 = pts[int_point % l];
        let p2 = pts[(int_point + 1) % l];
        let p3 = if self.closed || int_point + 2 < l {
            pts[(int_point + 2) % l]
        } else {
            pts[l - 1] - (pts[l - 2] - pts[l - 1])
        };

        ([p0, p1, p2, p3], weight)
    }
}

impl Curve for CatmullRom {
    fn point_at(&self, t: f64) -> Point3 {
        match self.points.len() {
            0 => return Point3::ZERO,
            1 => return self.points[0],
            _ => {}
        }

        let ([p0, p1, p2, p3], weight) = self.support(t);

        let polys: [CubicPoly; 3] = match self.kind {
            CatmullRomKind::Uniform { tension } => [0, 1, 2]
                .map(|k| CubicPoly::uniform(p0[k], p1[k], p2[k], p3[k], tension)),
            CatmullRomKind::Centripetal | CatmullRomKind::Chordal => {
                let pow = if self.kind == CatmullRomKind::Centripetal {
                    0.25
                } else {
                    0.5
                };
                let mut dt0 = p0.distance_squared(p1).powf(pow);
                let mut dt1 = p1.distance_squared(p2).powf(pow);
                let mut dt2 = p2.distance_squared(p3).powf(pow);

                // safety check for repeated points
                if dt1 < Tolerance::CHORD_EPSILON {
                    dt1 = 1.0;
                }
                if dt0 < Tolerance::CHORD_EPSILON {
                    dt0 = dt1;
                }
                if dt2 < Tolerance::CHORD_EPSILON {
                    dt2 = dt1;
                }

                [0, 1, 2].map(|k| {
                    CubicPoly::non_uniform(p0[k], p1[k], p2[k], p3[k], dt0, dt1, dt2)
                })
            }
        };

        Point3::new(polys[0].eval(weight), polys[1].eval(weight), polys[2].eval(weight))
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
