//! Curve trait and the concrete curve kinds produced by spline decoding.

mod bezier;
mod catmull_rom;
mod nurbs;
mod path;

use gcurve_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

pub use bezier::CubicBezier;
pub use catmull_rom::{CatmullRom, CatmullRomKind};
pub use nurbs::NurbsCurve;
pub use path::CurvePath;

/// Number of chords used to approximate arc length.
pub const ARC_LENGTH_DIVISIONS: usize = 200;

/// Trait for parametric curves in 3D space.
pub trait Curve: Send + Sync {
    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point3;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    /// Tangent vector at parameter `t`. Central difference unless overridden.
    fn tangent_at(&self, t: f64) -> Vector3 {
        let (t0, t1) = self.domain();
        let h = (t1 - t0) * 1e-4;
        let a = (t - h).max(t0);
        let b = (t + h).min(t1);
        if b <= a {
            return Vector3::ZERO;
        }
        (self.point_at(b) - self.point_at(a)) / (b - a)
    }

    /// Whether the curve is closed (start == end).
    fn is_closed(&self) -> bool {
        false
    }

    /// Approximate arc length as the sum of `ARC_LENGTH_DIVISIONS` chords.
    fn length(&self) -> f64 {
        let (t0, t1) = self.domain();
        let mut prev = self.point_at(t0);
        let mut total = 0.0;
        for i in 1..=ARC_LENGTH_DIVISIONS {
            let t = t0 + (t1 - t0) * i as f64 / ARC_LENGTH_DIVISIONS as f64;
            let p = self.point_at(t);
            total += prev.distance(p);
            prev = p;
        }
        total
    }
}

/// A decoded curve. Closed set of the shapes a spline can decode into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CurveShape {
    CubicBezier(CubicBezier),
    CatmullRom(CatmullRom),
    Path(CurvePath),
}

impl CurveShape {
    /// Number of leaf segments once nested paths are flattened.
    pub fn segment_count(&self) -> usize {
        match self {
            CurveShape::Path(path) => path.segments().iter().map(|s| s.segment_count()).sum(),
            _ => 1,
        }
    }
}

impl Curve for CurveShape {
    fn point_at(&self, t: f64) -> Point3 {
        match self {
            CurveShape::CubicBezier(c) => c.point_at(t),
            CurveShape::CatmullRom(c) => c.point_at(t),
            CurveShape::Path(c) => c.point_at(t),
        }
    }

    fn domain(&self) -> (f64, f64) {
        match self {
            CurveShape::CubicBezier(c) => c.domain(),
            CurveShape::CatmullRom(c) => c.domain(),
            CurveShape::Path(c) => c.domain(),
        }
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        match self {
            CurveShape::CubicBezier(c) => c.tangent_at(t),
            CurveShape::CatmullRom(c) => c.tangent_at(t),
            CurveShape::Path(c) => c.tangent_at(t),
        }
    }

    fn is_closed(&self) -> bool {
        match self {
            CurveShape::CubicBezier(c) => c.is_closed(),
            CurveShape::CatmullRom(c) => c.is_closed(),
            CurveShape::Path(c) => c.is_closed(),
        }
    }

    fn length(&self) -> f64 {
        match self {
            CurveShape::CubicBezier(c) => c.length(),
            CurveShape::CatmullRom(c) => c.length(),
            CurveShape::Path(c) => c.length(),
        }
    }
}

impl From<CubicBezier> for CurveShape {
    fn from(c: CubicBezier) -> Self {
        CurveShape::CubicBezier(c)
    }
}

impl From<CatmullRom> for CurveShape {
    fn from(c: CatmullRom) -> Self {
        CurveShape::CatmullRom(c)
    }
}

impl From<CurvePath> for CurveShape {
    fn from(c: CurvePath) -> Self {
        CurveShape::Path(c)
    }
}
