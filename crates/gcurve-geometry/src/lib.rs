//! Curve geometry for reconstructed splines: cubic Bezier, Catmull-Rom,
//! NURBS evaluation, composite paths and uniform sampling.

pub mod curve;
pub mod nurbs;
pub mod tessellate;

pub use curve::{CatmullRom, CatmullRomKind, CubicBezier, Curve, CurvePath, CurveShape, NurbsCurve};
