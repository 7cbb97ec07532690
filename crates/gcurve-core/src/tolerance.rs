/// Thresholds used by curve evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance;

impl Tolerance {
    /// Chord length below which Catmull-Rom knot spacing is treated as degenerate.
    pub const CHORD_EPSILON: f64 = 1e-4;

    /// Homogeneous weight below which a rational point is left unprojected.
    pub const WEIGHT_EPSILON: f64 = 1e-15;
}
