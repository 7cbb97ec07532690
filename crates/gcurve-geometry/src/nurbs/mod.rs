//! NURBS core algorithms: knot vector utilities and rational De Boor evaluation.

pub mod deboor;
pub mod knot;

pub use deboor::rational_curve_point;
pub use knot::{basis_functions, find_span, generate_knots};
