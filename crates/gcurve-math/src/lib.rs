//! Math primitives shared by the curve crates.

pub mod axis;
pub mod transform;

pub use glam::{DMat4, DQuat, DVec3, DVec4};
pub use transform::NodeTransform;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;
