use crate::{DMat4, DQuat, DVec3, Point3};
use serde::{Deserialize, Serialize};

/// Local transform of a scene node, stored as translation / rotation / scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeTransform {
    pub translation: DVec3,
    pub rotation: DQuat,
    pub scale: DVec3,
}

impl NodeTransform {
    pub fn identity() -> Self {
        Self {
            translation: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            scale: DVec3::ONE,
        }
    }

    pub fn from_translation(t: DVec3) -> Self {
        Self {
            translation: t,
            ..Self::identity()
        }
    }

    /// Decompose a column-major 4x4 matrix (glTF `matrix` layout).
    pub fn from_cols_array(matrix: &[f64; 16]) -> Self {
        Self::from_mat4(DMat4::from_cols_array(matrix))
    }

    pub fn from_mat4(m: DMat4) -> Self {
        let (scale, rotation, translation) = m.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Build from optional glTF TRS fields. Missing parts stay at identity.
    ///
    /// `rotation` is a unit quaternion in `[x, y, z, w]` order.
    pub fn from_trs(
        translation: Option<[f64; 3]>,
        rotation: Option<[f64; 4]>,
        scale: Option<[f64; 3]>,
    ) -> Self {
        let mut t = Self::identity();
        if let Some(v) = translation {
            t.translation = DVec3::from_array(v);
        }
        if let Some(q) = rotation {
            t.rotation = DQuat::from_array(q);
        }
        if let Some(s) = scale {
            t.scale = DVec3::from_array(s);
        }
        t
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.to_mat4().transform_point3(p)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::identity()
    }
}
