//! Anchor-relative marker offset

use serde::{Deserialize, Serialize};

use crate::spatial::{Point3D, Quaternion, Vector3D};

/// A marker position relative to the anchor center.
///
/// Computed once when the anchor is first detected; never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeOffset(Vector3D);

impl RelativeOffset {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vector3D::new(x, y, z))
    }

    pub fn vector(&self) -> Vector3D {
        self.0
    }

    /// Absolute position for an anchor at `anchor`
    pub fn apply(&self, anchor: Point3D) -> Point3D {
        anchor + self.0
    }

    /// Absolute position for an anchor at `anchor` oriented by `rotation`
    pub fn apply_rotated(&self, anchor: Point3D, rotation: Quaternion) -> Point3D {
        anchor + rotation.rotate_vector(self.0)
    }
}

impl From<Vector3D> for RelativeOffset {
    fn from(v: Vector3D) -> Self {
        Self(v)
    }
}
