//! Connector alignment
//!
//! A connector is a unit-length directional primitive (a cylinder whose
//! principal axis is `reference_axis`). Scaling it to `length`, rotating it by
//! `orientation` and centering it on `midpoint` makes it span exactly from one
//! endpoint to the other.

use crate::spatial::{Point3D, Quaternion, Vector3D};

/// Above this absolute cosine the two directions are treated as parallel.
const PARALLEL_TOLERANCE: f32 = 0.99999;

/// Placement of a connector between two endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorPlacement {
    /// Distance between the endpoints
    pub length: f32,
    /// Halfway point between the endpoints
    pub midpoint: Point3D,
    /// Rotation taking the reference axis onto the endpoint direction
    pub orientation: Quaternion,
}

/// Compute the placement of a connector spanning `from` → `to`.
///
/// Coincident endpoints yield a zero-length connector with identity orientation.
pub fn align(from: Point3D, to: Point3D, reference_axis: Vector3D) -> ConnectorPlacement {
    let direction = to - from;
    let length = direction.magnitude();
    let midpoint = from.lerp(&to, 0.5);

    let orientation = if length > 0.0 {
        rotation_between(reference_axis, direction)
    } else {
        Quaternion::IDENTITY
    };

    ConnectorPlacement {
        length,
        midpoint,
        orientation,
    }
}

/// Shortest rotation taking `reference_axis` onto `direction`.
pub fn rotation_between(reference_axis: Vector3D, direction: Vector3D) -> Quaternion {
    let reference = reference_axis.normalize();
    let target = direction.normalize();
    if reference == Vector3D::ZERO || target == Vector3D::ZERO {
        return Quaternion::IDENTITY;
    }

    let d = reference.dot(&target);
    if d.abs() > PARALLEL_TOLERANCE {
        if d > 0.0 {
            return Quaternion::IDENTITY;
        }
        // Antiparallel: the cross product vanishes, so turn half way round a
        // fixed perpendicular instead.
        return Quaternion::from_axis_angle(perpendicular(reference), std::f32::consts::PI);
    }

    let axis = reference.cross(&target).normalize();
    let angle = d.clamp(-1.0, 1.0).acos();
    Quaternion::from_axis_angle(axis, angle)
}

/// Unit vector perpendicular to `axis`, built from the world basis axis least
/// aligned with it (ties resolve in X, Y, Z order).
fn perpendicular(axis: Vector3D) -> Vector3D {
    let basis = [Vector3D::RIGHT, Vector3D::UP, Vector3D::FORWARD];
    let mut least = basis[0];
    for candidate in &basis[1..] {
        if candidate.dot(&axis).abs() < least.dot(&axis).abs() {
            least = *candidate;
        }
    }
    (least - axis * axis.dot(&least)).normalize()
}
