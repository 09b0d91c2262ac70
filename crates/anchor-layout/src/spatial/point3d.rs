//! 3D point representation

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use super::Vector3D;

/// A point in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3D {
    /// Origin point (0, 0, 0)
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new 3D point
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Calculate the Euclidean distance to another point
    pub fn distance(&self, other: &Point3D) -> f32 {
        (*other - *self).magnitude()
    }

    /// Linear interpolation between two points
    pub fn lerp(&self, other: &Point3D, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// True when no coordinate is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Convert to a Vector3D (from origin)
    pub fn to_vector(&self) -> Vector3D {
        Vector3D::new(self.x, self.y, self.z)
    }
}

impl Add<Vector3D> for Point3D {
    type Output = Point3D;

    fn add(self, rhs: Vector3D) -> Self::Output {
        Point3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3D {
    type Output = Vector3D;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point3D::ORIGIN;
        let b = Point3D::new(3.0, 4.0, 0.0);
        assert!((a.distance(&b) - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_lerp_midpoint() {
        let a = Point3D::new(0.0, 0.0, 0.0);
        let b = Point3D::new(10.0, -4.0, 2.0);
        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid, Point3D::new(5.0, -2.0, 1.0));
    }

    #[test]
    fn test_offset_arithmetic() {
        let anchor = Point3D::new(1.0, 2.0, 3.0);
        let moved = anchor + Vector3D::new(0.5, -2.0, 1.0);
        assert_eq!(moved, Point3D::new(1.5, 0.0, 4.0));
        assert_eq!(moved - anchor, Vector3D::new(0.5, -2.0, 1.0));
    }

    #[test]
    fn test_is_finite() {
        assert!(Point3D::new(1.0, 2.0, 3.0).is_finite());
        assert!(!Point3D::new(f32::NAN, 0.0, 0.0).is_finite());
        assert!(!Point3D::new(0.0, f32::INFINITY, 0.0).is_finite());
    }
}
