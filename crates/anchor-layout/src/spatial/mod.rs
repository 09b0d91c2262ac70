//! Spatial primitives for anchor-relative placement
//!
//! Uses a right-handed coordinate system:
//! - X: Right (+) / Left (-)
//! - Y: Up (+) / Down (-)
//! - Z: Forward (+) / Backward (-)

mod point3d;
mod vector3d;
mod quaternion;

pub use point3d::Point3D;
pub use vector3d::Vector3D;
pub use quaternion::Quaternion;
