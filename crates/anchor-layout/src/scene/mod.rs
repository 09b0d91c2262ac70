//! Scene collaborator abstraction
//!
//! The placement engine never touches a scene graph directly. It drives any
//! runtime that implements [`SceneBackend`]:
//! - [`MemoryScene`] for tests and simulation
//! - host scene-graph runtimes (AR engines, game engines)

mod memory;

pub use memory::{EntityState, MemoryScene, SceneCall};

use std::fmt;

use crate::color::Color;
use crate::spatial::{Point3D, Quaternion};

/// Opaque identity of a visual entity owned by the scene runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Primitive geometry attached to an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Sphere { radius: f32 },
    /// Principal axis along the connector reference axis
    Cylinder { radius: f32, height: f32 },
    Plane { width: f32, height: f32 },
}

/// Surface material of an entity
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    pub roughness: Option<f32>,
    /// Host-defined texture reference (asset path, URL, handle name)
    pub texture: Option<String>,
}

impl Material {
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            roughness: None,
            texture: None,
        }
    }

    pub fn with_roughness(mut self, roughness: Option<f32>) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_texture(mut self, texture: Option<String>) -> Self {
        self.texture = texture;
        self
    }
}

/// Error type for scene operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    /// The runtime refused to create another entity
    #[error("Entity creation failed: {0}")]
    CreationFailed(String),
    /// The entity does not exist (never created or already destroyed)
    #[error("Unknown entity {0}")]
    UnknownEntity(EntityId),
    /// Any other runtime failure
    #[error("Scene backend error: {0}")]
    Backend(String),
}

/// Capabilities the placement engine requires from a scene runtime
pub trait SceneBackend {
    /// Create an empty entity
    fn create_entity(&mut self) -> Result<EntityId, SceneError>;

    /// Remove an entity and everything attached to it
    fn destroy_entity(&mut self, id: EntityId) -> Result<(), SceneError>;

    /// Attach or replace the entity geometry
    fn set_geometry(&mut self, id: EntityId, geometry: Geometry) -> Result<(), SceneError>;

    /// Attach or replace the entity material
    fn set_material(&mut self, id: EntityId, material: &Material) -> Result<(), SceneError>;

    /// Set the world position of the entity
    fn set_position(&mut self, id: EntityId, position: Point3D) -> Result<(), SceneError>;

    /// Set the world orientation of the entity
    fn set_orientation(&mut self, id: EntityId, orientation: Quaternion) -> Result<(), SceneError>;

    /// Show or hide the entity
    fn set_visible(&mut self, id: EntityId, visible: bool) -> Result<(), SceneError>;
}
