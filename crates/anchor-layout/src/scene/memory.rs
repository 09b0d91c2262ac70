//! In-memory scene runtime
//!
//! Keeps the latest state of every entity plus an ordered log of the calls
//! made against it. Tests inspect the log; the demo prints the state.

use std::collections::BTreeMap;

use super::{EntityId, Geometry, Material, SceneBackend, SceneError};
use crate::spatial::{Point3D, Quaternion};

/// One call received by a [`MemoryScene`]
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCall {
    Create(EntityId),
    Destroy(EntityId),
    Geometry(EntityId, Geometry),
    Material(EntityId, Material),
    Position(EntityId, Point3D),
    Orientation(EntityId, Quaternion),
    Visible(EntityId, bool),
}

impl SceneCall {
    /// True for position and orientation updates
    pub fn is_transform(&self) -> bool {
        matches!(self, SceneCall::Position(..) | SceneCall::Orientation(..))
    }
}

/// Current state of an entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntityState {
    pub geometry: Option<Geometry>,
    pub material: Option<Material>,
    pub position: Point3D,
    pub orientation: Quaternion,
    pub visible: bool,
}

impl Default for EntityState {
    fn default() -> Self {
        Self {
            geometry: None,
            material: None,
            position: Point3D::ORIGIN,
            orientation: Quaternion::IDENTITY,
            visible: true,
        }
    }
}

/// Scene runtime that lives entirely in memory
#[derive(Debug, Default)]
pub struct MemoryScene {
    entities: BTreeMap<EntityId, EntityState>,
    calls: Vec<SceneCall>,
    next_id: u64,
    /// Remaining creations before `create_entity` starts failing
    creation_budget: Option<usize>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `create_entity` call after `limit` successful ones
    pub fn with_creation_limit(mut self, limit: usize) -> Self {
        self.creation_budget = Some(limit);
        self
    }

    pub fn entity(&self, id: EntityId) -> Option<&EntityState> {
        self.entities.get(&id)
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &EntityState)> {
        self.entities.iter().map(|(id, state)| (*id, state))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn calls(&self) -> &[SceneCall] {
        &self.calls
    }

    /// Drain the call log, returning everything recorded so far
    pub fn take_calls(&mut self) -> Vec<SceneCall> {
        std::mem::take(&mut self.calls)
    }

    fn state_mut(&mut self, id: EntityId) -> Result<&mut EntityState, SceneError> {
        self.entities.get_mut(&id).ok_or(SceneError::UnknownEntity(id))
    }
}

impl SceneBackend for MemoryScene {
    fn create_entity(&mut self) -> Result<EntityId, SceneError> {
        if let Some(budget) = self.creation_budget.as_mut() {
            if *budget == 0 {
                return Err(SceneError::CreationFailed(format!(
                    "entity limit reached ({} live)",
                    self.entities.len()
                )));
            }
            *budget -= 1;
        }

        self.next_id += 1;
        let id = EntityId(self.next_id);
        self.entities.insert(id, EntityState::default());
        self.calls.push(SceneCall::Create(id));
        Ok(id)
    }

    fn destroy_entity(&mut self, id: EntityId) -> Result<(), SceneError> {
        self.entities.remove(&id).ok_or(SceneError::UnknownEntity(id))?;
        self.calls.push(SceneCall::Destroy(id));
        Ok(())
    }

    fn set_geometry(&mut self, id: EntityId, geometry: Geometry) -> Result<(), SceneError> {
        self.state_mut(id)?.geometry = Some(geometry);
        self.calls.push(SceneCall::Geometry(id, geometry));
        Ok(())
    }

    fn set_material(&mut self, id: EntityId, material: &Material) -> Result<(), SceneError> {
        self.state_mut(id)?.material = Some(material.clone());
        self.calls.push(SceneCall::Material(id, material.clone()));
        Ok(())
    }

    fn set_position(&mut self, id: EntityId, position: Point3D) -> Result<(), SceneError> {
        self.state_mut(id)?.position = position;
        self.calls.push(SceneCall::Position(id, position));
        Ok(())
    }

    fn set_orientation(&mut self, id: EntityId, orientation: Quaternion) -> Result<(), SceneError> {
        self.state_mut(id)?.orientation = orientation;
        self.calls.push(SceneCall::Orientation(id, orientation));
        Ok(())
    }

    fn set_visible(&mut self, id: EntityId, visible: bool) -> Result<(), SceneError> {
        self.state_mut(id)?.visible = visible;
        self.calls.push(SceneCall::Visible(id, visible));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_create_and_update() {
        let mut scene = MemoryScene::new();
        let id = scene.create_entity().unwrap();
        scene.set_geometry(id, Geometry::Sphere { radius: 0.5 }).unwrap();
        scene.set_material(id, &Material::solid(Color::MARKER_PINK)).unwrap();
        scene.set_position(id, Point3D::new(1.0, 2.0, 3.0)).unwrap();

        let state = scene.entity(id).unwrap();
        assert_eq!(state.geometry, Some(Geometry::Sphere { radius: 0.5 }));
        assert_eq!(state.position, Point3D::new(1.0, 2.0, 3.0));
        assert!(state.visible);
        assert_eq!(scene.calls().len(), 4);
    }

    #[test]
    fn test_unknown_entity() {
        let mut scene = MemoryScene::new();
        let err = scene.set_visible(EntityId(42), false).unwrap_err();
        assert_eq!(err, SceneError::UnknownEntity(EntityId(42)));
        assert!(scene.calls().is_empty());
    }

    #[test]
    fn test_creation_limit() {
        let mut scene = MemoryScene::new().with_creation_limit(2);
        assert!(scene.create_entity().is_ok());
        assert!(scene.create_entity().is_ok());
        assert!(matches!(
            scene.create_entity(),
            Err(SceneError::CreationFailed(_))
        ));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_destroy() {
        let mut scene = MemoryScene::new();
        let id = scene.create_entity().unwrap();
        scene.destroy_entity(id).unwrap();
        assert!(scene.is_empty());
        assert!(scene.destroy_entity(id).is_err());
    }
}
