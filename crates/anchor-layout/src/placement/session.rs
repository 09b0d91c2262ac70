//! Found/lost placement session

use tracing::{debug, info, warn};

use super::{AnchorEvent, AnchorSignal, LayoutState, LossPolicy, RawAnchorSignal};
use crate::align::align;
use crate::config::{AuxiliaryVisual, LayoutConfig};
use crate::error::Result;
use crate::layout::RelativeOffset;
use crate::scene::{EntityId, Geometry, Material, SceneBackend, SceneError};
use crate::spatial::{Point3D, Quaternion};

/// A marker offset together with the visuals placed for it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSlot {
    pub offset: RelativeOffset,
    pub marker: EntityId,
    pub connector: Option<EntityId>,
}

/// What a detection event did to the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionOutcome {
    /// First detection: every visual was created
    Spawned { markers: usize },
    /// Re-detection: existing visuals were moved
    Repositioned { markers: usize },
}

/// Owns the layout, the entity identities and the found/lost state of one anchor.
///
/// The relative offsets are generated once, on the first detection. Every
/// later detection reapplies them to the anchor's new pose; the number of
/// slots never changes until [`PlacementSession::teardown`].
#[derive(Debug)]
pub struct PlacementSession {
    config: LayoutConfig,
    state: LayoutState,
    slots: Vec<MarkerSlot>,
    auxiliary: Option<EntityId>,
    hidden: bool,
}

impl PlacementSession {
    /// Create a session, rejecting invalid configuration up front
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: LayoutState::Uninitialized,
            slots: Vec::new(),
            auxiliary: None,
            hidden: false,
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    pub fn slots(&self) -> &[MarkerSlot] {
        &self.slots
    }

    pub fn auxiliary(&self) -> Option<EntityId> {
        self.auxiliary
    }

    /// Whether the visuals are currently hidden by the loss policy
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Every entity owned by this session, markers first
    pub fn entities(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.slots.iter().map(|s| s.marker).collect();
        ids.extend(self.slots.iter().filter_map(|s| s.connector));
        ids.extend(self.auxiliary);
        ids
    }

    /// Dispatch a validated tracking signal
    pub fn handle(
        &mut self,
        scene: &mut dyn SceneBackend,
        signal: &AnchorSignal,
    ) -> Result<Option<DetectionOutcome>> {
        match signal {
            AnchorSignal::Found(event) => self.on_anchor_detected(scene, event).map(Some),
            AnchorSignal::Lost => self.on_anchor_lost(scene).map(|_| None),
        }
    }

    /// Validate and dispatch a raw tracking signal
    pub fn handle_raw(
        &mut self,
        scene: &mut dyn SceneBackend,
        raw: RawAnchorSignal,
    ) -> Result<Option<DetectionOutcome>> {
        let signal = AnchorSignal::try_from(raw).inspect_err(|e| {
            warn!("Dropping anchor signal: {}", e);
        })?;
        self.handle(scene, &signal)
    }

    /// Handle an anchor detection: spawn on first sight, reposition afterwards
    pub fn on_anchor_detected(
        &mut self,
        scene: &mut dyn SceneBackend,
        event: &AnchorEvent,
    ) -> Result<DetectionOutcome> {
        if let Err(e) = event.validate() {
            warn!("Dropping anchor detection: {}", e);
            return Err(e);
        }

        match self.state {
            LayoutState::Uninitialized => self.spawn(scene, event),
            LayoutState::Active | LayoutState::Lost => self.reposition(scene, event),
        }
    }

    /// Handle loss of the anchor according to the configured [`LossPolicy`]
    pub fn on_anchor_lost(&mut self, scene: &mut dyn SceneBackend) -> Result<()> {
        match self.state {
            LayoutState::Uninitialized => {
                debug!("Anchor lost before first detection; nothing to do");
                Ok(())
            }
            LayoutState::Lost => Ok(()),
            LayoutState::Active => {
                self.state = LayoutState::Lost;
                if self.config.loss_policy == LossPolicy::Hide {
                    self.set_visible(scene, false)?;
                }
                info!(
                    policy = ?self.config.loss_policy,
                    entities = self.entities().len(),
                    "Anchor lost"
                );
                Ok(())
            }
        }
    }

    /// Destroy every owned entity and return to `Uninitialized`
    pub fn teardown(&mut self, scene: &mut dyn SceneBackend) -> Result<usize> {
        let ids = self.entities();
        self.slots.clear();
        self.auxiliary = None;
        self.hidden = false;
        self.state = LayoutState::Uninitialized;

        let mut first_error: Option<SceneError> = None;
        for id in &ids {
            if let Err(e) = scene.destroy_entity(*id) {
                warn!("Failed to destroy entity {}: {}", id, e);
                first_error.get_or_insert(e);
            }
        }

        info!(entities = ids.len(), "Placement session torn down");
        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(ids.len()),
        }
    }

    fn spawn(&mut self, scene: &mut dyn SceneBackend, event: &AnchorEvent) -> Result<DetectionOutcome> {
        let offsets = self.config.layout.generate();
        let mut created = Vec::new();

        let spawned = self.spawn_entities(scene, event, &offsets, &mut created);
        let (slots, auxiliary) = match spawned {
            Ok(spawned) => spawned,
            Err(e) => {
                warn!(
                    created = created.len(),
                    "Spawn failed, rolling back: {}", e
                );
                for id in created.iter().rev() {
                    if let Err(err) = scene.destroy_entity(*id) {
                        warn!("Rollback could not destroy entity {}: {}", id, err);
                    }
                }
                return Err(e);
            }
        };

        self.slots = slots;
        self.auxiliary = auxiliary;
        self.hidden = false;
        self.state = LayoutState::Active;

        info!(
            markers = self.slots.len(),
            entities = created.len(),
            x = event.position.x,
            y = event.position.y,
            z = event.position.z,
            "Anchor found, layout spawned"
        );
        Ok(DetectionOutcome::Spawned {
            markers: self.slots.len(),
        })
    }

    fn spawn_entities(
        &self,
        scene: &mut dyn SceneBackend,
        event: &AnchorEvent,
        offsets: &[RelativeOffset],
        created: &mut Vec<EntityId>,
    ) -> Result<(Vec<MarkerSlot>, Option<EntityId>)> {
        let marker_material = Material::solid(self.config.marker.color)
            .with_roughness(self.config.marker.roughness);
        let connector_material = Material::solid(self.config.connector.color);

        let mut slots = Vec::with_capacity(offsets.len());
        for offset in offsets {
            let marker = create(scene, created)?;
            scene.set_geometry(
                marker,
                Geometry::Sphere {
                    radius: self.config.marker.radius,
                },
            )?;
            scene.set_material(marker, &marker_material)?;

            let connector = if self.config.connector.enabled {
                let connector = create(scene, created)?;
                scene.set_material(connector, &connector_material)?;
                Some(connector)
            } else {
                None
            };

            let slot = MarkerSlot {
                offset: *offset,
                marker,
                connector,
            };
            self.place_slot(scene, &slot, event)?;
            slots.push(slot);
        }

        let auxiliary = match &self.config.auxiliary {
            AuxiliaryVisual::None => None,
            AuxiliaryVisual::GroundLine { .. } => {
                let id = create(scene, created)?;
                scene.set_material(id, &connector_material)?;
                Some(id)
            }
            AuxiliaryVisual::Backdrop {
                color,
                texture,
                roughness,
                ..
            } => {
                let id = create(scene, created)?;
                let material = Material::solid(*color)
                    .with_roughness(*roughness)
                    .with_texture(texture.clone());
                scene.set_material(id, &material)?;
                Some(id)
            }
        };
        if let Some(id) = auxiliary {
            self.place_auxiliary(scene, id, event)?;
        }

        Ok((slots, auxiliary))
    }

    fn reposition(&mut self, scene: &mut dyn SceneBackend, event: &AnchorEvent) -> Result<DetectionOutcome> {
        for slot in &self.slots {
            self.place_slot(scene, slot, event)?;
        }
        if let Some(id) = self.auxiliary {
            self.place_auxiliary(scene, id, event)?;
        }
        if self.hidden {
            self.set_visible(scene, true)?;
        }

        let was_lost = self.state == LayoutState::Lost;
        self.state = LayoutState::Active;

        debug!(
            markers = self.slots.len(),
            reacquired = was_lost,
            x = event.position.x,
            y = event.position.y,
            z = event.position.z,
            "Anchor found, layout repositioned"
        );
        Ok(DetectionOutcome::Repositioned {
            markers: self.slots.len(),
        })
    }

    fn marker_position(&self, offset: &RelativeOffset, event: &AnchorEvent) -> Point3D {
        match event.rotation {
            Some(rotation) if self.config.layout.follow_anchor_rotation => {
                offset.apply_rotated(event.position, rotation)
            }
            _ => offset.apply(event.position),
        }
    }

    /// Write the marker and connector transforms of one slot
    fn place_slot(&self, scene: &mut dyn SceneBackend, slot: &MarkerSlot, event: &AnchorEvent) -> Result<()> {
        let position = self.marker_position(&slot.offset, event);
        scene.set_position(slot.marker, position)?;

        if let Some(connector) = slot.connector {
            let placement = align(event.position, position, self.config.connector.reference_axis);
            scene.set_geometry(
                connector,
                Geometry::Cylinder {
                    radius: self.config.connector.radius,
                    height: placement.length,
                },
            )?;
            scene.set_position(connector, placement.midpoint)?;
            scene.set_orientation(connector, placement.orientation)?;
        }
        Ok(())
    }

    fn place_auxiliary(&self, scene: &mut dyn SceneBackend, id: EntityId, event: &AnchorEvent) -> Result<()> {
        match &self.config.auxiliary {
            AuxiliaryVisual::None => Ok(()),
            AuxiliaryVisual::GroundLine { floor_height } => {
                let anchor = event.position;
                let floor = Point3D::new(anchor.x, *floor_height, anchor.z);
                let placement = align(floor, anchor, self.config.connector.reference_axis);
                scene.set_geometry(
                    id,
                    Geometry::Cylinder {
                        radius: self.config.connector.radius,
                        height: placement.length,
                    },
                )?;
                scene.set_position(id, placement.midpoint)?;
                scene.set_orientation(id, placement.orientation)?;
                Ok(())
            }
            AuxiliaryVisual::Backdrop { width, height, .. } => {
                scene.set_geometry(
                    id,
                    Geometry::Plane {
                        width: event.scale_width.unwrap_or(*width),
                        height: event.scale_height.unwrap_or(*height),
                    },
                )?;
                scene.set_position(id, event.position)?;
                scene.set_orientation(id, event.rotation.unwrap_or(Quaternion::IDENTITY))?;
                Ok(())
            }
        }
    }

    /// Marks the session hidden before the first call, so a partial hide is
    /// still undone by the next detection. Cleared only once every entity is shown.
    fn set_visible(&mut self, scene: &mut dyn SceneBackend, visible: bool) -> Result<()> {
        if !visible {
            self.hidden = true;
        }
        for id in self.entities() {
            scene.set_visible(id, visible)?;
        }
        self.hidden = !visible;
        Ok(())
    }
}

fn create(scene: &mut dyn SceneBackend, created: &mut Vec<EntityId>) -> Result<EntityId> {
    let id = scene.create_entity()?;
    created.push(id);
    Ok(id)
}
