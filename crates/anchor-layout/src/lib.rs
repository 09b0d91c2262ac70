//! anchor-layout: marker layouts that follow a tracked AR anchor
//!
//! This crate provides the placement core of an image-target AR scene:
//! - Deterministic marker layouts (Fibonacci sphere, circle) around the anchor
//! - Connector alignment between the anchor center and each marker
//! - A found/lost state machine that spawns visuals once and repositions them
//!   on every re-detection
//! - A scene backend trait so any scene-graph runtime can host the visuals

pub mod spatial;
pub mod color;
pub mod layout;
pub mod align;
pub mod scene;
pub mod placement;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use spatial::{Point3D, Vector3D, Quaternion};
pub use color::Color;
pub use layout::{Distribution, Hemisphere, LayoutSpec, RelativeOffset};
pub use align::{align, ConnectorPlacement};
pub use scene::{EntityId, Geometry, Material, MemoryScene, SceneBackend, SceneError};
pub use placement::{
    AnchorEvent, AnchorSignal, DetectionOutcome, LayoutState, LossPolicy, MarkerSlot,
    PlacementSession, RawAnchorEvent, RawAnchorSignal,
};
pub use config::{AuxiliaryVisual, LayoutConfig, Preset};
pub use error::{LayoutError, Result};
