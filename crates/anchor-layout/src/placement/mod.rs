//! Placement state machine
//!
//! Turns anchor found/lost signals into scene updates:
//! - first detection generates the layout and spawns every visual
//! - re-detection moves the existing visuals to the anchor's new pose
//! - loss applies the configured [`LossPolicy`]

mod event;
mod session;

pub use event::{AnchorEvent, AnchorSignal, RawAnchorEvent, RawAnchorSignal};
pub use session::{DetectionOutcome, MarkerSlot, PlacementSession};

use serde::{Deserialize, Serialize};

/// Lifecycle of a placement session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    /// Anchor never seen; no visuals exist
    Uninitialized,
    /// Visuals exist and follow the tracked anchor
    Active,
    /// Visuals exist but the anchor is currently not tracked
    Lost,
}

/// What happens to the visuals while the anchor is lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossPolicy {
    /// Keep visuals visible at their last pose
    #[default]
    Persist,
    /// Hide visuals until the anchor is found again
    Hide,
}
