//! Anchor detection events from the tracking collaborator

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::spatial::{Point3D, Quaternion};

/// Validated snapshot of an anchor detection
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorEvent {
    /// Current world position of the anchor center
    pub position: Point3D,
    /// Current world orientation, when the tracker reports one
    pub rotation: Option<Quaternion>,
    /// Extent hints for panel-style visuals
    pub scale_width: Option<f32>,
    pub scale_height: Option<f32>,
}

impl AnchorEvent {
    /// Detection at `position` without orientation or scale hints
    pub fn at(position: Point3D) -> Self {
        Self {
            position,
            rotation: None,
            scale_width: None,
            scale_height: None,
        }
    }

    pub fn with_rotation(mut self, rotation: Quaternion) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_scale(mut self, width: f32, height: f32) -> Self {
        self.scale_width = Some(width);
        self.scale_height = Some(height);
        self
    }

    /// Reject non-finite coordinates, degenerate rotations and non-positive scales
    pub fn validate(&self) -> Result<()> {
        if !self.position.is_finite() {
            return Err(malformed(format!(
                "position is not finite: {:?}",
                self.position
            )));
        }
        if let Some(rotation) = self.rotation {
            if !rotation.is_finite() || rotation.magnitude() == 0.0 {
                return Err(malformed(format!("rotation is degenerate: {rotation:?}")));
            }
        }
        for (name, scale) in [("scale_width", self.scale_width), ("scale_height", self.scale_height)] {
            if let Some(value) = scale {
                if !value.is_finite() || value <= 0.0 {
                    return Err(malformed(format!("{name} must be positive, got {value}")));
                }
            }
        }
        Ok(())
    }
}

/// Detection payload as delivered by the tracker, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAnchorEvent {
    #[serde(default)]
    pub position: Option<Point3D>,
    #[serde(default)]
    pub rotation: Option<Quaternion>,
    #[serde(default)]
    pub scale_width: Option<f32>,
    #[serde(default)]
    pub scale_height: Option<f32>,
}

impl TryFrom<RawAnchorEvent> for AnchorEvent {
    type Error = LayoutError;

    fn try_from(raw: RawAnchorEvent) -> Result<Self> {
        let position = raw
            .position
            .ok_or_else(|| malformed("detection event carries no position"))?;
        let mut event = AnchorEvent {
            position,
            rotation: raw.rotation,
            scale_width: raw.scale_width,
            scale_height: raw.scale_height,
        };
        // Normalizing a zero quaternion yields identity, so check first
        event.validate()?;
        event.rotation = event.rotation.map(|q| q.normalize());
        Ok(event)
    }
}

/// Anchor tracking signal
#[derive(Debug, Clone, PartialEq)]
pub enum AnchorSignal {
    /// Anchor detected or re-detected
    Found(AnchorEvent),
    /// Anchor no longer tracked
    Lost,
}

/// Tracking signal as serialized on the wire (one JSON object per line)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawAnchorSignal {
    Found(RawAnchorEvent),
    Lost,
}

impl RawAnchorSignal {
    /// Parse a single JSON line, e.g. `{"type":"found","position":{"x":0,"y":1,"z":0}}`
    pub fn from_json(line: &str) -> Result<Self> {
        serde_json::from_str(line).map_err(|e| malformed(e.to_string()))
    }
}

impl TryFrom<RawAnchorSignal> for AnchorSignal {
    type Error = LayoutError;

    fn try_from(raw: RawAnchorSignal) -> Result<Self> {
        match raw {
            RawAnchorSignal::Found(event) => Ok(AnchorSignal::Found(event.try_into()?)),
            RawAnchorSignal::Lost => Ok(AnchorSignal::Lost),
        }
    }
}

fn malformed(message: impl Into<String>) -> LayoutError {
    LayoutError::MalformedEvent(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_position_is_rejected() {
        let err = AnchorEvent::try_from(RawAnchorEvent::default()).unwrap_err();
        assert!(matches!(err, LayoutError::MalformedEvent(_)));
    }

    #[test]
    fn test_non_finite_position_is_rejected() {
        let raw = RawAnchorEvent {
            position: Some(Point3D::new(0.0, f32::NAN, 0.0)),
            ..RawAnchorEvent::default()
        };
        assert!(AnchorEvent::try_from(raw).is_err());
    }

    #[test]
    fn test_bad_scale_is_rejected() {
        let event = AnchorEvent::at(Point3D::ORIGIN).with_scale(0.0, 1.0);
        assert!(event.validate().is_err());
    }

    #[test]
    fn test_rotation_is_normalized() {
        let raw = RawAnchorEvent {
            position: Some(Point3D::ORIGIN),
            rotation: Some(Quaternion::new(0.0, 0.0, 0.0, 2.0)),
            ..RawAnchorEvent::default()
        };
        let event = AnchorEvent::try_from(raw).unwrap();
        assert_eq!(event.rotation, Some(Quaternion::IDENTITY));
    }

    #[test]
    fn test_zero_rotation_is_rejected() {
        let event = AnchorEvent::at(Point3D::ORIGIN).with_rotation(Quaternion::new(0.0, 0.0, 0.0, 0.0));
        assert!(event.validate().is_err());
    }

    #[test]
    fn test_zero_rotation_on_the_wire_is_rejected() {
        let raw = RawAnchorSignal::from_json(
            r#"{"type":"found","position":{"x":0.0,"y":1.0,"z":0.0},"rotation":{"x":0.0,"y":0.0,"z":0.0,"w":0.0}}"#,
        )
        .unwrap();
        assert!(matches!(
            AnchorSignal::try_from(raw),
            Err(LayoutError::MalformedEvent(_))
        ));
    }

    #[test]
    fn test_parse_signals() {
        let found = RawAnchorSignal::from_json(
            r#"{"type":"found","position":{"x":1.0,"y":2.0,"z":3.0},"scale_width":0.5}"#,
        )
        .unwrap();
        let signal = AnchorSignal::try_from(found).unwrap();
        let AnchorSignal::Found(event) = signal else {
            panic!("expected found signal");
        };
        assert_eq!(event.position, Point3D::new(1.0, 2.0, 3.0));
        assert_eq!(event.scale_width, Some(0.5));
        assert_eq!(event.scale_height, None);

        let lost = RawAnchorSignal::from_json(r#"{"type":"lost"}"#).unwrap();
        assert_eq!(AnchorSignal::try_from(lost).unwrap(), AnchorSignal::Lost);
    }

    #[test]
    fn test_unparseable_line() {
        assert!(matches!(
            RawAnchorSignal::from_json("{\"type\":\"teleported\"}"),
            Err(LayoutError::MalformedEvent(_))
        ));
    }
}
