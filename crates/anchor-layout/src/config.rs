//! Layout configuration
//!
//! Every tunable of the engine lives here: marker count and distribution,
//! marker and connector styling, the auxiliary visual and the loss policy.
//! Configurations are plain TOML; every section falls back to defaults.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{LayoutError, Result};
use crate::layout::{Distribution, Hemisphere, LayoutSpec};
use crate::placement::LossPolicy;
use crate::spatial::Vector3D;

/// Upper bound on marker slots per session
pub const MAX_MARKERS: usize = 1024;

/// Marker sphere styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub radius: f32,
    pub color: Color,
    pub roughness: Option<f32>,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 0.5,
            color: Color::MARKER_PINK,
            roughness: None,
        }
    }
}

/// Connector cylinder styling (also used by the ground line)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorStyle {
    /// Spawn a connector from the anchor to every marker
    pub enabled: bool,
    pub radius: f32,
    pub color: Color,
    /// Principal axis of the unit connector primitive
    pub reference_axis: Vector3D,
}

impl Default for ConnectorStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 0.005,
            color: Color::CONNECTOR_GREY,
            reference_axis: Vector3D::UP,
        }
    }
}

fn default_panel_extent() -> f32 {
    1.0
}

fn default_panel_color() -> Color {
    Color::WHITE
}

/// Optional extra visual anchored to the detected position
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuxiliaryVisual {
    #[default]
    None,
    /// Vertical connector from the floor up to the anchor center
    GroundLine {
        #[serde(default)]
        floor_height: f32,
    },
    /// Panel copying the anchor pose; the tracker scale hints override its extent
    Backdrop {
        #[serde(default = "default_panel_extent")]
        width: f32,
        #[serde(default = "default_panel_extent")]
        height: f32,
        #[serde(default = "default_panel_color")]
        color: Color,
        #[serde(default)]
        texture: Option<String>,
        #[serde(default)]
        roughness: Option<f32>,
    },
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub loss_policy: LossPolicy,
    pub layout: LayoutSpec,
    pub marker: MarkerStyle,
    pub connector: ConnectorStyle,
    pub auxiliary: AuxiliaryVisual,
}

impl LayoutConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: LayoutConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Built-in parameter set
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Orbit => Self {
                auxiliary: AuxiliaryVisual::GroundLine { floor_height: 0.0 },
                ..Self::default()
            },
            Preset::Hemisphere => Self {
                layout: LayoutSpec {
                    radius: 2.0,
                    hemisphere: Hemisphere::Negative,
                    ..LayoutSpec::default()
                },
                auxiliary: AuxiliaryVisual::Backdrop {
                    width: 1.0,
                    height: 1.0,
                    color: Color::WHITE,
                    texture: None,
                    roughness: None,
                },
                ..Self::default()
            },
            Preset::Panel => Self {
                layout: LayoutSpec {
                    count: 0,
                    ..LayoutSpec::default()
                },
                connector: ConnectorStyle {
                    enabled: false,
                    ..ConnectorStyle::default()
                },
                auxiliary: AuxiliaryVisual::Backdrop {
                    width: 1.0,
                    height: 1.0,
                    color: Color::WHITE,
                    texture: None,
                    roughness: None,
                },
                ..Self::default()
            },
        }
    }

    /// Check every parameter before any entity is created
    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if layout.count > MAX_MARKERS {
            return Err(invalid(format!(
                "layout.count {} exceeds the maximum of {}",
                layout.count, MAX_MARKERS
            )));
        }
        if !layout.radius.is_finite() || layout.radius < 0.0 {
            return Err(invalid(format!(
                "layout.radius must be finite and non-negative, got {}",
                layout.radius
            )));
        }
        if !layout.axial_offset.is_finite() {
            return Err(invalid("layout.axial_offset must be finite"));
        }
        if layout.distribution == Distribution::Circular && layout.hemisphere != Hemisphere::Full {
            tracing::debug!("hemisphere policy has no effect on circular layouts");
        }

        positive("marker.radius", self.marker.radius)?;
        roughness("marker.roughness", self.marker.roughness)?;

        let ground_line = matches!(self.auxiliary, AuxiliaryVisual::GroundLine { .. });
        if self.connector.enabled || ground_line {
            positive("connector.radius", self.connector.radius)?;
            let axis = self.connector.reference_axis;
            if !axis.is_finite() || axis.magnitude_squared() == 0.0 {
                return Err(invalid("connector.reference_axis must be a finite non-zero vector"));
            }
        }

        match &self.auxiliary {
            AuxiliaryVisual::None => {}
            AuxiliaryVisual::GroundLine { floor_height } => {
                if !floor_height.is_finite() {
                    return Err(invalid("auxiliary.floor_height must be finite"));
                }
            }
            AuxiliaryVisual::Backdrop {
                width,
                height,
                roughness: r,
                ..
            } => {
                positive("auxiliary.width", *width)?;
                positive("auxiliary.height", *height)?;
                roughness("auxiliary.roughness", *r)?;
            }
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> LayoutError {
    LayoutError::InvalidConfig(message.into())
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite and positive, got {value}")))
    }
}

fn roughness(name: &str, value: Option<f32>) -> Result<()> {
    match value {
        Some(r) if !(0.0..=1.0).contains(&r) => {
            Err(invalid(format!("{name} must lie in [0, 1], got {r}")))
        }
        _ => Ok(()),
    }
}

/// Built-in layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Ten markers on a radius-5 sphere with a ground line
    Orbit,
    /// Ten markers on the back half of a radius-2 sphere in front of a backdrop
    Hemisphere,
    /// Backdrop panel only
    Panel,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Orbit, Preset::Hemisphere, Preset::Panel];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Orbit => "orbit",
            Preset::Hemisphere => "hemisphere",
            Preset::Panel => "panel",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown preset '{s}' (expected orbit, hemisphere or panel)"))
    }
}
