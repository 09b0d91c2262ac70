//! Layout generation for marker slots around an anchor
//!
//! Produces deterministic, evenly distributed offsets relative to the anchor
//! center. The same parameters always reproduce the same layout, so a layout
//! is computed once at first detection and reused for every re-detection.

mod distribution;
mod offset;

pub use distribution::{circle_point, fibonacci_sphere_point, generate};
pub use offset::RelativeOffset;

use serde::{Deserialize, Serialize};

/// Region the marker slots are spread over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distribution {
    /// Points on the surface of a sphere (Fibonacci sphere)
    #[default]
    Spherical,
    /// Points on a circle in the XY plane
    Circular,
}

/// Which half of the sphere spherical layouts are folded onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hemisphere {
    /// Whole sphere
    #[default]
    Full,
    /// Every z component forced to `-|z|`
    Negative,
    /// Every z component forced to `|z|`
    Positive,
}

impl Hemisphere {
    fn fold(&self, z: f32) -> f32 {
        match self {
            Hemisphere::Full => z,
            Hemisphere::Negative => -z.abs(),
            Hemisphere::Positive => z.abs(),
        }
    }
}

/// Parameters of a marker layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSpec {
    /// Number of marker slots
    pub count: usize,
    /// Distance of each marker from the distribution center
    pub radius: f32,
    /// Sphere or circle
    pub distribution: Distribution,
    /// Hemisphere folding (spherical layouts only)
    pub hemisphere: Hemisphere,
    /// Translation along Z applied to every offset; the plane depth for
    /// circular layouts
    pub axial_offset: f32,
    /// Rotate offsets by the anchor rotation when the tracker reports one
    pub follow_anchor_rotation: bool,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            count: 10,
            radius: 5.0,
            distribution: Distribution::Spherical,
            hemisphere: Hemisphere::Full,
            axial_offset: 0.0,
            follow_anchor_rotation: false,
        }
    }
}

impl LayoutSpec {
    /// Generate every slot offset with the hemisphere and axial policies applied
    pub fn generate(&self) -> Vec<RelativeOffset> {
        generate(self.count, self.radius, self.distribution)
            .into_iter()
            .map(|offset| {
                let v = offset.vector();
                match self.distribution {
                    Distribution::Spherical => RelativeOffset::new(
                        v.x,
                        v.y,
                        self.hemisphere.fold(v.z) + self.axial_offset,
                    ),
                    Distribution::Circular => RelativeOffset::new(v.x, v.y, self.axial_offset),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_hemisphere_folds_z() {
        let layout = LayoutSpec {
            count: 24,
            radius: 2.0,
            hemisphere: Hemisphere::Negative,
            ..LayoutSpec::default()
        };
        let offsets = layout.generate();
        assert_eq!(offsets.len(), 24);
        for offset in &offsets {
            assert!(offset.vector().z <= 0.0);
            assert!((offset.vector().magnitude() - 2.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_positive_hemisphere_folds_z() {
        let layout = LayoutSpec {
            hemisphere: Hemisphere::Positive,
            ..LayoutSpec::default()
        };
        assert!(layout.generate().iter().all(|o| o.vector().z >= 0.0));
    }

    #[test]
    fn test_axial_offset_shifts_cluster() {
        let base = LayoutSpec::default();
        let shifted = LayoutSpec {
            axial_offset: -3.0,
            ..LayoutSpec::default()
        };
        for (a, b) in base.generate().iter().zip(shifted.generate().iter()) {
            assert_eq!(a.vector().x, b.vector().x);
            assert_eq!(a.vector().y, b.vector().y);
            assert!((b.vector().z - (a.vector().z - 3.0)).abs() < 0.0001);
        }
    }

    #[test]
    fn test_circular_uses_axial_offset_as_depth() {
        let layout = LayoutSpec {
            count: 6,
            radius: 1.5,
            distribution: Distribution::Circular,
            axial_offset: 0.25,
            ..LayoutSpec::default()
        };
        for offset in layout.generate() {
            let v = offset.vector();
            assert_eq!(v.z, 0.25);
            assert!(((v.x * v.x + v.y * v.y).sqrt() - 1.5).abs() < 0.0001);
        }
    }

    #[test]
    fn test_layout_deserializes_with_defaults() {
        let layout: LayoutSpec = toml::from_str("count = 4\ndistribution = \"circular\"").unwrap();
        assert_eq!(layout.count, 4);
        assert_eq!(layout.distribution, Distribution::Circular);
        assert_eq!(layout.radius, 5.0);
        assert_eq!(layout.hemisphere, Hemisphere::Full);
    }
}
