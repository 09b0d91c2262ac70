//! Point distributions on the unit sphere and unit circle

use std::f32::consts::PI;

use super::{Distribution, RelativeOffset};
use crate::spatial::Vector3D;

/// Point `index` of a `count`-point Fibonacci sphere of radius 1.
///
/// Heights are spaced evenly over `[-1, 1]` and consecutive points are
/// rotated by the golden angle, which spreads them near-uniformly.
pub fn fibonacci_sphere_point(count: usize, index: usize) -> Vector3D {
    if count == 0 {
        return Vector3D::ZERO;
    }

    let offset = 2.0 / count as f32;
    let increment = PI * (3.0 - 5.0_f32.sqrt());

    let y = (index as f32 * offset - 1.0) + offset / 2.0;
    let radius_at_y = (1.0 - y * y).max(0.0).sqrt();

    let phi = ((index + 1) % count) as f32 * increment;

    Vector3D::new(phi.cos() * radius_at_y, y, phi.sin() * radius_at_y)
}

/// Point `index` of `count` points evenly spaced on the unit circle in the XY plane
pub fn circle_point(count: usize, index: usize) -> Vector3D {
    if count == 0 {
        return Vector3D::ZERO;
    }

    let angle = (index as f32 / count as f32) * PI * 2.0;
    Vector3D::new(angle.cos(), angle.sin(), 0.0)
}

/// Generate `count` offsets of length `radius` around the origin
pub fn generate(count: usize, radius: f32, distribution: Distribution) -> Vec<RelativeOffset> {
    (0..count)
        .map(|index| {
            let unit = match distribution {
                Distribution::Spherical => fibonacci_sphere_point(count, index),
                Distribution::Circular => circle_point(count, index),
            };
            RelativeOffset::from(unit * radius)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_count_and_radius() {
        for count in [1usize, 2, 3, 10, 57, 200] {
            let offsets = generate(count, 5.0, Distribution::Spherical);
            assert_eq!(offsets.len(), count);
            for offset in &offsets {
                assert!((offset.vector().magnitude() - 5.0).abs() < 0.001);
            }
        }
    }

    #[test]
    fn test_first_point_of_ten() {
        // y = -0.9, radius_at_y = sqrt(0.19), phi = golden angle
        let offsets = generate(10, 5.0, Distribution::Spherical);
        let p = offsets[0].vector();
        assert!((p.x - -1.607_058).abs() < 0.0005);
        assert!((p.y - -4.5).abs() < 0.0001);
        assert!((p.z - 1.472_197).abs() < 0.0005);
    }

    #[test]
    fn test_second_and_third_points_of_ten() {
        let offsets = generate(10, 5.0, Distribution::Spherical);
        let p1 = offsets[1].vector();
        assert!((p1.x - 0.312_172).abs() < 0.0005);
        assert!((p1.y - -3.5).abs() < 0.0001);
        assert!((p1.z - -3.557_042).abs() < 0.0005);

        let p2 = offsets[2].vector();
        assert!((p2.x - 2.634_618).abs() < 0.0005);
        assert!((p2.y - -2.5).abs() < 0.0001);
        assert!((p2.z - 3.436_392).abs() < 0.0005);
    }

    #[test]
    fn test_heights_are_evenly_spaced() {
        let offsets = generate(4, 1.0, Distribution::Spherical);
        let heights: Vec<f32> = offsets.iter().map(|o| o.vector().y).collect();
        let expected = [-0.75, -0.25, 0.25, 0.75];
        for (h, e) in heights.iter().zip(expected.iter()) {
            assert!((h - e).abs() < 0.0001);
        }
    }

    #[test]
    fn test_single_point_sits_on_equator() {
        let p = fibonacci_sphere_point(1, 0);
        assert!((p.x - 1.0).abs() < 0.0001);
        assert!(p.y.abs() < 0.0001);
        assert!(p.z.abs() < 0.0001);
    }

    #[test]
    fn test_deterministic() {
        let a = generate(33, 2.5, Distribution::Spherical);
        let b = generate(33, 2.5, Distribution::Spherical);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_count_is_empty() {
        assert!(generate(0, 5.0, Distribution::Spherical).is_empty());
        assert!(generate(0, 5.0, Distribution::Circular).is_empty());
    }

    #[test]
    fn test_zero_radius_collapses_to_center() {
        let offsets = generate(8, 0.0, Distribution::Spherical);
        assert_eq!(offsets.len(), 8);
        assert!(offsets.iter().all(|o| o.vector().magnitude() == 0.0));
    }

    #[test]
    fn test_circle_quarter_points() {
        let offsets = generate(4, 2.0, Distribution::Circular);
        let expected = [(2.0, 0.0), (0.0, 2.0), (-2.0, 0.0), (0.0, -2.0)];
        for (offset, (ex, ey)) in offsets.iter().zip(expected.iter()) {
            let v = offset.vector();
            assert!((v.x - ex).abs() < 0.0001);
            assert!((v.y - ey).abs() < 0.0001);
            assert_eq!(v.z, 0.0);
        }
    }
}
