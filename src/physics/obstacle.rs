//! Static obstacle bodies
//!
//! Obstacles keep only their ground-plane bounding box. Collision treats each
//! one as a circle at the box centre whose radius is half the larger extent.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::types::ObstacleId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub min: DVec2,
    pub max: DVec2,
}

impl Obstacle {
    pub fn from_bounds(id: ObstacleId, min: DVec2, max: DVec2) -> Self {
        Self {
            id,
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Axis-aligned bounds of a `width` x `depth` box rotated by `yaw` radians
    pub fn rotated_box(id: ObstacleId, center: DVec2, width: f64, depth: f64, yaw: f64) -> Self {
        let (sin, cos) = yaw.sin_cos();
        let half = DVec2::new(
            (width * 0.5 * cos).abs() + (depth * 0.5 * sin).abs(),
            (width * 0.5 * sin).abs() + (depth * 0.5 * cos).abs(),
        );
        Self::from_bounds(id, center - half, center + half)
    }

    pub fn cylinder(id: ObstacleId, center: DVec2, radius: f64) -> Self {
        let half = DVec2::splat(radius.abs());
        Self::from_bounds(id, center - half, center + half)
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    /// Bounding-circle radius used for every collision query
    #[inline]
    pub fn radius(&self) -> f64 {
        let size = self.size();
        size.x.max(size.y) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_uses_larger_extent() {
        let barrier = Obstacle::from_bounds(
            ObstacleId(0),
            DVec2::new(-3.0, -0.5),
            DVec2::new(3.0, 0.5),
        );
        assert_eq!(barrier.radius(), 3.0);
        assert_eq!(barrier.center(), DVec2::ZERO);
    }

    #[test]
    fn test_from_bounds_orders_corners() {
        let o = Obstacle::from_bounds(ObstacleId(1), DVec2::new(2.0, 2.0), DVec2::new(0.0, 0.0));
        assert_eq!(o.min, DVec2::ZERO);
        assert_eq!(o.max, DVec2::splat(2.0));
    }

    #[test]
    fn test_rotated_box_quarter_turn_swaps_extents() {
        let o = Obstacle::rotated_box(
            ObstacleId(2),
            DVec2::new(10.0, 5.0),
            6.0,
            1.0,
            std::f64::consts::FRAC_PI_2,
        );
        let size = o.size();
        assert!((size.x - 1.0).abs() < 1e-9);
        assert!((size.y - 6.0).abs() < 1e-9);
        assert!((o.center() - DVec2::new(10.0, 5.0)).length() < 1e-9);
    }

    #[test]
    fn test_rotated_box_diagonal_grows() {
        let o = Obstacle::rotated_box(ObstacleId(3), DVec2::ZERO, 3.0, 3.0, std::f64::consts::FRAC_PI_4);
        assert!(o.radius() > 1.5);
    }
}
