//! Terrain height: flat ground with a single cosine-dome hill

use glam::DVec2;
use std::f64::consts::FRAC_PI_2;

use crate::core::config::PhysicsConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Terrain {
    pub center: DVec2,
    pub radius: f64,
    pub height: f64,
    pub ground_level: f64,
}

impl Terrain {
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            center: DVec2::new(config.hill_center_x, config.hill_center_z),
            radius: config.hill_radius,
            height: config.hill_height,
            ground_level: config.ground_level,
        }
    }

    /// Ground height at a ground-plane position.
    ///
    /// `ground + h * cos(pi/2 * d/r)` inside the hill, `ground` outside. The
    /// dome meets the flat ground with zero slope at `d == r`.
    pub fn height_at(&self, pos: DVec2) -> f64 {
        let dist = pos.distance(self.center);
        if dist >= self.radius {
            return self.ground_level;
        }
        let ratio = dist / self.radius;
        self.ground_level + self.height * (ratio * FRAC_PI_2).cos()
    }

    pub fn is_on_hill(&self, pos: DVec2, margin: f64) -> bool {
        pos.distance(self.center) < self.radius + margin
    }
}

impl Default for Terrain {
    fn default() -> Self {
        Self::new(&PhysicsConfig::default())
    }
}
