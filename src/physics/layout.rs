//! Procedural obstacle scattering for an arena
//!
//! Crates, jersey barriers and steel drums are dropped uniformly over the map,
//! re-rolling positions that land on the hill footprint.

use glam::DVec2;
use rand::Rng;
use std::f64::consts::PI;

use crate::core::config::PhysicsConfig;
use crate::core::types::ObstacleId;
use crate::physics::obstacle::Obstacle;
use crate::physics::terrain::Terrain;

const PLACEMENT_ATTEMPTS: u32 = 50;
const HILL_MARGIN: f64 = 3.0;
const EDGE_CLEARANCE: f64 = 10.0;

/// Obstacle archetypes found in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// 3 x 3 wooden crate
    Crate,
    /// 6 x 1 concrete barrier, randomly yawed
    Barrier,
    /// Steel drum, radius 1
    Drum,
}

impl ObstacleKind {
    fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let r: f64 = rng.gen();
        if r > 0.6 {
            ObstacleKind::Crate
        } else if r > 0.3 {
            ObstacleKind::Barrier
        } else {
            ObstacleKind::Drum
        }
    }

    fn build(self, id: ObstacleId, center: DVec2, yaw: f64) -> Obstacle {
        match self {
            ObstacleKind::Crate => Obstacle::rotated_box(id, center, 3.0, 3.0, yaw),
            ObstacleKind::Barrier => Obstacle::rotated_box(id, center, 6.0, 1.0, yaw),
            ObstacleKind::Drum => Obstacle::cylinder(id, center, 1.0),
        }
    }
}

/// Scatter `count` obstacles over the map, keeping them off the hill when possible
pub fn scatter_obstacles<R: Rng + ?Sized>(
    count: usize,
    config: &PhysicsConfig,
    rng: &mut R,
) -> Vec<Obstacle> {
    let terrain = Terrain::new(config);
    let span = config.map_half * 2.0 - EDGE_CLEARANCE;

    (0..count)
        .map(|i| {
            let kind = ObstacleKind::roll(rng);
            let mut pos = DVec2::ZERO;
            for _ in 0..PLACEMENT_ATTEMPTS {
                pos = DVec2::new(
                    (rng.gen::<f64>() - 0.5) * span,
                    (rng.gen::<f64>() - 0.5) * span,
                );
                if !terrain.is_on_hill(pos, HILL_MARGIN) {
                    break;
                }
            }
            let yaw = rng.gen::<f64>() * PI;
            kind.build(ObstacleId(i as u32), pos, yaw)
        })
        .collect()
}
