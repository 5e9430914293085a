//! Circle-vs-world collision queries and slide resolution
//!
//! Agents are circles on the ground plane. The world is a centred square
//! boundary plus obstacle bounding circles. Every query is recomputed from
//! scratch; nothing is cached between calls.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::PhysicsConfig;
use crate::core::math::random_unit;
use crate::core::types::ObstacleId;
use crate::physics::obstacle::Obstacle;
use crate::physics::terrain::Terrain;

/// Below this centre distance an obstacle normal is replaced with a random direction
const COINCIDENT_EPSILON: f64 = 0.01;
/// Moves shorter than this are not worth sliding
const MIN_MOVE: f64 = 0.001;

/// Outcome of an advanced collision query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionResult {
    pub collided: bool,
    /// Unit surface normal pointing away from what was hit (zero when clear)
    pub normal: DVec2,
    pub is_wall: bool,
    pub obstacle: Option<ObstacleId>,
}

impl CollisionResult {
    pub const CLEAR: Self = Self {
        collided: false,
        normal: DVec2::ZERO,
        is_wall: false,
        obstacle: None,
    };
}

/// Where a requested move actually ended up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub position: DVec2,
    pub collided: bool,
}

/// Collision world: map boundary, obstacles and terrain
#[derive(Debug, Clone)]
pub struct Physics {
    obstacles: Vec<Obstacle>,
    map_half: f64,
    terrain: Terrain,
}

impl Physics {
    pub fn new(config: &PhysicsConfig, obstacles: Vec<Obstacle>) -> Self {
        Self {
            obstacles,
            map_half: config.map_half,
            terrain: Terrain::new(config),
        }
    }

    pub fn set_obstacles(&mut self, obstacles: Vec<Obstacle>) {
        self.obstacles = obstacles;
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn map_half(&self) -> f64 {
        self.map_half
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn terrain_height(&self, pos: DVec2) -> f64 {
        self.terrain.height_at(pos)
    }

    pub fn is_on_hill(&self, pos: DVec2, margin: f64) -> bool {
        self.terrain.is_on_hill(pos, margin)
    }

    #[inline]
    fn outside_bounds(&self, pos: DVec2, radius: f64) -> bool {
        pos.x.abs() + radius > self.map_half || pos.y.abs() + radius > self.map_half
    }

    /// First obstacle whose bounding circle overlaps the query circle
    fn overlapping_obstacle(
        &self,
        pos: DVec2,
        radius: f64,
        exclude: Option<ObstacleId>,
    ) -> Option<(&Obstacle, DVec2, f64)> {
        self.obstacles
            .iter()
            .filter(|o| Some(o.id) != exclude)
            .find_map(|o| {
                let delta = pos - o.center();
                let dist = delta.length();
                (dist < radius + o.radius()).then_some((o, delta, dist))
            })
    }

    /// True if the circle leaves the map or touches any obstacle
    pub fn check_collision(&self, pos: DVec2, radius: f64, exclude: Option<ObstacleId>) -> bool {
        self.outside_bounds(pos, radius) || self.overlapping_obstacle(pos, radius, exclude).is_some()
    }

    /// Collision test that also reports a unit surface normal
    pub fn check_collision_advanced<R: Rng + ?Sized>(
        &self,
        pos: DVec2,
        radius: f64,
        exclude: Option<ObstacleId>,
        rng: &mut R,
    ) -> CollisionResult {
        if self.outside_bounds(pos, radius) {
            let mut normal = DVec2::ZERO;
            if pos.x + radius > self.map_half {
                normal.x = -1.0;
            } else if pos.x - radius < -self.map_half {
                normal.x = 1.0;
            }
            if pos.y + radius > self.map_half {
                normal.y = -1.0;
            } else if pos.y - radius < -self.map_half {
                normal.y = 1.0;
            }
            return CollisionResult {
                collided: true,
                normal: normal.normalize_or_zero(),
                is_wall: true,
                obstacle: None,
            };
        }

        match self.overlapping_obstacle(pos, radius, exclude) {
            Some((obstacle, delta, dist)) => {
                let normal = if dist > COINCIDENT_EPSILON {
                    delta / dist
                } else {
                    random_unit(rng)
                };
                CollisionResult {
                    collided: true,
                    normal,
                    is_wall: false,
                    obstacle: Some(obstacle.id),
                }
            }
            None => CollisionResult::CLEAR,
        }
    }

    /// Resolve a move from `old` to `new`.
    ///
    /// Tries the direct move, then the move projected onto the contact
    /// surface, then X-only, then Z-only, and finally stays put. When `old` is
    /// clear the returned position is always clear.
    pub fn resolve_collision<R: Rng + ?Sized>(
        &self,
        old: DVec2,
        new: DVec2,
        radius: f64,
        exclude: Option<ObstacleId>,
        rng: &mut R,
    ) -> Resolution {
        let collision = self.check_collision_advanced(new, radius, exclude, rng);
        if !collision.collided {
            return Resolution {
                position: new,
                collided: false,
            };
        }

        let stay = Resolution {
            position: old,
            collided: true,
        };

        let movement = new - old;
        if movement.length() < MIN_MOVE {
            return stay;
        }

        let slide = movement - movement.dot(collision.normal) * collision.normal;
        let slide_pos = old + slide;
        if !self.check_collision(slide_pos, radius, exclude) {
            return Resolution {
                position: slide_pos,
                collided: true,
            };
        }

        let x_only = DVec2::new(new.x, old.y);
        if !self.check_collision(x_only, radius, exclude) {
            return Resolution {
                position: x_only,
                collided: true,
            };
        }

        let z_only = DVec2::new(old.x, new.y);
        if !self.check_collision(z_only, radius, exclude) {
            return Resolution {
                position: z_only,
                collided: true,
            };
        }

        stay
    }
}
