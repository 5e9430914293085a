//! Collision and terrain queries for circular agents
//!
//! Obstacles are approximated by bounding circles, the map by a centred
//! square, the ground by a single cosine hill.

pub mod collision;
pub mod layout;
pub mod obstacle;
pub mod terrain;

pub use collision::{CollisionResult, Physics, Resolution};
pub use layout::{scatter_obstacles, ObstacleKind};
pub use obstacle::Obstacle;
pub use terrain::Terrain;
