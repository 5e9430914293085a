pub mod config;
pub mod error;
pub mod math;
pub mod types;

pub use config::{FlankSlotPolicy, HordeConfig};
pub use types::{ObstacleId, Tick, ZombieId};
