//! Swarm blackboard: player threat snapshot and flank-slot coordination

pub mod mind;

pub use mind::{FlankSlot, HiveMind, PlayerState};
