//! Undead Swarm - zombie horde AI, steering and collision core

pub mod core;
pub mod hive;
pub mod physics;
pub mod simulation;
pub mod spatial;
pub mod zombie;
