//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for a zombie within one horde
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZombieId(pub u32);

impl ZombieId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for a static obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

impl ObstacleId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Simulation tick counter
pub type Tick = u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zombie_id_equality() {
        assert_eq!(ZombieId::new(3), ZombieId(3));
        assert_ne!(ZombieId(3), ZombieId(4));
    }

    #[test]
    fn test_zombie_id_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<ZombieId, &str> = HashMap::new();
        map.insert(ZombieId(7), "brute");
        assert_eq!(map.get(&ZombieId(7)), Some(&"brute"));
    }

    #[test]
    fn test_obstacle_id_equality() {
        assert_eq!(ObstacleId::new(1), ObstacleId(1));
        assert_ne!(ObstacleId(1), ObstacleId(2));
    }
}
