//! Horde configuration with documented defaults
//!
//! Every tunable the swarm reads at runtime lives here. Values load from TOML
//! (see `data/horde.toml`); any section or field left out falls back to the
//! defaults below, which match the shipped game.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, SwarmError};

/// World geometry: map boundary, the central hill and gravity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Half-width of the square play area, centred on the origin
    pub map_half: f64,
    /// Radius of the cosine-dome hill footprint
    pub hill_radius: f64,
    /// Height of the hill apex above ground level
    pub hill_height: f64,
    pub hill_center_x: f64,
    pub hill_center_z: f64,
    /// Flat ground height outside the hill
    pub ground_level: f64,
    /// Downward acceleration for ragdoll parts (units/s^2)
    pub gravity: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            map_half: 70.0,
            hill_radius: 18.0,
            hill_height: 5.0,
            hill_center_x: 0.0,
            hill_center_z: 0.0,
            ground_level: -5.0,
            gravity: 35.0,
        }
    }
}

/// How flank slots behave across `HiveMind::update` calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlankSlotPolicy {
    /// Slots keep identity and occupancy; only their positions follow the player.
    #[default]
    Persistent,
    /// Slots are rebuilt empty every tick and flankers re-claim every tick.
    ReclaimEachTick,
}

/// Shared blackboard tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HiveConfig {
    /// Number of flank slots evenly spaced around the player
    pub flank_slot_count: usize,
    /// Distance of each slot from the player
    pub flank_radius: f64,
    /// Lerp factor applied to raw player velocity each tick
    pub velocity_smoothing: f64,
    /// Threat gained per second while the player fires
    pub threat_ramp_rate: f64,
    /// Threat lost per second while the player holds fire
    pub threat_decay_rate: f64,
    pub slot_policy: FlankSlotPolicy,
}

impl Default for HiveConfig {
    fn default() -> Self {
        Self {
            flank_slot_count: 8,
            flank_radius: 8.0,
            velocity_smoothing: 0.3,
            threat_ramp_rate: 5.0,
            threat_decay_rate: 2.0,
            slot_policy: FlankSlotPolicy::Persistent,
        }
    }
}

/// Blend weights for the per-tick movement decision
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Collision radius of a zombie body
    pub zombie_radius: f64,
    /// Weight of the normalized obstacle-avoidance vector
    pub avoidance_weight: f64,
    /// Weight of the stuck-escape vector while the zombie is recovering
    pub escape_weight: f64,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            zombie_radius: 0.6,
            avoidance_weight: 1.0,
            escape_weight: 1.5,
        }
    }
}

/// Melee and corpse lifetime tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Seconds between melee swings once in range
    pub attack_cooldown: f64,
    /// Minimum seconds a corpse stays in the simulation
    pub death_linger: f64,
    /// Hard cap on ragdoll simulation, even if parts never settle
    pub ragdoll_max_lifetime: f64,
    /// Base points for a body kill, before any multiplier
    pub body_kill_score: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            attack_cooldown: 1.0,
            death_linger: 4.0,
            ragdoll_max_lifetime: 10.0,
            body_kill_score: 100,
        }
    }
}

/// Wave pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub initial_zombies: u32,
    pub zombies_per_wave_increment: u32,
    /// Seconds of calm between one wave ending and the next starting
    pub countdown_seconds: f64,
    /// Seconds between consecutive spawns within a wave
    pub spawn_interval: f64,
    /// Distance from the map boundary at which zombies appear
    pub spawn_edge_inset: f64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            initial_zombies: 10,
            zombies_per_wave_increment: 5,
            countdown_seconds: 3.0,
            spawn_interval: 0.35,
            spawn_edge_inset: 3.0,
        }
    }
}

/// Tick scheduling and performance tiers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Largest delta time accepted by a single tick (frame-hitch clamp)
    pub max_dt: f64,
    /// Live zombie count at which separation switches to rayon
    pub parallel_threshold: usize,
    /// Nearest N live zombies get the full update; the rest take the minimal path
    pub max_active_zombies: usize,
    /// Spatial hash cell size; must cover the separation radius
    pub grid_cell_size: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_dt: 0.1,
            parallel_threshold: 256,
            max_active_zombies: 48,
            grid_cell_size: 3.0,
        }
    }
}

/// Complete horde configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HordeConfig {
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub hive: HiveConfig,
    #[serde(default)]
    pub steering: SteeringConfig,
    #[serde(default)]
    pub combat: CombatConfig,
    #[serde(default)]
    pub waves: WaveConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl HordeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: HordeConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let p = &self.physics;
        if p.map_half <= 0.0 {
            return Err(SwarmError::InvalidConfig(format!(
                "map_half ({}) must be positive",
                p.map_half
            )));
        }
        if p.hill_radius <= 0.0 {
            return Err(SwarmError::InvalidConfig(format!(
                "hill_radius ({}) must be positive",
                p.hill_radius
            )));
        }

        if self.hive.flank_slot_count == 0 {
            return Err(SwarmError::InvalidConfig(
                "flank_slot_count must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.hive.velocity_smoothing) {
            return Err(SwarmError::InvalidConfig(format!(
                "velocity_smoothing ({}) must lie in [0, 1]",
                self.hive.velocity_smoothing
            )));
        }

        // The 3x3 neighbourhood query only sees peers within one cell
        let separation_radius = crate::zombie::constants::SEPARATION_RADIUS;
        if self.simulation.grid_cell_size < separation_radius {
            return Err(SwarmError::InvalidConfig(format!(
                "grid_cell_size ({}) should be >= separation radius ({})",
                self.simulation.grid_cell_size, separation_radius
            )));
        }
        if self.simulation.max_dt <= 0.0 {
            return Err(SwarmError::InvalidConfig("max_dt must be positive".into()));
        }

        if self.steering.zombie_radius <= 0.0 || self.steering.zombie_radius * 2.0 >= p.map_half {
            return Err(SwarmError::InvalidConfig(format!(
                "zombie_radius ({}) does not fit the map",
                self.steering.zombie_radius
            )));
        }

        if self.waves.spawn_edge_inset >= p.map_half {
            return Err(SwarmError::InvalidConfig(format!(
                "spawn_edge_inset ({}) must be smaller than map_half ({})",
                self.waves.spawn_edge_inset, p.map_half
            )));
        }
        if self.waves.spawn_edge_inset <= self.steering.zombie_radius {
            return Err(SwarmError::InvalidConfig(format!(
                "spawn_edge_inset ({}) must exceed zombie_radius ({})",
                self.waves.spawn_edge_inset, self.steering.zombie_radius
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(HordeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_spawn_inset_must_leave_an_edge() {
        let mut config = HordeConfig::default();
        config.waves.spawn_edge_inset = config.physics.map_half;
        assert!(matches!(config.validate(), Err(SwarmError::InvalidConfig(_))));

        let err = HordeConfig::from_toml_str(
            r#"
            [physics]
            map_half = 10.0
            [waves]
            spawn_edge_inset = 12.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SwarmError::InvalidConfig(_)));
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = HordeConfig::from_toml_str(
            r#"
            [hive]
            flank_radius = 12.0
            slot_policy = "reclaim_each_tick"
            "#,
        )
        .expect("partial config should parse");
        assert_eq!(config.hive.flank_radius, 12.0);
        assert_eq!(config.hive.slot_policy, FlankSlotPolicy::ReclaimEachTick);
        assert_eq!(config.hive.flank_slot_count, 8);
        assert_eq!(config.physics.map_half, 70.0);
    }

    #[test]
    fn test_small_grid_cell_rejected() {
        let mut config = HordeConfig::default();
        config.simulation.grid_cell_size = 1.0;
        assert!(matches!(config.validate(), Err(SwarmError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_slots_rejected() {
        let mut config = HordeConfig::default();
        config.hive.flank_slot_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let err = HordeConfig::from_toml_str("[physics\nmap_half = ").unwrap_err();
        assert!(matches!(err, SwarmError::TomlError(_)));
    }

    #[test]
    fn test_load_shipped_config() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/horde.toml");
        let config = HordeConfig::load(path).expect("shipped config should load");
        assert_eq!(config.waves.initial_zombies, 10);
        assert_eq!(config.simulation.max_dt, 0.1);
    }
}
