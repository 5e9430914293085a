//! Shared tactical blackboard for the swarm
//!
//! Updated once per tick before any zombie steers. Zombies read the player
//! snapshot and threat state, and mutate only flank-slot ownership through
//! `claim_flank_slot` / `release_flank_slot`.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::core::config::{FlankSlotPolicy, HiveConfig};
use crate::core::math::lerp;
use crate::core::types::ZombieId;

/// Player inputs sampled once per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Ground-plane position (x, z)
    pub position: DVec2,
    /// Ground-plane projection of the aim direction
    pub aim: DVec2,
    pub firing: bool,
}

impl PlayerState {
    pub fn new(position: DVec2, aim: DVec2, firing: bool) -> Self {
        Self {
            position,
            aim,
            firing,
        }
    }

    pub fn idle_at(position: DVec2) -> Self {
        Self::new(position, DVec2::new(0.0, -1.0), false)
    }
}

/// One encirclement destination around the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlankSlot {
    pub position: DVec2,
    pub angle: f64,
    pub occupied_by: Option<ZombieId>,
}

impl FlankSlot {
    #[inline]
    pub fn occupied(&self) -> bool {
        self.occupied_by.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct HiveMind {
    pub player_pos: DVec2,
    pub player_velocity: DVec2,
    pub threat_direction: DVec2,
    /// 0.0 (calm) to 1.0 (sustained fire)
    pub threat_intensity: f64,
    pub flank_radius: f64,
    pub frame_counter: u64,
    flank_slots: Vec<FlankSlot>,
    config: HiveConfig,
}

impl HiveMind {
    pub fn new(config: &HiveConfig) -> Self {
        let mut hive = Self {
            player_pos: DVec2::ZERO,
            player_velocity: DVec2::ZERO,
            threat_direction: DVec2::ZERO,
            threat_intensity: 0.0,
            flank_radius: config.flank_radius,
            frame_counter: 0,
            flank_slots: Vec::with_capacity(config.flank_slot_count),
            config: config.clone(),
        };
        hive.layout_slots(true);
        hive
    }

    pub fn policy(&self) -> FlankSlotPolicy {
        self.config.slot_policy
    }

    pub fn flank_slots(&self) -> &[FlankSlot] {
        &self.flank_slots
    }

    pub fn slot(&self, index: usize) -> Option<&FlankSlot> {
        self.flank_slots.get(index)
    }

    pub fn slot_owner(&self, index: usize) -> Option<ZombieId> {
        self.flank_slots.get(index).and_then(|s| s.occupied_by)
    }

    /// Slot currently held by `zombie`, if any
    pub fn slot_of(&self, zombie: ZombieId) -> Option<usize> {
        self.flank_slots
            .iter()
            .position(|s| s.occupied_by == Some(zombie))
    }

    /// Refresh the blackboard from this tick's player inputs
    pub fn update(&mut self, dt: f64, player: &PlayerState) {
        self.frame_counter += 1;

        let previous = self.player_pos;
        self.player_pos = player.position;

        if dt > 0.0 {
            let raw = (self.player_pos - previous) / dt;
            let t = self.config.velocity_smoothing;
            self.player_velocity = DVec2::new(
                lerp(self.player_velocity.x, raw.x, t),
                lerp(self.player_velocity.y, raw.y, t),
            );
        }

        self.threat_direction = player.aim;

        self.threat_intensity = if player.firing {
            (self.threat_intensity + dt * self.config.threat_ramp_rate).min(1.0)
        } else {
            (self.threat_intensity - dt * self.config.threat_decay_rate).max(0.0)
        };

        let rebuild = self.config.slot_policy == FlankSlotPolicy::ReclaimEachTick;
        self.layout_slots(rebuild);
    }

    /// Place slots evenly around the player; `rebuild` also drops all occupancy
    fn layout_slots(&mut self, rebuild: bool) {
        let count = self.config.flank_slot_count;
        let step = TAU / count as f64;

        if rebuild || self.flank_slots.len() != count {
            self.flank_slots.clear();
            self.flank_slots.extend((0..count).map(|i| FlankSlot {
                position: DVec2::ZERO,
                angle: i as f64 * step,
                occupied_by: None,
            }));
        }

        for slot in &mut self.flank_slots {
            slot.position = self.player_pos + DVec2::from_angle(slot.angle) * self.flank_radius;
        }
    }

    /// Claim the nearest slot that is free or already held by `zombie`.
    ///
    /// Any other slot held by `zombie` is released first, so a zombie never
    /// holds two slots.
    pub fn claim_flank_slot(&mut self, zombie: ZombieId, position: DVec2) -> Option<usize> {
        let best = self
            .flank_slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.occupied_by.is_none() || slot.occupied_by == Some(zombie))
            .map(|(i, slot)| (i, slot.position.distance_squared(position)))
            .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
                Some((_, best_d)) if best_d <= d => best,
                _ => Some((i, d)),
            })
            .map(|(i, _)| i)?;

        self.release_flank_slot(zombie);
        self.flank_slots[best].occupied_by = Some(zombie);
        tracing::trace!(?zombie, slot = best, "flank slot claimed");
        Some(best)
    }

    /// Release whatever slot `zombie` holds. Safe to call when it holds none.
    pub fn release_flank_slot(&mut self, zombie: ZombieId) {
        for slot in &mut self.flank_slots {
            if slot.occupied_by == Some(zombie) {
                slot.occupied_by = None;
            }
        }
    }
}

impl Default for HiveMind {
    fn default() -> Self {
        Self::new(&HiveConfig::default())
    }
}
