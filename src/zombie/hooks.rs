//! Side-effect collaborators a zombie talks to
//!
//! Effects, audio, scoring and player damage live outside this crate. A
//! zombie only ever reaches them through `ZombieHooks`.

use glam::DVec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundEffect {
    ZombieHit,
    ZombieDeath,
    Headshot,
    ZombieAttack,
}

/// Everything a zombie may ask of the surrounding game
pub trait ZombieHooks {
    fn play_sound(&mut self, sound: SoundEffect);

    fn spawn_blood_spray(&mut self, position: DVec3, direction: DVec3, intensity: u32);

    fn spawn_gore_chunks(&mut self, position: DVec3, direction: DVec3);

    fn spawn_blood_pool(&mut self, position: DVec3);

    fn add_kill_score(&mut self, points: u32);

    /// Whether the zombie dying right now is the last of its wave
    fn is_last_zombie_of_wave(&self) -> bool;

    fn trigger_slowmo(&mut self);

    fn damage_player(&mut self, amount: u32);
}

/// A side effect requested through `ZombieHooks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HordeEvent {
    Sound { sound: SoundEffect },
    BloodSpray { position: DVec3, direction: DVec3, intensity: u32 },
    GoreChunks { position: DVec3, direction: DVec3 },
    BloodPool { position: DVec3 },
    KillScore { points: u32 },
    SlowMotion,
    PlayerDamaged { amount: u32 },
}

/// Recording hooks implementation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<HordeEvent>,
    /// Answer returned from `is_last_zombie_of_wave`
    pub last_of_wave: bool,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn count_sound(&self, sound: SoundEffect) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, HordeEvent::Sound { sound: s } if *s == sound))
            .count()
    }

    pub fn kill_score_awards(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HordeEvent::KillScore { points } => Some(*points),
                _ => None,
            })
            .collect()
    }

    pub fn player_damage(&self) -> u32 {
        self.events
            .iter()
            .map(|e| match e {
                HordeEvent::PlayerDamaged { amount } => *amount,
                _ => 0,
            })
            .sum()
    }

    pub fn blood_sprays(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, HordeEvent::BloodSpray { .. }))
            .count()
    }

    pub fn blood_pools(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, HordeEvent::BloodPool { .. }))
            .count()
    }

    pub fn slowmo_triggers(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, HordeEvent::SlowMotion))
            .count()
    }
}

impl ZombieHooks for EventLog {
    fn play_sound(&mut self, sound: SoundEffect) {
        self.events.push(HordeEvent::Sound { sound });
    }

    fn spawn_blood_spray(&mut self, position: DVec3, direction: DVec3, intensity: u32) {
        self.events.push(HordeEvent::BloodSpray {
            position,
            direction,
            intensity,
        });
    }

    fn spawn_gore_chunks(&mut self, position: DVec3, direction: DVec3) {
        self.events.push(HordeEvent::GoreChunks {
            position,
            direction,
        });
    }

    fn spawn_blood_pool(&mut self, position: DVec3) {
        self.events.push(HordeEvent::BloodPool { position });
    }

    fn add_kill_score(&mut self, points: u32) {
        self.events.push(HordeEvent::KillScore { points });
    }

    fn is_last_zombie_of_wave(&self) -> bool {
        self.last_of_wave
    }

    fn trigger_slowmo(&mut self) {
        self.events.push(HordeEvent::SlowMotion);
    }

    fn damage_player(&mut self, amount: u32) {
        self.events.push(HordeEvent::PlayerDamaged { amount });
    }
}
