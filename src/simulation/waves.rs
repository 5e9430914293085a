//! Wave pacing: countdown, staggered spawning, clear detection

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::WaveConfig;
use crate::physics::Physics;

/// Placement attempts per spawn before it is deferred to the next tick
const SPAWN_ATTEMPTS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Calm before the next wave; seconds remaining
    Countdown(f64),
    /// Wave running; spawns may still be pending
    Active,
}

/// What one `advance` call decided
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveStep {
    pub started: Option<u32>,
    pub cleared: Option<u32>,
    /// Zombies due to spawn this tick
    pub spawns: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveDirector {
    config: WaveConfig,
    wave: u32,
    phase: WavePhase,
    pending: u32,
    spawn_timer: f64,
    wave_size: u32,
    killed_this_wave: u32,
    waves_cleared: u32,
}

impl WaveDirector {
    pub fn new(config: &WaveConfig) -> Self {
        Self {
            config: config.clone(),
            wave: 0,
            phase: WavePhase::Countdown(config.countdown_seconds),
            pending: 0,
            spawn_timer: 0.0,
            wave_size: 0,
            killed_this_wave: 0,
            waves_cleared: 0,
        }
    }

    /// Zombies in wave `wave` (1-based)
    pub fn wave_size(&self, wave: u32) -> u32 {
        self.config.initial_zombies + self.config.zombies_per_wave_increment * wave.saturating_sub(1)
    }

    pub fn current_wave(&self) -> u32 {
        self.wave
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    pub fn in_wave(&self) -> bool {
        self.phase == WavePhase::Active
    }

    pub fn pending_spawns(&self) -> u32 {
        self.pending
    }

    pub fn killed_this_wave(&self) -> u32 {
        self.killed_this_wave
    }

    pub fn waves_cleared(&self) -> u32 {
        self.waves_cleared
    }

    pub fn record_kill(&mut self) {
        self.killed_this_wave += 1;
    }

    /// Put back spawns that could not be placed
    pub fn requeue(&mut self, count: u32) {
        self.pending += count;
    }

    /// A kill right now ends the wave if nothing else is alive or queued
    pub fn is_last_of_wave(&self, live: usize) -> bool {
        self.in_wave() && self.pending == 0 && live <= 1
    }

    /// Advance pacing by `dt` given the number of zombies still alive
    pub fn advance(&mut self, dt: f64, live: usize) -> WaveStep {
        let mut step = WaveStep::default();

        match self.phase {
            WavePhase::Countdown(remaining) => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = WavePhase::Countdown(remaining);
                    return step;
                }
                self.wave += 1;
                self.wave_size = self.wave_size(self.wave);
                self.pending = self.wave_size;
                self.spawn_timer = 0.0;
                self.killed_this_wave = 0;
                self.phase = WavePhase::Active;
                step.started = Some(self.wave);
                tracing::info!(wave = self.wave, size = self.wave_size, "wave started");
            }
            WavePhase::Active => {
                if self.pending == 0 && live == 0 {
                    step.cleared = Some(self.wave);
                    self.waves_cleared += 1;
                    self.phase = WavePhase::Countdown(self.config.countdown_seconds);
                    tracing::info!(
                        wave = self.wave,
                        kills = self.killed_this_wave,
                        "wave cleared"
                    );
                    return step;
                }
            }
        }

        if self.pending > 0 {
            // The first spawn of a wave lands on the tick it starts
            if step.started.is_none() {
                self.spawn_timer -= dt;
            }
            while self.spawn_timer <= 0.0 && self.pending > 0 {
                step.spawns += 1;
                self.pending -= 1;
                self.spawn_timer += self.config.spawn_interval;
            }
        }

        step
    }

    /// Random collision-free point just inside one map edge
    pub fn pick_spawn_point<R: Rng + ?Sized>(
        &self,
        physics: &Physics,
        radius: f64,
        rng: &mut R,
    ) -> Option<DVec2> {
        let edge = physics.map_half() - self.config.spawn_edge_inset;
        if edge <= 0.0 {
            return None;
        }
        (0..SPAWN_ATTEMPTS).find_map(|_| {
            let along = rng.gen_range(-edge..=edge);
            let candidate = match rng.gen_range(0..4) {
                0 => DVec2::new(along, -edge),
                1 => DVec2::new(along, edge),
                2 => DVec2::new(-edge, along),
                _ => DVec2::new(edge, along),
            };
            (!physics.check_collision(candidate, radius, None)).then_some(candidate)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PhysicsConfig;
    use crate::core::types::ObstacleId;
    use crate::physics::Obstacle;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn director() -> WaveDirector {
        WaveDirector::new(&WaveConfig::default())
    }

    #[test]
    fn test_wave_size_formula() {
        let waves = director();
        assert_eq!(waves.wave_size(1), 10);
        assert_eq!(waves.wave_size(2), 15);
        assert_eq!(waves.wave_size(7), 40);
    }

    #[test]
    fn test_countdown_then_start() {
        let mut waves = director();
        assert_eq!(waves.advance(2.0, 0), WaveStep::default());
        let step = waves.advance(1.0, 0);
        assert_eq!(step.started, Some(1));
        assert_eq!(step.spawns, 1);
        assert_eq!(waves.pending_spawns(), 9);
        assert!(waves.in_wave());
    }

    #[test]
    fn test_spawns_are_staggered() {
        let mut waves = director();
        waves.advance(3.0, 0);
        let mut spawned = 1;
        // One more second at a 0.35 s interval: spawns at 0.35 and 0.70
        for _ in 0..8 {
            spawned += waves.advance(0.125, spawned as usize).spawns;
        }
        assert_eq!(spawned, 3);
    }

    #[test]
    fn test_wave_clears_only_when_empty() {
        let mut waves = director();
        waves.advance(3.0, 0);
        let mut live = 1;
        while waves.pending_spawns() > 0 {
            live += waves.advance(0.5, live).spawns as usize;
        }
        assert_eq!(live, 10);
        assert_eq!(waves.advance(0.1, 3).cleared, None);
        assert!(waves.is_last_of_wave(1));
        assert!(!waves.is_last_of_wave(2));

        let step = waves.advance(0.1, 0);
        assert_eq!(step.cleared, Some(1));
        assert_eq!(waves.waves_cleared(), 1);
        assert!(matches!(waves.phase(), WavePhase::Countdown(_)));
        assert!(!waves.is_last_of_wave(0));
    }

    #[test]
    fn test_requeue_delays_clear() {
        let mut waves = director();
        waves.advance(3.0, 0);
        while waves.pending_spawns() > 0 {
            waves.advance(1.0, 1);
        }
        waves.requeue(1);
        assert_eq!(waves.advance(0.0, 0).cleared, None);
    }

    #[test]
    fn test_spawn_points_hug_the_edge() {
        let waves = director();
        let physics = Physics::new(&PhysicsConfig::default(), vec![]);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            let p = waves.pick_spawn_point(&physics, 0.6, &mut rng).unwrap();
            assert!((p.x.abs() - 67.0).abs() < 1e-9 || (p.y.abs() - 67.0).abs() < 1e-9);
            assert!(!physics.check_collision(p, 0.6, None));
        }
    }

    #[test]
    fn test_blocked_edges_yield_none() {
        let waves = director();
        // One huge obstacle covering the whole map
        let wall = Obstacle::cylinder(ObstacleId(1), DVec2::ZERO, 200.0);
        let physics = Physics::new(&PhysicsConfig::default(), vec![wall]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(waves.pick_spawn_point(&physics, 0.6, &mut rng), None);
    }

    #[test]
    fn test_inset_swallowing_the_map_yields_none() {
        let config = WaveConfig {
            spawn_edge_inset: 80.0,
            ..WaveConfig::default()
        };
        let waves = WaveDirector::new(&config);
        let physics = Physics::new(&PhysicsConfig::default(), vec![]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(waves.pick_spawn_point(&physics, 0.6, &mut rng), None);
    }
}
