//! Horde owner: runs one swarm tick in a fixed order
//!
//! 1. Clamp dt and refresh the hive blackboard from the player
//! 2. Advance wave pacing and place new spawns
//! 3. Split live zombies into the active set and the minimal set
//! 4. Separation for the active set from a position snapshot
//! 5. Full update for active and dead zombies, minimal update for the rest
//! 6. Drop corpses that are done

use glam::{DVec2, DVec3};
use ordered_float::OrderedFloat;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::config::HordeConfig;
use crate::core::error::{Result, SwarmError};
use crate::core::types::{Tick, ZombieId};
use crate::hive::{HiveMind, PlayerState};
use crate::physics::{Obstacle, Physics};
use crate::simulation::waves::WaveDirector;
use crate::spatial::SparseHashGrid;
use crate::zombie::constants::SEPARATION_RADIUS;
use crate::zombie::{
    pick_variant, steering, Hit, SoundEffect, Zombie, ZombieContext, ZombieHooks, ZombieVariant,
};

/// Summary of one `Horde::tick`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: Tick,
    pub wave: u32,
    pub wave_started: Option<u32>,
    pub wave_cleared: Option<u32>,
    pub spawned: Vec<ZombieId>,
    pub removed: Vec<ZombieId>,
    pub active: usize,
    pub minimal: usize,
    pub live: usize,
}

/// Result of routing a weapon hit to one zombie
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitOutcome {
    pub zombie: ZombieId,
    pub killed: bool,
    pub headshot: bool,
    pub remaining_health: f64,
}

/// Forwards every hook but answers the last-of-wave question itself
struct WaveAwareHooks<'a> {
    inner: &'a mut dyn ZombieHooks,
    last_of_wave: bool,
}

impl ZombieHooks for WaveAwareHooks<'_> {
    fn play_sound(&mut self, sound: SoundEffect) {
        self.inner.play_sound(sound);
    }

    fn spawn_blood_spray(&mut self, position: DVec3, direction: DVec3, intensity: u32) {
        self.inner.spawn_blood_spray(position, direction, intensity);
    }

    fn spawn_gore_chunks(&mut self, position: DVec3, direction: DVec3) {
        self.inner.spawn_gore_chunks(position, direction);
    }

    fn spawn_blood_pool(&mut self, position: DVec3) {
        self.inner.spawn_blood_pool(position);
    }

    fn add_kill_score(&mut self, points: u32) {
        self.inner.add_kill_score(points);
    }

    fn is_last_zombie_of_wave(&self) -> bool {
        self.last_of_wave
    }

    fn trigger_slowmo(&mut self) {
        self.inner.trigger_slowmo();
    }

    fn damage_player(&mut self, amount: u32) {
        self.inner.damage_player(amount);
    }
}

pub struct Horde {
    config: HordeConfig,
    physics: Physics,
    hive: HiveMind,
    zombies: Vec<Zombie>,
    grid: SparseHashGrid,
    waves: WaveDirector,
    rng: ChaCha8Rng,
    next_id: u32,
    tick: Tick,
}

impl Horde {
    pub fn new(config: HordeConfig, obstacles: Vec<Obstacle>, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            physics: Physics::new(&config.physics, obstacles),
            hive: HiveMind::new(&config.hive),
            zombies: Vec::new(),
            grid: SparseHashGrid::new(config.simulation.grid_cell_size),
            waves: WaveDirector::new(&config.waves),
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_id: 0,
            tick: 0,
            config,
        })
    }

    pub fn config(&self) -> &HordeConfig {
        &self.config
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    pub fn hive(&self) -> &HiveMind {
        &self.hive
    }

    pub fn waves(&self) -> &WaveDirector {
        &self.waves
    }

    pub fn zombies(&self) -> &[Zombie] {
        &self.zombies
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn zombie(&self, id: ZombieId) -> Option<&Zombie> {
        self.zombies.iter().find(|z| z.id() == id)
    }

    pub fn zombie_mut(&mut self, id: ZombieId) -> Option<&mut Zombie> {
        self.zombies.iter_mut().find(|z| z.id() == id)
    }

    pub fn live_count(&self) -> usize {
        self.zombies.iter().filter(|z| z.is_alive()).count()
    }

    /// Living zombie closest to `position`
    pub fn nearest_live(&self, position: DVec2) -> Option<&Zombie> {
        self.zombies
            .iter()
            .filter(|z| z.is_alive())
            .min_by_key(|z| OrderedFloat(z.position.distance_squared(position)))
    }

    /// Add a zombie outside wave pacing (tests, scripted events)
    pub fn spawn_zombie(&mut self, position: DVec2, wave: u32, variant: ZombieVariant) -> ZombieId {
        let id = ZombieId(self.next_id);
        self.next_id += 1;

        let mut zombie = Zombie::new(id, position, wave, variant, &mut self.rng);
        zombie.height = self.physics.terrain_height(position);
        tracing::debug!(zombie = ?id, %variant, role = ?zombie.role(), wave, "zombie spawned");
        self.zombies.push(zombie);
        id
    }

    pub fn tick(
        &mut self,
        dt: f64,
        player: &PlayerState,
        hooks: &mut dyn ZombieHooks,
    ) -> TickReport {
        let dt = dt.clamp(0.0, self.config.simulation.max_dt);
        self.tick += 1;
        let mut report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };

        self.hive.update(dt, player);

        let step = self.waves.advance(dt, self.live_count());
        report.wave_started = step.started;
        report.wave_cleared = step.cleared;
        let wave = self.waves.current_wave();
        for _ in 0..step.spawns {
            let radius = self.config.steering.zombie_radius;
            match self.waves.pick_spawn_point(&self.physics, radius, &mut self.rng) {
                Some(position) => {
                    let variant = pick_variant(wave, &mut self.rng);
                    report.spawned.push(self.spawn_zombie(position, wave, variant));
                }
                None => self.waves.requeue(1),
            }
        }

        let (active, minimal) = self.partition_active(player.position);
        report.active = active.len();
        report.minimal = minimal.len();

        let map_half = self.physics.map_half();
        for &i in &minimal {
            self.zombies[i].update_minimal(map_half);
        }

        self.apply_separation(&active);

        let mut ctx = ZombieContext {
            player,
            hive: &mut self.hive,
            physics: &self.physics,
            hooks,
            rng: &mut self.rng,
            config: &self.config,
        };
        for &i in &active {
            self.zombies[i].update(dt, &mut ctx);
        }
        for zombie in self.zombies.iter_mut().filter(|z| z.is_dead()) {
            zombie.update(dt, &mut ctx);
        }

        let config = &self.config;
        let removed = &mut report.removed;
        self.zombies.retain_mut(|zombie| {
            if zombie.is_removable(config) {
                zombie.cleanup();
                removed.push(zombie.id());
                false
            } else {
                true
            }
        });

        report.wave = wave;
        report.live = self.live_count();
        report
    }

    /// Live zombie indices nearest the player first, split at the active budget
    fn partition_active(&self, player: DVec2) -> (Vec<usize>, Vec<usize>) {
        let mut live: Vec<usize> = (0..self.zombies.len())
            .filter(|&i| self.zombies[i].is_alive())
            .collect();
        live.sort_by_key(|&i| OrderedFloat(self.zombies[i].position.distance_squared(player)));

        let budget = self.config.simulation.max_active_zombies.min(live.len());
        let minimal = live.split_off(budget);
        (live, minimal)
    }

    /// Separation for `active` from this tick's positions. Every live zombie
    /// counts as a peer, including the minimal tier.
    fn apply_separation(&mut self, active: &[usize]) {
        let zombies = &self.zombies;
        self.grid.rebuild(
            zombies
                .iter()
                .enumerate()
                .filter(|(_, z)| z.is_alive())
                .map(|(i, z)| (i, z.position)),
        );

        let positions: Vec<DVec2> = self.zombies.iter().map(|z| z.position).collect();
        let ids: Vec<ZombieId> = self.zombies.iter().map(|z| z.id()).collect();
        let grid = &self.grid;

        let force_for = |&i: &usize| {
            let peers = grid
                .query_radius(positions[i], SEPARATION_RADIUS, &positions)
                .into_iter()
                .map(|j| (ids[j], positions[j]));
            (i, steering::separation_force(ids[i], positions[i], peers))
        };

        let forces: Vec<(usize, DVec2)> = if active.len() >= self.config.simulation.parallel_threshold
        {
            active.par_iter().map(force_for).collect()
        } else {
            active.iter().map(force_for).collect()
        };

        for (i, force) in forces {
            self.zombies[i].separation_force = force;
        }
    }

    /// Route a weapon hit to zombie `id`
    pub fn apply_hit(
        &mut self,
        id: ZombieId,
        hit: &Hit,
        player: &PlayerState,
        hooks: &mut dyn ZombieHooks,
    ) -> Result<HitOutcome> {
        let index = self
            .zombies
            .iter()
            .position(|z| z.id() == id)
            .ok_or(SwarmError::ZombieNotFound(id))?;

        let mut hooks = WaveAwareHooks {
            inner: hooks,
            last_of_wave: self.waves.is_last_of_wave(self.live_count()),
        };
        let mut ctx = ZombieContext {
            player,
            hive: &mut self.hive,
            physics: &self.physics,
            hooks: &mut hooks,
            rng: &mut self.rng,
            config: &self.config,
        };

        let zombie = &mut self.zombies[index];
        let killed = zombie.hit(hit, &mut ctx);
        if killed {
            self.waves.record_kill();
        }

        Ok(HitOutcome {
            zombie: id,
            killed,
            headshot: zombie.head_exploded(),
            remaining_health: zombie.health(),
        })
    }

    /// Blow the head off zombie `id`, then apply `hit` to it
    pub fn apply_headshot(
        &mut self,
        id: ZombieId,
        hit: &Hit,
        player: &PlayerState,
        hooks: &mut dyn ZombieHooks,
    ) -> Result<HitOutcome> {
        let zombie = self
            .zombies
            .iter_mut()
            .find(|z| z.id() == id)
            .ok_or(SwarmError::ZombieNotFound(id))?;
        zombie.explode_head(&mut *hooks, &mut self.rng);
        self.apply_hit(id, hit, player, hooks)
    }
}
