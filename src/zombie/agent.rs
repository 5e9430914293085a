//! A single zombie: stats, steering decision, combat reactions and death

use glam::{DVec2, DVec3};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;

use crate::core::config::{FlankSlotPolicy, HordeConfig};
use crate::core::math::{normalize_above, perpendicular, to_world};
use crate::core::types::ZombieId;
use crate::hive::{HiveMind, PlayerState};
use crate::physics::Physics;
use crate::zombie::constants::*;
use crate::zombie::hooks::{SoundEffect, ZombieHooks};
use crate::zombie::ragdoll::{BodyPart, RagdollPart};
use crate::zombie::role::{AiRole, TacticsTier};
use crate::zombie::steering;
use crate::zombie::stuck::StuckDetector;
use crate::zombie::variant::{VariantConfig, ZombieVariant};

/// One weapon hit landing on a zombie
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// World-space impact point; the body centre is used when absent
    pub point: Option<DVec3>,
    pub weapon_multiplier: f64,
    /// Active damage power-up multiplier, if any
    pub damage_boost: Option<f64>,
}

impl Hit {
    pub fn body(weapon_multiplier: f64) -> Self {
        Self {
            point: None,
            weapon_multiplier,
            damage_boost: None,
        }
    }

    pub fn at(point: DVec3, weapon_multiplier: f64) -> Self {
        Self {
            point: Some(point),
            ..Self::body(weapon_multiplier)
        }
    }

    pub fn with_boost(mut self, boost: f64) -> Self {
        self.damage_boost = Some(boost);
        self
    }

    pub fn damage(&self) -> f64 {
        self.damage_boost.unwrap_or(1.0) * self.weapon_multiplier
    }
}

/// Everything a zombie touches outside itself during one call
pub struct ZombieContext<'a> {
    pub player: &'a PlayerState,
    pub hive: &'a mut HiveMind,
    pub physics: &'a Physics,
    pub hooks: &'a mut dyn ZombieHooks,
    pub rng: &'a mut ChaCha8Rng,
    pub config: &'a HordeConfig,
}

/// Hit-reaction pose offset (radians) that relaxes back to zero
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Flinch {
    pub pitch: f64,
    pub roll: f64,
}

impl Flinch {
    fn recover(&mut self, dt: f64) {
        let keep = (1.0 - FLINCH_RECOVERY_RATE * dt).max(0.0);
        self.pitch *= keep;
        self.roll *= keep;
    }
}

#[derive(Debug, Clone)]
pub struct Zombie {
    id: ZombieId,
    variant: ZombieVariant,
    config: &'static VariantConfig,
    health: f64,
    max_health: f64,
    is_dead: bool,
    head_exploded: bool,

    pub position: DVec2,
    /// Feet height, following the terrain
    pub height: f64,
    /// Yaw in radians; 0 faces +z
    pub heading: f64,

    pub base_speed: f64,
    pub speed: f64,
    pub attack_range: f64,
    pub attack_damage: u32,
    /// Seconds until the next swing is allowed
    pub attack_cooldown: f64,

    ai_role: AiRole,
    ai_wave: u32,
    tactics: TacticsTier,
    pub flank_slot: Option<usize>,
    pub separation_force: DVec2,
    pub stuck: StuckDetector,

    pub stagger_timer: f64,
    /// Value of `age` when the last hit landed
    pub last_hit_time: Option<f64>,
    pub flinch: Flinch,
    pub age: f64,

    pub ragdoll_parts: Vec<RagdollPart>,
    pub death_elapsed: f64,
    pub walk_cycle: f64,
}

impl Zombie {
    pub fn new<R: Rng + ?Sized>(
        id: ZombieId,
        position: DVec2,
        wave: u32,
        variant: ZombieVariant,
        rng: &mut R,
    ) -> Self {
        let config = variant.config();

        let wave_mod = 1.0 + (wave as f64 - 1.0) * 0.1;
        let base_health = (2.0 + rng.gen::<f64>() * 2.0 * wave_mod).floor();
        let health = (base_health * config.health_mod).floor();
        let base_speed = (4.0 + rng.gen::<f64>() * 2.0) * config.speed_mod;
        let base_damage = 10 + (wave / 2) * 5;
        let attack_damage = (base_damage as f64 * config.damage_mod).floor() as u32;
        let ai_role = AiRole::assign(rng);

        Self {
            id,
            variant,
            config,
            health,
            max_health: health,
            is_dead: false,
            head_exploded: false,
            position,
            height: 0.0,
            heading: 0.0,
            base_speed,
            speed: base_speed,
            attack_range: 3.5 * config.scale,
            attack_damage,
            attack_cooldown: 0.0,
            ai_role,
            ai_wave: wave,
            tactics: TacticsTier::for_wave(wave),
            flank_slot: None,
            separation_force: DVec2::ZERO,
            stuck: StuckDetector::new(),
            stagger_timer: 0.0,
            last_hit_time: None,
            flinch: Flinch::default(),
            age: 0.0,
            ragdoll_parts: Vec::new(),
            death_elapsed: 0.0,
            walk_cycle: rng.gen::<f64>() * TAU,
        }
    }

    pub fn id(&self) -> ZombieId {
        self.id
    }

    pub fn variant(&self) -> ZombieVariant {
        self.variant
    }

    pub fn config(&self) -> &'static VariantConfig {
        self.config
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn max_health(&self) -> f64 {
        self.max_health
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    pub fn head_exploded(&self) -> bool {
        self.head_exploded
    }

    pub fn role(&self) -> AiRole {
        self.ai_role
    }

    pub fn wave(&self) -> u32 {
        self.ai_wave
    }

    pub fn tactics(&self) -> TacticsTier {
        self.tactics
    }

    pub fn is_staggered(&self) -> bool {
        self.stagger_timer > 0.0
    }

    /// Feet position in world space
    pub fn world_position(&self) -> DVec3 {
        to_world(self.position, self.height)
    }

    /// Hitbox centre in world space
    pub fn hitbox_center(&self) -> DVec3 {
        to_world(
            self.position,
            self.height + HITBOX_HALF_EXTENTS[1] * self.config.scale,
        )
    }

    pub fn hitbox_half_extents(&self) -> DVec3 {
        DVec3::from_array(HITBOX_HALF_EXTENTS) * self.config.scale
    }

    pub fn head_position(&self) -> DVec3 {
        to_world(self.position, self.height + HEAD_HEIGHT * self.config.scale)
    }

    /// Store and return the push away from the nearest live peers
    pub fn calculate_separation<I>(&mut self, peers: I) -> DVec2
    where
        I: IntoIterator<Item = (ZombieId, DVec2)>,
    {
        self.separation_force = if self.is_dead {
            DVec2::ZERO
        } else {
            steering::separation_force(self.id, self.position, peers)
        };
        self.separation_force
    }

    /// Role-driven desired direction (unit, or zero when there is nowhere to go).
    ///
    /// Also sets `speed` for this tick and manages the flank-slot claim.
    pub fn calculate_steering(&mut self, player_pos: DVec2, hive: &mut HiveMind) -> DVec2 {
        let dist = self.position.distance(player_pos);
        let mut target = player_pos;
        let mut weight = 1.0;
        self.speed = self.base_speed;

        match self.ai_role {
            AiRole::Rusher => {
                let boost = if self.tactics.has_full_tactics() {
                    RUSHER_FULL_TACTICS_SPEED
                } else {
                    RUSHER_SPEED
                };
                self.speed = self.base_speed * boost;
                weight = RUSHER_SEEK_WEIGHT;
            }
            AiRole::Flanker if self.tactics.has_flanking() => {
                let held = self
                    .flank_slot
                    .filter(|&slot| hive.slot_owner(slot) == Some(self.id));
                self.flank_slot = match (hive.policy(), held) {
                    (FlankSlotPolicy::Persistent, Some(slot)) => Some(slot),
                    _ => hive.claim_flank_slot(self.id, self.position),
                };

                if let Some(slot) = self.flank_slot.and_then(|i| hive.slot(i)) {
                    let t = if dist > FLANK_FAR_DISTANCE {
                        FLANK_FAR_WEIGHT
                    } else {
                        FLANK_NEAR_WEIGHT
                    };
                    target = player_pos.lerp(slot.position, t);
                }
                self.speed = self.base_speed * FLANKER_SPEED;
            }
            AiRole::Flanker => {}
            AiRole::Lurker => {
                self.speed = self.base_speed * LURKER_SPEED;
                weight = LURKER_SEEK_WEIGHT;

                if hive.threat_intensity > LURKER_THREAT_THRESHOLD
                    && steering::is_in_line_of_fire(
                        self.position,
                        player_pos,
                        hive.threat_direction,
                        LURKER_AIM_DOT,
                    )
                {
                    let sidestep = perpendicular(hive.threat_direction.normalize_or_zero());
                    target = self.position + sidestep * LURKER_SIDESTEP;
                }
            }
        }

        let seek = (target - self.position) / dist.max(MIN_SEEK_DIVISOR);
        let mut desired = seek * weight;
        if self.tactics.has_separation() {
            desired += self.separation_force * SEPARATION_BLEND;
        }

        normalize_above(desired, MIN_STEER_MAGNITUDE)
    }

    /// Record the current position; true when the zombie just tripped as stuck
    pub fn check_stuck(&mut self) -> bool {
        let tripped = self.stuck.check(self.position);
        if tripped {
            tracing::trace!(zombie = ?self.id, count = self.stuck.counter, "zombie stuck");
        }
        tripped
    }

    pub fn stuck_counter(&self) -> u32 {
        self.stuck.counter
    }

    pub fn calculate_obstacle_avoidance<R: Rng + ?Sized>(
        &self,
        direction: DVec2,
        physics: &Physics,
        radius: f64,
        rng: &mut R,
    ) -> DVec2 {
        steering::obstacle_avoidance(self.position, direction, radius, physics, rng)
    }

    pub fn stuck_escape_vector<R: Rng + ?Sized>(&self, player_pos: DVec2, rng: &mut R) -> DVec2 {
        steering::stuck_escape(self.position, player_pos, self.stuck.counter, rng)
    }

    /// Apply one weapon hit. Returns true when this hit killed the zombie.
    pub fn hit(&mut self, hit: &Hit, ctx: &mut ZombieContext<'_>) -> bool {
        if self.is_dead {
            return false;
        }

        let multiplier = hit.weapon_multiplier;
        self.health -= hit.damage();
        ctx.hooks.play_sound(SoundEffect::ZombieHit);

        let knock_dir = (self.position - ctx.player.position).normalize_or_zero();

        let rng = &mut *ctx.rng;
        let flinch = (0.15 + rng.gen::<f64>() * 0.15) * multiplier.min(2.0);
        self.flinch.pitch = -flinch - rng.gen::<f64>() * 0.1;
        self.flinch.roll = (rng.gen::<f64>() - 0.5) * 0.2 * multiplier;

        let knockback = (KNOCKBACK_MIN + rng.gen::<f64>() * KNOCKBACK_JITTER) * multiplier;
        let pushed = self.position + knock_dir * knockback;
        let radius = ctx.config.steering.zombie_radius;
        self.position = ctx
            .physics
            .resolve_collision(self.position, pushed, radius, None, rng)
            .position;

        self.stagger_timer = STAGGER_MIN_SECONDS + rng.gen::<f64>() * STAGGER_JITTER_SECONDS;
        self.last_hit_time = Some(self.age);

        let lethal = self.health <= 0.0;
        let blood_pos = hit
            .point
            .unwrap_or_else(|| to_world(self.position, self.height + BODY_CENTER_HEIGHT));
        let blood_dir = to_world(knock_dir, 0.0);
        let intensity = if lethal {
            BLOOD_LETHAL_INTENSITY
        } else {
            BLOOD_HIT_INTENSITY
        };
        ctx.hooks.spawn_blood_spray(blood_pos, blood_dir, intensity);
        if rng.gen::<f64>() > 0.5 {
            ctx.hooks.spawn_gore_chunks(blood_pos, blood_dir);
        }

        if lethal {
            self.die(ctx);
        }
        lethal
    }

    /// Kill the zombie. Every side effect fires once; later calls do nothing.
    pub fn die(&mut self, ctx: &mut ZombieContext<'_>) {
        if self.is_dead {
            return;
        }
        self.is_dead = true;
        self.death_elapsed = 0.0;
        self.stagger_timer = 0.0;

        ctx.hive.release_flank_slot(self.id);
        self.flank_slot = None;

        if !self.head_exploded {
            ctx.hooks.play_sound(SoundEffect::ZombieDeath);
            ctx.hooks.add_kill_score(ctx.config.combat.body_kill_score);
        }

        if ctx.hooks.is_last_zombie_of_wave() {
            ctx.hooks.trigger_slowmo();
        }

        let death_dir = (self.position - ctx.player.position).normalize_or_zero();
        let dir = to_world(death_dir, 0.0);

        if !self.head_exploded {
            let center = to_world(self.position, self.height + BODY_CENTER_HEIGHT);
            ctx.hooks.spawn_gore_chunks(center, dir);
            ctx.hooks.spawn_gore_chunks(center, dir);
            ctx.hooks.spawn_blood_spray(center, dir, 4);
            ctx.hooks
                .spawn_blood_spray(center - DVec3::new(0.0, 0.5, 0.0), dir, 3);
        } else {
            let torso = to_world(self.position, self.height + TORSO_HEIGHT);
            ctx.hooks.spawn_blood_spray(torso, dir, 2);
        }

        let rng = &mut *ctx.rng;
        let feet = self.world_position();
        ctx.hooks.spawn_blood_pool(feet);
        let jitter = DVec3::new(rng.gen::<f64>() - 0.5, 0.0, rng.gen::<f64>() - 0.5);
        ctx.hooks.spawn_blood_pool(feet + jitter);

        let scale = self.config.scale;
        let heading = self.heading;
        let head_gone = self.head_exploded;
        self.ragdoll_parts = BodyPart::ALL
            .into_iter()
            .filter(|part| !(head_gone && *part == BodyPart::Head))
            .map(|part| RagdollPart::detach(part, feet, heading, scale, death_dir, rng))
            .collect();

        tracing::debug!(
            zombie = ?self.id,
            variant = %self.variant,
            headshot = self.head_exploded,
            "zombie died"
        );
    }

    /// Blow the head off. Score for the headshot is the caller's business.
    pub fn explode_head<R: Rng + ?Sized>(
        &mut self,
        hooks: &mut dyn ZombieHooks,
        rng: &mut R,
    ) {
        if self.is_dead || self.head_exploded {
            return;
        }
        self.head_exploded = true;
        hooks.play_sound(SoundEffect::Headshot);

        let head = self.head_position();
        for _ in 0..HEADSHOT_SPRAYS {
            let spray = DVec3::new(
                (rng.gen::<f64>() - 0.5) * 2.0,
                rng.gen::<f64>() * 0.5 + 0.5,
                (rng.gen::<f64>() - 0.5) * 2.0,
            )
            .normalize();
            hooks.spawn_blood_spray(head, spray, HEADSHOT_SPRAY_INTENSITY);
        }
    }

    /// Full per-tick update
    pub fn update(&mut self, dt: f64, ctx: &mut ZombieContext<'_>) {
        self.age += dt;

        if self.is_dead {
            self.death_elapsed += dt;
            let gravity = ctx.config.physics.gravity;
            for part in &mut self.ragdoll_parts {
                part.step(dt, gravity, ctx.physics, &mut *ctx.hooks);
            }
            return;
        }

        self.stagger_timer = (self.stagger_timer - dt).max(0.0);
        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        self.flinch.recover(dt);

        let player_pos = ctx.player.position;
        let to_player = player_pos - self.position;
        let dist = to_player.length();

        if dist < self.attack_range {
            if dist > MIN_STEER_MAGNITUDE {
                self.heading = to_player.x.atan2(to_player.y);
            }
            if self.attack_cooldown <= 0.0 {
                ctx.hooks.damage_player(self.attack_damage);
                ctx.hooks.play_sound(SoundEffect::ZombieAttack);
                self.attack_cooldown = ctx.config.combat.attack_cooldown;
            }
            return;
        }

        let tuning = &ctx.config.steering;
        let mut direction = self.calculate_steering(player_pos, &mut *ctx.hive);

        self.check_stuck();
        if self.stuck.counter > 0 {
            direction += self.stuck_escape_vector(player_pos, &mut *ctx.rng) * tuning.escape_weight;
        }

        let avoidance =
            self.calculate_obstacle_avoidance(direction, ctx.physics, tuning.zombie_radius, &mut *ctx.rng);
        direction += avoidance * tuning.avoidance_weight;
        let direction = normalize_above(direction, MIN_STEER_MAGNITUDE);

        let wanted = self.position + direction * self.speed * dt;
        let resolved = ctx.physics.resolve_collision(
            self.position,
            wanted,
            tuning.zombie_radius,
            None,
            &mut *ctx.rng,
        );
        let moved = resolved.position.distance(self.position);
        self.position = resolved.position;
        self.height = ctx.physics.terrain_height(self.position);

        if direction.length_squared() > MIN_STEER_MAGNITUDE * MIN_STEER_MAGNITUDE {
            self.heading = direction.x.atan2(direction.y);
        }
        self.walk_cycle = (self.walk_cycle + moved * WALK_CYCLE_PER_UNIT) % TAU;
    }

    /// Cheap update for zombies outside the active budget: keep them in bounds
    pub fn update_minimal(&mut self, map_half: f64) {
        let limit = map_half - MINIMAL_BOUNDS_MARGIN;
        self.position = self.position.clamp(DVec2::splat(-limit), DVec2::splat(limit));
    }

    /// Drop ragdoll state once the corpse leaves the simulation
    pub fn cleanup(&mut self) {
        self.ragdoll_parts.clear();
    }

    /// Corpse has lingered long enough and its parts are at rest (or timed out)
    pub fn is_removable(&self, config: &HordeConfig) -> bool {
        if !self.is_dead || self.death_elapsed < config.combat.death_linger {
            return false;
        }
        self.death_elapsed >= config.combat.ragdoll_max_lifetime
            || self.ragdoll_parts.iter().all(|p| p.grounded)
    }
}
