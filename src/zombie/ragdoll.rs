//! Detached body parts tumbling after death

use glam::{DVec2, DVec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::physics::Physics;
use crate::zombie::hooks::ZombieHooks;

const BOUNCE: f64 = 0.3;
const GROUND_FRICTION: f64 = 0.7;
const SPIN_DAMPING: f64 = 0.6;
/// Rebounds slower than this settle the part for good
const SETTLE_SPEED: f64 = 1.0;
const BLEED_INTERVAL: f64 = 0.15;
const BLEED_INTENSITY: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Head,
    Torso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl BodyPart {
    pub const ALL: [BodyPart; 6] = [
        BodyPart::Head,
        BodyPart::Torso,
        BodyPart::LeftArm,
        BodyPart::RightArm,
        BodyPart::LeftLeg,
        BodyPart::RightLeg,
    ];

    /// Rest offset from the feet in body space (x right, y up, z forward)
    pub fn local_offset(self, scale: f64) -> DVec3 {
        let offset = match self {
            BodyPart::Head => DVec3::new(0.0, 1.85, 0.0),
            BodyPart::Torso => DVec3::new(0.0, 1.1, 0.0),
            BodyPart::LeftArm => DVec3::new(-0.45, 1.3, 0.4),
            BodyPart::RightArm => DVec3::new(0.45, 1.3, 0.4),
            BodyPart::LeftLeg => DVec3::new(-0.2, 0.4, 0.0),
            BodyPart::RightLeg => DVec3::new(0.2, 0.4, 0.0),
        };
        offset * scale
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagdollPart {
    pub part: BodyPart,
    pub position: DVec3,
    pub velocity: DVec3,
    pub angular_velocity: DVec3,
    /// Euler angles, radians
    pub rotation: DVec3,
    pub grounded: bool,
    pub bleed_timer: f64,
    pub can_bleed: bool,
}

impl RagdollPart {
    /// Fling `part` off a body standing at `feet` facing `heading`.
    ///
    /// `death_dir` is the ground-plane direction from the killer to the body.
    pub fn detach<R: Rng + ?Sized>(
        part: BodyPart,
        feet: DVec3,
        heading: f64,
        scale: f64,
        death_dir: DVec2,
        rng: &mut R,
    ) -> Self {
        let local = part.local_offset(scale);
        let (sin, cos) = heading.sin_cos();
        let world_offset = DVec3::new(
            local.x * cos + local.z * sin,
            local.y,
            -local.x * sin + local.z * cos,
        );

        let velocity = DVec3::new(
            (rng.gen::<f64>() - 0.5) * 15.0 + death_dir.x * 12.0,
            rng.gen::<f64>() * 10.0 + 5.0,
            (rng.gen::<f64>() - 0.5) * 15.0 + death_dir.y * 12.0,
        );
        let angular_velocity = DVec3::new(
            (rng.gen::<f64>() - 0.5) * 25.0,
            (rng.gen::<f64>() - 0.5) * 25.0,
            (rng.gen::<f64>() - 0.5) * 25.0,
        );

        Self {
            part,
            position: feet + world_offset,
            velocity,
            angular_velocity,
            rotation: DVec3::new(0.0, heading, 0.0),
            grounded: false,
            bleed_timer: 0.0,
            can_bleed: true,
        }
    }

    /// Integrate one step. Grounded parts no longer move.
    pub fn step(
        &mut self,
        dt: f64,
        gravity: f64,
        physics: &Physics,
        hooks: &mut dyn ZombieHooks,
    ) {
        if self.grounded {
            return;
        }

        self.velocity.y -= gravity * dt;
        self.position += self.velocity * dt;
        self.rotation += self.angular_velocity * dt;

        let ground = physics.terrain_height(DVec2::new(self.position.x, self.position.z));
        if self.position.y <= ground {
            self.position.y = ground;
            if self.velocity.y.abs() * BOUNCE > SETTLE_SPEED {
                self.velocity.y *= -BOUNCE;
                self.velocity.x *= GROUND_FRICTION;
                self.velocity.z *= GROUND_FRICTION;
                self.angular_velocity *= SPIN_DAMPING;
            } else {
                self.grounded = true;
                self.velocity = DVec3::ZERO;
                self.angular_velocity = DVec3::ZERO;
            }
            return;
        }

        if self.can_bleed {
            self.bleed_timer += dt;
            if self.bleed_timer >= BLEED_INTERVAL {
                self.bleed_timer = 0.0;
                hooks.spawn_blood_spray(self.position, DVec3::NEG_Y, BLEED_INTENSITY);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PhysicsConfig;
    use crate::zombie::hooks::EventLog;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn flat_world() -> Physics {
        Physics::new(&PhysicsConfig::default(), vec![])
    }

    fn part_at(position: DVec3, velocity: DVec3) -> RagdollPart {
        RagdollPart {
            part: BodyPart::Torso,
            position,
            velocity,
            angular_velocity: DVec3::new(3.0, 0.0, 0.0),
            rotation: DVec3::ZERO,
            grounded: false,
            bleed_timer: 0.0,
            can_bleed: true,
        }
    }

    #[test]
    fn test_detach_flings_upward() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for part in BodyPart::ALL {
            let ragdoll = RagdollPart::detach(
                part,
                DVec3::new(30.0, -5.0, 30.0),
                0.0,
                1.0,
                DVec2::new(1.0, 0.0),
                &mut rng,
            );
            assert!(ragdoll.velocity.y >= 5.0 && ragdoll.velocity.y < 15.0);
            assert!(ragdoll.position.y > -5.0);
        }
    }

    #[test]
    fn test_offsets_follow_heading() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let arm = RagdollPart::detach(
            BodyPart::RightArm,
            DVec3::ZERO,
            std::f64::consts::PI,
            1.0,
            DVec2::ZERO,
            &mut rng,
        );
        // Turned around: right arm ends up on the -x side, forward on -z
        assert!((arm.position.x + 0.45).abs() < 1e-9);
        assert!((arm.position.z + 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_part_falls_and_settles() {
        let physics = flat_world();
        let mut hooks = EventLog::new();
        let mut part = part_at(DVec3::new(40.0, -3.0, 40.0), DVec3::new(2.0, 6.0, 0.0));

        let mut steps = 0;
        while !part.grounded {
            part.step(0.016, 35.0, &physics, &mut hooks);
            steps += 1;
            assert!(steps < 2_000, "part never settled");
        }
        assert_eq!(part.position.y, -5.0);
        assert_eq!(part.velocity, DVec3::ZERO);

        let settled = part.position;
        part.step(0.016, 35.0, &physics, &mut hooks);
        assert_eq!(part.position, settled);
    }

    #[test]
    fn test_airborne_part_bleeds_periodically() {
        let physics = flat_world();
        let mut hooks = EventLog::new();
        let mut part = part_at(DVec3::new(40.0, 50.0, 40.0), DVec3::ZERO);
        for _ in 0..10 {
            part.step(0.016, 35.0, &physics, &mut hooks);
        }
        // 0.16 s airborne: exactly one drip
        assert_eq!(hooks.blood_sprays(), 1);
    }

    #[test]
    fn test_rests_on_hill_surface() {
        let physics = flat_world();
        let mut hooks = EventLog::new();
        let mut part = part_at(DVec3::new(0.0, 10.0, 0.0), DVec3::ZERO);
        part.can_bleed = false;
        while !part.grounded {
            part.step(0.016, 35.0, &physics, &mut hooks);
        }
        assert!((part.position.y - 0.0).abs() < 1e-9);
        assert!(hooks.events.is_empty());
    }
}
