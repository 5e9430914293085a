//! Property tests for collision resolution and terrain

use glam::DVec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use undead_swarm::core::config::PhysicsConfig;
use undead_swarm::core::types::ObstacleId;
use undead_swarm::physics::{Obstacle, Physics, Terrain};

const RADIUS: f64 = 0.6;

fn yard() -> Physics {
    let obstacles = vec![
        Obstacle::from_bounds(ObstacleId(0), DVec2::new(8.0, -2.0), DVec2::new(12.0, 2.0)),
        Obstacle::cylinder(ObstacleId(1), DVec2::new(-10.0, 5.0), 1.5),
        Obstacle::rotated_box(ObstacleId(2), DVec2::new(0.0, -15.0), 6.0, 1.0, 0.7),
        Obstacle::cylinder(ObstacleId(3), DVec2::new(-30.0, -30.0), 3.0),
    ];
    Physics::new(&PhysicsConfig::default(), obstacles)
}

proptest! {
    #[test]
    fn resolved_moves_stay_clear(
        ox in -69.0f64..69.0,
        oz in -69.0f64..69.0,
        dx in -6.0f64..6.0,
        dz in -6.0f64..6.0,
        seed in any::<u64>(),
    ) {
        let physics = yard();
        let old = DVec2::new(ox, oz);
        prop_assume!(!physics.check_collision(old, RADIUS, None));

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let resolved = physics.resolve_collision(old, old + DVec2::new(dx, dz), RADIUS, None, &mut rng);
        prop_assert!(!physics.check_collision(resolved.position, RADIUS, None));
    }

    #[test]
    fn resolved_moves_stay_inside_map(
        ox in -69.0f64..69.0,
        oz in -69.0f64..69.0,
        dx in -50.0f64..50.0,
        dz in -50.0f64..50.0,
    ) {
        let physics = Physics::new(&PhysicsConfig::default(), vec![]);
        let old = DVec2::new(ox, oz);
        prop_assume!(!physics.check_collision(old, RADIUS, None));

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let resolved = physics.resolve_collision(old, old + DVec2::new(dx, dz), RADIUS, None, &mut rng);
        let limit = physics.map_half() - RADIUS;
        prop_assert!(resolved.position.x.abs() <= limit);
        prop_assert!(resolved.position.y.abs() <= limit);
    }

    #[test]
    fn clear_moves_are_taken_verbatim(
        ox in -20.0f64..20.0,
        oz in 20.0f64..40.0,
        dx in -1.0f64..1.0,
        dz in -1.0f64..1.0,
    ) {
        let physics = yard();
        let old = DVec2::new(ox, oz);
        let new = old + DVec2::new(dx, dz);
        prop_assume!(!physics.check_collision(new, RADIUS, None));

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let resolved = physics.resolve_collision(old, new, RADIUS, None, &mut rng);
        prop_assert_eq!(resolved.position, new);
        prop_assert!(!resolved.collided);
    }

    #[test]
    fn collision_normals_are_unit(
        x in -75.0f64..75.0,
        z in -75.0f64..75.0,
    ) {
        let physics = yard();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let result = physics.check_collision_advanced(DVec2::new(x, z), RADIUS, None, &mut rng);
        if result.collided {
            prop_assert!((result.normal.length() - 1.0).abs() < 1e-9);
        } else {
            prop_assert_eq!(result.normal, DVec2::ZERO);
        }
    }

    #[test]
    fn terrain_falls_away_from_hill_center(
        angle in 0.0f64..std::f64::consts::TAU,
        near in 0.0f64..30.0,
        gap in 0.0f64..30.0,
    ) {
        let terrain = Terrain::default();
        let dir = DVec2::from_angle(angle);
        let inner = terrain.height_at(terrain.center + dir * near);
        let outer = terrain.height_at(terrain.center + dir * (near + gap));
        prop_assert!(inner >= outer - 1e-12);
        prop_assert!(outer >= terrain.ground_level);
        prop_assert!(inner <= terrain.ground_level + terrain.height + 1e-12);
    }
}
