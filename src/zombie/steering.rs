//! Pure steering forces: separation, obstacle avoidance and stuck escape
//!
//! Everything here returns either a zero vector or a unit vector; callers
//! blend and renormalize.

use glam::DVec2;
use ordered_float::OrderedFloat;
use rand::Rng;

use crate::core::math::{normalize_above, perpendicular, random_unit};
use crate::core::types::ZombieId;
use crate::physics::Physics;
use crate::zombie::constants::{
    AVOIDANCE_DANGER_MARGIN, AVOIDANCE_LOOKAHEAD, AVOIDANCE_RAY_ANGLES, AVOIDANCE_RAY_WEIGHTS,
    AVOIDANCE_REPULSION, MAX_ESCAPE_TIER, MIN_NEIGHBOR_DIST_SQ, MIN_STEER_MAGNITUDE,
    SEPARATION_NEIGHBORS, SEPARATION_RADIUS, SEPARATION_STRENGTH,
};

/// Push away from the nearest live peers.
///
/// `peers` may include `id` itself; it is skipped. Only the three nearest
/// peers are considered, and of those only ones strictly inside the
/// separation radius (but not coincident) contribute.
pub fn separation_force<I>(id: ZombieId, position: DVec2, peers: I) -> DVec2
where
    I: IntoIterator<Item = (ZombieId, DVec2)>,
{
    let mut nearest: Vec<(f64, DVec2)> = peers
        .into_iter()
        .filter(|(peer, _)| *peer != id)
        .map(|(_, pos)| (position.distance_squared(pos), pos))
        .collect();
    nearest.sort_by_key(|(dist_sq, _)| OrderedFloat(*dist_sq));

    let radius_sq = SEPARATION_RADIUS * SEPARATION_RADIUS;
    let mut force = DVec2::ZERO;
    let mut contributors = 0;

    for (dist_sq, peer_pos) in nearest.iter().take(SEPARATION_NEIGHBORS) {
        if *dist_sq > MIN_NEIGHBOR_DIST_SQ && *dist_sq < radius_sq {
            let dist = dist_sq.sqrt();
            let away = (position - *peer_pos) / dist;
            let strength = (SEPARATION_RADIUS - dist) / SEPARATION_RADIUS * SEPARATION_STRENGTH;
            force += away * strength;
            contributors += 1;
        }
    }

    if contributors == 0 {
        return DVec2::ZERO;
    }
    normalize_above(force, MIN_STEER_MAGNITUDE)
}

/// Fan of lookahead probes plus proximity repulsion from nearby obstacles
pub fn obstacle_avoidance<R: Rng + ?Sized>(
    position: DVec2,
    direction: DVec2,
    radius: f64,
    physics: &Physics,
    rng: &mut R,
) -> DVec2 {
    let heading = direction.x.atan2(direction.y);
    let mut avoid = DVec2::ZERO;

    for (offset, weight) in AVOIDANCE_RAY_ANGLES.iter().zip(AVOIDANCE_RAY_WEIGHTS) {
        let angle = heading + offset;
        let ray = DVec2::new(angle.sin(), angle.cos());
        let probe = position + ray * AVOIDANCE_LOOKAHEAD;
        let hit = physics.check_collision_advanced(probe, radius, None, rng);
        if hit.collided {
            avoid += hit.normal * weight;
        }
    }

    for obstacle in physics.obstacles() {
        let delta = position - obstacle.center();
        let dist = delta.length();
        let danger = radius + obstacle.radius() + AVOIDANCE_DANGER_MARGIN;
        if dist < danger && dist > MIN_STEER_MAGNITUDE {
            avoid += delta / dist * ((danger - dist) / danger) * AVOIDANCE_REPULSION;
        }
    }

    normalize_above(avoid, MIN_STEER_MAGNITUDE)
}

/// Escape direction for a stuck zombie. Escalates with `stuck_counter`:
/// sidestep, then back off, then pick a random heading.
pub fn stuck_escape<R: Rng + ?Sized>(
    position: DVec2,
    player: DVec2,
    stuck_counter: u32,
    rng: &mut R,
) -> DVec2 {
    let tier = stuck_counter.min(MAX_ESCAPE_TIER);
    if tier == 0 {
        return DVec2::ZERO;
    }

    if tier >= MAX_ESCAPE_TIER {
        return random_unit(rng);
    }

    // Standing on the player: no direction to sidestep or back away from
    let offset = player - position;
    let dist = offset.length();
    if dist <= MIN_STEER_MAGNITUDE {
        return DVec2::ZERO;
    }
    let to_player = offset / dist;

    match tier {
        1 => {
            let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            perpendicular(to_player) * side
        }
        _ => -to_player,
    }
}

/// Whether the player's aim points at `position` closely enough to dodge
pub fn is_in_line_of_fire(position: DVec2, player: DVec2, aim: DVec2, min_dot: f64) -> bool {
    let from_player = (position - player).normalize_or_zero();
    aim.normalize_or_zero().dot(from_player) > min_dot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PhysicsConfig;
    use crate::core::types::ObstacleId;
    use crate::physics::Obstacle;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn open_world() -> Physics {
        Physics::new(&PhysicsConfig::default(), vec![])
    }

    #[test]
    fn test_separation_without_peers_is_zero() {
        let force = separation_force(ZombieId(0), DVec2::ZERO, std::iter::empty());
        assert_eq!(force, DVec2::ZERO);
    }

    #[test]
    fn test_separation_ignores_self_and_far_peers() {
        let peers = vec![(ZombieId(0), DVec2::ZERO), (ZombieId(1), DVec2::new(5.0, 0.0))];
        assert_eq!(separation_force(ZombieId(0), DVec2::ZERO, peers), DVec2::ZERO);
    }

    #[test]
    fn test_separation_pushes_away_as_unit_vector() {
        let peers = vec![(ZombieId(1), DVec2::new(1.0, 0.0))];
        let force = separation_force(ZombieId(0), DVec2::ZERO, peers);
        assert!((force - DVec2::new(-1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_separation_uses_only_three_nearest() {
        // Three close peers to the east, a fourth to the west that is further away
        let peers = vec![
            (ZombieId(1), DVec2::new(1.0, 0.1)),
            (ZombieId(2), DVec2::new(1.0, -0.1)),
            (ZombieId(3), DVec2::new(1.2, 0.0)),
            (ZombieId(4), DVec2::new(-1.5, 0.0)),
        ];
        let force = separation_force(ZombieId(0), DVec2::ZERO, peers);
        assert!(force.x < -0.99);
    }

    #[test]
    fn test_coincident_peer_is_skipped() {
        let peers = vec![(ZombieId(1), DVec2::new(0.05, 0.0))];
        assert_eq!(separation_force(ZombieId(0), DVec2::ZERO, peers), DVec2::ZERO);
    }

    #[test]
    fn test_avoidance_in_open_field_is_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let avoid =
            obstacle_avoidance(DVec2::ZERO, DVec2::new(0.0, 1.0), 0.6, &open_world(), &mut rng);
        assert_eq!(avoid, DVec2::ZERO);
    }

    #[test]
    fn test_avoidance_turns_from_obstacle_ahead() {
        let crate_ahead = Obstacle::from_bounds(
            ObstacleId(1),
            DVec2::new(-1.5, 2.5),
            DVec2::new(1.5, 5.5),
        );
        let world = Physics::new(&PhysicsConfig::default(), vec![crate_ahead]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let avoid = obstacle_avoidance(DVec2::ZERO, DVec2::new(0.0, 1.0), 0.6, &world, &mut rng);
        assert!(avoid.y < 0.0);
        assert!((avoid.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_avoidance_near_wall_points_inward() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let avoid = obstacle_avoidance(
            DVec2::new(68.0, 0.0),
            DVec2::new(1.0, 0.0),
            0.6,
            &open_world(),
            &mut rng,
        );
        assert!(avoid.x < 0.0);
    }

    #[test]
    fn test_escape_tiers() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let pos = DVec2::ZERO;
        let player = DVec2::new(10.0, 0.0);

        assert_eq!(stuck_escape(pos, player, 0, &mut rng), DVec2::ZERO);

        let side = stuck_escape(pos, player, 1, &mut rng);
        assert!(side.x.abs() < 1e-12);
        assert!((side.y.abs() - 1.0).abs() < 1e-12);

        assert_eq!(stuck_escape(pos, player, 2, &mut rng), DVec2::new(-1.0, 0.0));

        let random = stuck_escape(pos, player, 3, &mut rng);
        assert!((random.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_escape_on_top_of_player_waits_for_random_tier() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let pos = DVec2::new(3.0, 3.0);
        let player = pos + DVec2::new(0.005, 0.0);
        assert_eq!(stuck_escape(pos, player, 1, &mut rng), DVec2::ZERO);
        assert_eq!(stuck_escape(pos, player, 2, &mut rng), DVec2::ZERO);
        let random = stuck_escape(pos, player, 3, &mut rng);
        assert!((random.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_escape_counter_saturates() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let v = stuck_escape(DVec2::ZERO, DVec2::new(1.0, 0.0), 250, &mut rng);
        assert!((v.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_line_of_fire() {
        let player = DVec2::ZERO;
        let aim = DVec2::new(1.0, 0.0);
        assert!(is_in_line_of_fire(DVec2::new(10.0, 1.0), player, aim, 0.5));
        assert!(!is_in_line_of_fire(DVec2::new(0.0, 10.0), player, aim, 0.5));
        assert!(!is_in_line_of_fire(DVec2::new(-10.0, 0.0), player, aim, 0.5));
    }
}
