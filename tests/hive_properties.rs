//! Property tests for flank-slot ownership and steering output

use glam::DVec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use undead_swarm::core::config::{FlankSlotPolicy, HiveConfig};
use undead_swarm::core::types::ZombieId;
use undead_swarm::hive::{HiveMind, PlayerState};
use undead_swarm::zombie::steering::separation_force;
use undead_swarm::zombie::{Zombie, ZombieVariant};

#[derive(Debug, Clone)]
enum SlotOp {
    Claim(u32, f64, f64),
    Release(u32),
    Tick(f64, f64),
}

fn slot_op() -> impl Strategy<Value = SlotOp> {
    prop_oneof![
        3 => (0u32..12, -30.0f64..30.0, -30.0f64..30.0).prop_map(|(id, x, z)| SlotOp::Claim(id, x, z)),
        1 => (0u32..12).prop_map(SlotOp::Release),
        1 => (-10.0f64..10.0, -10.0f64..10.0).prop_map(|(x, z)| SlotOp::Tick(x, z)),
    ]
}

fn policy() -> impl Strategy<Value = FlankSlotPolicy> {
    prop_oneof![
        Just(FlankSlotPolicy::Persistent),
        Just(FlankSlotPolicy::ReclaimEachTick),
    ]
}

proptest! {
    #[test]
    fn zombies_hold_at_most_one_slot(
        ops in prop::collection::vec(slot_op(), 1..80),
        slot_policy in policy(),
    ) {
        let config = HiveConfig { slot_policy, ..HiveConfig::default() };
        let mut hive = HiveMind::new(&config);

        for op in ops {
            match op {
                SlotOp::Claim(id, x, z) => {
                    let zombie = ZombieId(id);
                    let had = hive.slot_of(zombie);
                    let free = hive.flank_slots().iter().filter(|s| !s.occupied()).count();
                    let claimed = hive.claim_flank_slot(zombie, DVec2::new(x, z));

                    prop_assert_eq!(claimed.is_some(), had.is_some() || free > 0);
                    if let Some(slot) = claimed {
                        prop_assert_eq!(hive.slot_owner(slot), Some(zombie));
                    }
                }
                SlotOp::Release(id) => {
                    hive.release_flank_slot(ZombieId(id));
                    prop_assert_eq!(hive.slot_of(ZombieId(id)), None);
                }
                SlotOp::Tick(x, z) => {
                    hive.update(0.016, &PlayerState::idle_at(DVec2::new(x, z)));
                }
            }

            for id in 0..12 {
                let held = hive
                    .flank_slots()
                    .iter()
                    .filter(|s| s.occupied_by == Some(ZombieId(id)))
                    .count();
                prop_assert!(held <= 1);
            }
            prop_assert_eq!(hive.flank_slots().len(), config.flank_slot_count);
        }
    }

    #[test]
    fn steering_is_unit_or_zero(
        x in -60.0f64..60.0,
        z in -60.0f64..60.0,
        wave in 1u32..12,
        seed in any::<u64>(),
        firing in any::<bool>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut hive = HiveMind::default();
        let player = PlayerState::new(DVec2::ZERO, DVec2::new(1.0, 0.0), firing);
        for _ in 0..5 {
            hive.update(0.1, &player);
        }

        let mut zombie = Zombie::new(ZombieId(0), DVec2::new(x, z), wave, ZombieVariant::Normal, &mut rng);
        let steer = zombie.calculate_steering(player.position, &mut hive);
        let len = steer.length();
        prop_assert!(len == 0.0 || (len - 1.0).abs() < 1e-9);
    }

    #[test]
    fn separation_is_unit_or_zero(
        peers in prop::collection::vec((-4.0f64..4.0, -4.0f64..4.0), 0..10),
    ) {
        let me = ZombieId(100);
        let others = peers
            .iter()
            .enumerate()
            .map(|(i, &(x, z))| (ZombieId(i as u32), DVec2::new(x, z)));
        let force = separation_force(me, DVec2::ZERO, others);
        let len = force.length();
        prop_assert!(len == 0.0 || (len - 1.0).abs() < 1e-9);
    }
}
