//! Zombie archetypes and wave-biased spawn selection

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::SwarmError;

/// Per-archetype tuning. Shared read-only by every zombie of that variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantConfig {
    pub name: &'static str,
    /// Body and hitbox scale; also scales attack range
    pub scale: f64,
    pub health_mod: f64,
    pub speed_mod: f64,
    pub damage_mod: f64,
    /// Relative roulette weight among special variants
    pub spawn_weight: f64,
    pub skin_color: u32,
    pub skin_color_dark: u32,
    /// `None` keeps the default shirt texture
    pub shirt_color: Option<u32>,
    pub pants_color: u32,
}

pub const NORMAL: VariantConfig = VariantConfig {
    name: "Normal",
    scale: 1.0,
    health_mod: 1.0,
    speed_mod: 1.0,
    damage_mod: 1.0,
    spawn_weight: 50.0,
    skin_color: 0x5a6b4a,
    skin_color_dark: 0x3d4a35,
    shirt_color: None,
    pants_color: 0x252525,
};

pub const RUNNER: VariantConfig = VariantConfig {
    name: "Runner",
    scale: 0.85,
    health_mod: 0.5,
    speed_mod: 1.8,
    damage_mod: 0.7,
    spawn_weight: 25.0,
    skin_color: 0x8a9a8a,
    skin_color_dark: 0x6a7a6a,
    shirt_color: Some(0x444444),
    pants_color: 0x333333,
};

pub const BRUTE: VariantConfig = VariantConfig {
    name: "Brute",
    scale: 1.5,
    health_mod: 12.0,
    speed_mod: 0.55,
    damage_mod: 3.0,
    spawn_weight: 10.0,
    skin_color: 0x4a2525,
    skin_color_dark: 0x351818,
    shirt_color: Some(0x2a1515),
    pants_color: 0x1a1010,
};

pub const CRAWLER: VariantConfig = VariantConfig {
    name: "Crawler",
    scale: 0.65,
    health_mod: 0.8,
    speed_mod: 0.7,
    damage_mod: 1.2,
    spawn_weight: 15.0,
    skin_color: 0x5a4a35,
    skin_color_dark: 0x3d3020,
    shirt_color: Some(0x352a20),
    pants_color: 0x252015,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZombieVariant {
    #[default]
    Normal,
    Runner,
    Brute,
    Crawler,
}

impl ZombieVariant {
    pub const ALL: [ZombieVariant; 4] = [
        ZombieVariant::Normal,
        ZombieVariant::Runner,
        ZombieVariant::Brute,
        ZombieVariant::Crawler,
    ];

    /// Variants eligible for the special-spawn roulette
    pub const SPECIAL: [ZombieVariant; 3] = [
        ZombieVariant::Runner,
        ZombieVariant::Brute,
        ZombieVariant::Crawler,
    ];

    pub fn config(self) -> &'static VariantConfig {
        match self {
            ZombieVariant::Normal => &NORMAL,
            ZombieVariant::Runner => &RUNNER,
            ZombieVariant::Brute => &BRUTE,
            ZombieVariant::Crawler => &CRAWLER,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZombieVariant::Normal => "normal",
            ZombieVariant::Runner => "runner",
            ZombieVariant::Brute => "brute",
            ZombieVariant::Crawler => "crawler",
        }
    }

    /// Spawn weight after wave bias: brutes swell late, runners early
    pub fn wave_weight(self, wave: u32) -> f64 {
        let base = self.config().spawn_weight;
        match self {
            ZombieVariant::Brute if wave >= 5 => base * 1.5,
            ZombieVariant::Runner if wave < 3 => base * 1.5,
            _ => base,
        }
    }
}

impl fmt::Display for ZombieVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZombieVariant {
    type Err = SwarmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(ZombieVariant::Normal),
            "runner" => Ok(ZombieVariant::Runner),
            "brute" => Ok(ZombieVariant::Brute),
            "crawler" => Ok(ZombieVariant::Crawler),
            other => Err(SwarmError::UnknownVariant(other.to_string())),
        }
    }
}

/// Chance that a spawn in `wave` is any special variant (capped at 60%)
pub fn special_variant_chance(wave: u32) -> f64 {
    (0.1 + wave as f64 * 0.05).min(0.6)
}

/// Pick the variant for one spawn in `wave`
pub fn pick_variant<R: Rng + ?Sized>(wave: u32, rng: &mut R) -> ZombieVariant {
    if rng.gen::<f64>() > special_variant_chance(wave) {
        return ZombieVariant::Normal;
    }

    let weights = ZombieVariant::SPECIAL.map(|v| v.wave_weight(wave));
    let total: f64 = weights.iter().sum();
    let mut roll = rng.gen::<f64>() * total;

    for (variant, weight) in ZombieVariant::SPECIAL.iter().zip(weights) {
        roll -= weight;
        if roll <= 0.0 {
            return *variant;
        }
    }

    ZombieVariant::Normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_parse_and_display_round_trip() {
        for variant in ZombieVariant::ALL {
            assert_eq!(variant.to_string().parse::<ZombieVariant>().unwrap(), variant);
        }
        assert_eq!("  Brute ".parse::<ZombieVariant>().unwrap(), ZombieVariant::Brute);
    }

    #[test]
    fn test_unknown_variant_rejected() {
        let err = "spitter".parse::<ZombieVariant>().unwrap_err();
        assert!(matches!(err, SwarmError::UnknownVariant(ref s) if s == "spitter"));
    }

    #[test]
    fn test_special_chance_curve() {
        assert!((special_variant_chance(1) - 0.15).abs() < 1e-12);
        assert!((special_variant_chance(6) - 0.4).abs() < 1e-12);
        assert_eq!(special_variant_chance(10), 0.6);
        assert_eq!(special_variant_chance(50), 0.6);
    }

    #[test]
    fn test_wave_weight_bias() {
        assert_eq!(ZombieVariant::Runner.wave_weight(1), 37.5);
        assert_eq!(ZombieVariant::Runner.wave_weight(3), 25.0);
        assert_eq!(ZombieVariant::Brute.wave_weight(4), 10.0);
        assert_eq!(ZombieVariant::Brute.wave_weight(5), 15.0);
        assert_eq!(ZombieVariant::Crawler.wave_weight(9), 15.0);
    }

    #[test]
    fn test_brute_is_tanky_and_slow() {
        let brute = ZombieVariant::Brute.config();
        assert!(brute.health_mod > NORMAL.health_mod);
        assert!(brute.speed_mod < NORMAL.speed_mod);
    }

    #[test]
    fn test_special_share_within_wave_tolerance() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let samples = 100_000;
        let specials = (0..samples)
            .filter(|_| pick_variant(1, &mut rng) != ZombieVariant::Normal)
            .count();
        let share = specials as f64 / samples as f64;
        assert!((share - 0.15).abs() < 0.01, "wave 1 special share {share}");

        let specials = (0..samples)
            .filter(|_| pick_variant(20, &mut rng) != ZombieVariant::Normal)
            .count();
        let share = specials as f64 / samples as f64;
        assert!((share - 0.6).abs() < 0.01, "wave 20 special share {share}");
    }

    #[test]
    fn test_early_waves_favour_runners() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut runners = 0;
        let mut brutes = 0;
        for _ in 0..50_000 {
            match pick_variant(1, &mut rng) {
                ZombieVariant::Runner => runners += 1,
                ZombieVariant::Brute => brutes += 1,
                _ => {}
            }
        }
        assert!(runners > brutes * 3);
    }
}
