//! Tactical roles and wave-gated tactics tiers

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::zombie::constants::{
    FLANKER_CUMULATIVE, FLANKING_UNLOCK_WAVE, FULL_TACTICS_WAVE, MAX_TACTICS_WAVE, RUSHER_SHARE,
    SEPARATION_UNLOCK_WAVE,
};

/// Role drawn once at spawn; never changes afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiRole {
    /// Direct charge
    Rusher,
    /// Works around the player through a flank slot
    Flanker,
    /// Slow approach that sidesteps the player's aim
    Lurker,
}

impl AiRole {
    /// 40% rusher, 35% flanker, 25% lurker
    pub fn assign<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_roll(rng.gen::<f64>())
    }

    pub fn from_roll(roll: f64) -> Self {
        if roll < RUSHER_SHARE {
            AiRole::Rusher
        } else if roll < FLANKER_CUMULATIVE {
            AiRole::Flanker
        } else {
            AiRole::Lurker
        }
    }
}

/// Difficulty gate derived from the wave a zombie spawned in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TacticsTier {
    /// Plain seek
    Basic,
    /// Adds peer separation
    Separation,
    /// Adds flank-slot coordination
    Flanking,
    /// Adds the rusher speed bonus
    Full,
}

impl TacticsTier {
    pub fn for_wave(wave: u32) -> Self {
        let level = wave.min(MAX_TACTICS_WAVE);
        if level >= FULL_TACTICS_WAVE {
            TacticsTier::Full
        } else if level >= FLANKING_UNLOCK_WAVE {
            TacticsTier::Flanking
        } else if level >= SEPARATION_UNLOCK_WAVE {
            TacticsTier::Separation
        } else {
            TacticsTier::Basic
        }
    }

    pub fn has_separation(self) -> bool {
        self >= TacticsTier::Separation
    }

    pub fn has_flanking(self) -> bool {
        self >= TacticsTier::Flanking
    }

    pub fn has_full_tactics(self) -> bool {
        self == TacticsTier::Full
    }
}
