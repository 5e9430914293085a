//! Kill streak multiplier and running score

use serde::{Deserialize, Serialize};

pub const KILL_MULTIPLIER_MAX: u32 = 10;
/// Seconds without a kill before the multiplier resets
pub const KILL_MULTIPLIER_DECAY: f64 = 3.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub score: u64,
    pub kills: u32,
    multiplier: u32,
    timer: f64,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self {
            score: 0,
            kills: 0,
            multiplier: 1,
            timer: 0.0,
        }
    }
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Award a kill at the current multiplier, then raise it. Returns points added.
    pub fn add_kill(&mut self, base_points: u32) -> u32 {
        let points = (base_points as f64 * self.multiplier as f64).floor() as u32;
        self.score += points as u64;
        self.kills += 1;

        self.multiplier = (self.multiplier + 1).min(KILL_MULTIPLIER_MAX);
        self.timer = KILL_MULTIPLIER_DECAY;
        points
    }

    pub fn update(&mut self, dt: f64) {
        if self.timer > 0.0 {
            self.timer -= dt;
            if self.timer <= 0.0 {
                self.timer = 0.0;
                self.multiplier = 1;
            }
        }
    }
}
