//! Simulation systems driving the horde: tick orchestration, waves and score

pub mod horde;
pub mod score;
pub mod waves;

pub use horde::{HitOutcome, Horde, TickReport};
pub use score::ScoreBoard;
pub use waves::{WaveDirector, WavePhase, WaveStep};
