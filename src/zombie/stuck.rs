//! Stuck detection over a fixed-size position history

use glam::DVec2;

use crate::zombie::constants::{
    STUCK_DISTANCE, STUCK_HISTORY, STUCK_TICK_ESTIMATE, STUCK_TRIP_SECONDS, STUCK_WINDOW,
};

/// Ring buffer of recent positions plus the stuck timer and counter
#[derive(Debug, Clone)]
pub struct StuckDetector {
    history: [DVec2; STUCK_HISTORY],
    head: usize,
    len: usize,
    pub timer: f64,
    /// Consecutive trips without meaningful movement; drives the escape tier
    pub counter: u32,
}

impl Default for StuckDetector {
    fn default() -> Self {
        Self {
            history: [DVec2::ZERO; STUCK_HISTORY],
            head: 0,
            len: 0,
            timer: 0.0,
            counter: 0,
        }
    }
}

impl StuckDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `age` 0 is the newest sample
    fn sample(&self, age: usize) -> DVec2 {
        let idx = (self.head + STUCK_HISTORY - 1 - age) % STUCK_HISTORY;
        self.history[idx]
    }

    fn push(&mut self, pos: DVec2) {
        self.history[self.head] = pos;
        self.head = (self.head + 1) % STUCK_HISTORY;
        self.len = (self.len + 1).min(STUCK_HISTORY);
    }

    fn clear_history(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Record `pos` and report whether the agent just tripped as stuck.
    ///
    /// Once the window holds enough samples, net displacement across it below
    /// the threshold accumulates the timer; past the trip time the detector
    /// resets its timer and history and bumps the counter. Any real movement
    /// clears both timer and counter.
    pub fn check(&mut self, pos: DVec2) -> bool {
        self.push(pos);

        if self.len < STUCK_WINDOW {
            return false;
        }

        let oldest = self.sample(STUCK_WINDOW - 1);
        let newest = self.sample(0);
        if newest.distance(oldest) < STUCK_DISTANCE {
            self.timer += STUCK_TICK_ESTIMATE;
            if self.timer > STUCK_TRIP_SECONDS {
                self.timer = 0.0;
                self.clear_history();
                self.counter += 1;
                return true;
            }
        } else {
            self.timer = 0.0;
            self.counter = 0;
        }

        false
    }
}
