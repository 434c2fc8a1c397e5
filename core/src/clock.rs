//! Game clock: owns logical time and the pause flag.

use crate::types::{DurationMs, Millis};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameClock {
    pub logical_time: Millis,
    pub paused:       bool,
}

/// What is pushing the clock forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceSource {
    /// Real-time auto-advance. Suppressed while paused.
    Tick,
    /// Manual jump. Always applies, paused or not.
    FastForward,
}

impl GameClock {
    /// Clocks start running.
    pub fn new(start: Millis) -> Self {
        Self { logical_time: start, paused: false }
    }

    /// Advance by `delta` ms. Returns the new logical time, or `None` if
    /// a tick was suppressed by the pause guard.
    pub fn advance(&mut self, delta: DurationMs, source: AdvanceSource) -> Option<Millis> {
        if source == AdvanceSource::Tick && self.paused {
            return None;
        }
        let step = Millis::try_from(delta).unwrap_or(Millis::MAX);
        self.logical_time = self.logical_time.saturating_add(step);
        Some(self.logical_time)
    }

    pub fn pause(&mut self)  { self.paused = true;  }
    pub fn resume(&mut self) { self.paused = false; }

    /// Flip the pause flag. Returns the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }
}
