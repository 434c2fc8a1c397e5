//! Countdown and progress bar shown next to every player.
//!
//! Pure read-only projection of (logical time, reference last update).

use crate::{
    error::{TrackerError, TrackerResult},
    types::{DurationMs, Millis},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Projection {
    /// Fill of the progress bar, 0..=100.
    pub progress_percent: f64,
    /// Remaining time as `<m>m <ss>s`.
    pub countdown_label:  String,
    /// Milliseconds behind the label.
    pub ms_until_next:    DurationMs,
}

/// Time left before the next multiple of `span`. An elapsed value sitting
/// exactly on a boundary has nothing left, so the bar reads full instead
/// of flashing back to empty.
fn remaining_in(elapsed: DurationMs, span: DurationMs) -> DurationMs {
    let into = elapsed % span;
    if into == 0 { 0 } else { span - into }
}

pub fn format_countdown(ms: DurationMs) -> String {
    let secs = ms / 1000;
    format!("{}m {:02}s", secs / 60, secs % 60)
}

pub fn project(
    logical_time:   Millis,
    last_update:    Millis,
    block_duration: DurationMs,
) -> TrackerResult<Projection> {
    if block_duration == 0 {
        return Err(TrackerError::InvalidConfig("block duration must be positive".into()));
    }
    if logical_time < last_update {
        return Err(TrackerError::NegativeElapsed { last_update, logical_time });
    }
    let elapsed = logical_time.abs_diff(last_update);

    let next_block = remaining_in(elapsed, block_duration);
    let next_double = remaining_in(elapsed, block_duration.saturating_mul(2));
    let until_next = next_block.min(next_double);

    let progress_percent =
        (block_duration - next_block) as f64 / block_duration as f64 * 100.0;

    Ok(Projection {
        progress_percent,
        countdown_label: format_countdown(until_next),
        ms_until_next:   until_next,
    })
}
