//! Shared primitive types used across the tracker.

/// A logical timestamp in milliseconds. Seeded from the wall clock at
/// start-up, then advanced only by ticks and fast-forwards.
pub type Millis = i64;

/// A non-negative span of logical time in milliseconds.
pub type DurationMs = u64;

/// Stable index of a player in the roster.
pub type PlayerId = usize;

/// One production block: 15 minutes.
pub const DEFAULT_BLOCK_DURATION_MS: DurationMs = 15 * 60 * 1000;

/// Real-time auto-advance step: 1 second.
pub const DEFAULT_TICK_INTERVAL_MS: DurationMs = 1000;
