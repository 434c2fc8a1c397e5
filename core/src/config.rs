use crate::{
    accrual::ProductionTable,
    error::{TrackerError, TrackerResult},
    types::{DurationMs, DEFAULT_BLOCK_DURATION_MS, DEFAULT_TICK_INTERVAL_MS},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ROSTER: [&str; 9] = [
    "nyo", "nand", "jori", "bas", "karel", "kwinten", "stef", "yarne", "younes",
];

/// Static tracker configuration. Every field has a default, so a
/// config file only needs the keys it overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    pub roster:            Vec<String>,
    pub block_duration_ms: DurationMs,
    pub tick_interval_ms:  DurationMs,
    /// Span of one manual fast-forward. One block when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast_forward_ms:   Option<DurationMs>,
    pub production:        ProductionTable,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            roster:            DEFAULT_ROSTER.iter().map(|s| s.to_string()).collect(),
            block_duration_ms: DEFAULT_BLOCK_DURATION_MS,
            tick_interval_ms:  DEFAULT_TICK_INTERVAL_MS,
            fast_forward_ms:   None,
            production:        ProductionTable::default(),
        }
    }
}

impl TrackerConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> TrackerResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> TrackerResult<Self> {
        let config: TrackerConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> TrackerResult<()> {
        if self.roster.is_empty() {
            return Err(TrackerError::InvalidConfig("roster is empty".into()));
        }
        if self.block_duration_ms == 0 {
            return Err(TrackerError::InvalidConfig("block_duration_ms must be positive".into()));
        }
        if self.tick_interval_ms == 0 {
            return Err(TrackerError::InvalidConfig("tick_interval_ms must be positive".into()));
        }
        let fast_forward = self.fast_forward_ms();
        if fast_forward == 0 {
            return Err(TrackerError::InvalidConfig("fast_forward_ms must be positive".into()));
        }
        if fast_forward % self.block_duration_ms != 0 {
            return Err(TrackerError::InvalidConfig(format!(
                "fast_forward_ms {fast_forward} is not a whole number of {}ms blocks",
                self.block_duration_ms
            )));
        }
        Ok(())
    }

    pub fn fast_forward_ms(&self) -> DurationMs {
        self.fast_forward_ms.unwrap_or(self.block_duration_ms)
    }
}
