//! Events emitted by the tracker.
//!
//! RULE: Every state change produces exactly one event.
//! Clamped no-ops and suppressed ticks produce none.

use crate::{
    clock::AdvanceSource,
    player::{BuildingKind, ResourceBundle, ResourceKind},
    types::{DurationMs, Millis, PlayerId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrackerEvent {
    // ── Clock events ───────────────────────────────
    ClockAdvanced {
        source:       AdvanceSource,
        delta_ms:     DurationMs,
        logical_time: Millis,
    },
    Paused {
        logical_time: Millis,
    },
    Resumed {
        logical_time: Millis,
    },

    // ── Accrual events ─────────────────────────────
    ResourcesAccrued {
        player:      PlayerId,
        blocks:      u64,
        delta:       ResourceBundle,
        last_update: Millis,
    },

    // ── Manual adjustments ─────────────────────────
    BuildingLevelChanged {
        player:   PlayerId,
        building: BuildingKind,
        from:     u32,
        to:       u32,
    },
    ArmyCountChanged {
        player: PlayerId,
        from:   u64,
        to:     u64,
    },
    ResourceAdjusted {
        player:   PlayerId,
        resource: ResourceKind,
        from:     u64,
        to:       u64,
    },
}

impl TrackerEvent {
    /// Stable name of the variant, for log lines.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ClockAdvanced { .. }        => "clock_advanced",
            Self::Paused { .. }               => "paused",
            Self::Resumed { .. }              => "resumed",
            Self::ResourcesAccrued { .. }     => "resources_accrued",
            Self::BuildingLevelChanged { .. } => "building_level_changed",
            Self::ArmyCountChanged { .. }     => "army_count_changed",
            Self::ResourceAdjusted { .. }     => "resource_adjusted",
        }
    }
}
