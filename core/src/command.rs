use crate::{
    player::{BuildingKind, ResourceKind},
    types::PlayerId,
};
use serde::{Deserialize, Serialize};

/// Every action a front-end can request.
/// Player adjustments carry the target player explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum TrackerCommand {
    // ── Clock control ─────────────────────────────
    Pause,
    Resume,
    TogglePause,
    FastForward,

    // ── Player adjustments ────────────────────────
    AdjustBuilding {
        player:   PlayerId,
        building: BuildingKind,
        delta:    i64,
    },
    AdjustArmy {
        player: PlayerId,
        delta:  i64,
    },
    AdjustResource {
        player:   PlayerId,
        resource: ResourceKind,
        delta:    i64,
    },
}

impl TrackerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pause                 => "pause",
            Self::Resume                => "resume",
            Self::TogglePause           => "toggle_pause",
            Self::FastForward           => "fast_forward",
            Self::AdjustBuilding { .. } => "adjust_building",
            Self::AdjustArmy { .. }     => "adjust_army",
            Self::AdjustResource { .. } => "adjust_resource",
        }
    }
}
