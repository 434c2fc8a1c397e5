//! Read-only views backing the player list and detail screens.

use crate::{
    player::{BuildingKind, ResourceKind},
    projection::Projection,
    store::PlayerRecord,
    types::{Millis, PlayerId},
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlayerSummary {
    pub id:   PlayerId,
    pub name: String,
}

/// One `label: value [+] [-]` row.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CounterView {
    pub key:           &'static str,
    pub label:         &'static str,
    pub value:         u64,
    pub can_decrement: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlayerDetail {
    pub id:         PlayerId,
    pub name:       String,
    pub buildings:  Vec<CounterView>,
    pub army:       CounterView,
    pub resources:  Vec<CounterView>,
    pub projection: Projection,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ClockView {
    pub logical_time: Millis,
    pub paused:       bool,
}

impl PlayerSummary {
    pub fn from_record(record: &PlayerRecord) -> Self {
        Self { id: record.id, name: record.name.clone() }
    }
}

impl PlayerDetail {
    pub fn from_record(record: &PlayerRecord, projection: Projection) -> Self {
        let state = &record.state;
        let buildings = BuildingKind::ALL
            .iter()
            .map(|&kind| CounterView {
                key:           kind.key(),
                label:         kind.label(),
                value:         u64::from(state.buildings.get(kind)),
                can_decrement: state.can_decrement_building(kind),
            })
            .collect();
        let resources = ResourceKind::ALL
            .iter()
            .map(|&kind| CounterView {
                key:           kind.key(),
                label:         kind.label(),
                value:         state.resources.get(kind),
                can_decrement: state.can_decrement_resource(kind),
            })
            .collect();

        Self {
            id: record.id,
            name: record.name.clone(),
            buildings,
            army: CounterView {
                key:           "army",
                label:         "Armies",
                value:         state.army_count,
                can_decrement: state.army_count > 0,
            },
            resources,
            projection,
        }
    }
}
