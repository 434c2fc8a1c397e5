//! Per-player counters: building levels, army and resource stock.
//!
//! RULE: A PlayerState is never mutated in place by callers.
//! Every adjustment produces a new snapshot which the store commits.

use crate::{
    error::TrackerError,
    types::Millis,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

// ── Kinds ──────────────────────────────────────────────────────────

/// Deserialized through `FromStr`, so JSON input accepts the same
/// spellings as the string parser.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum BuildingKind {
    TownHall,
    Farm,
    Lumber,
    AnimalFarm,
    Mine,
    ArmyCamp,
}

impl BuildingKind {
    /// Display order of the detail view.
    pub const ALL: [BuildingKind; 6] = [
        Self::TownHall,
        Self::Farm,
        Self::Lumber,
        Self::AnimalFarm,
        Self::Mine,
        Self::ArmyCamp,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::TownHall   => "town_hall",
            Self::Farm       => "farm",
            Self::Lumber     => "lumber",
            Self::AnimalFarm => "animal_farm",
            Self::Mine       => "mine",
            Self::ArmyCamp   => "army_camp",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TownHall   => "Town Hall",
            Self::Farm       => "Farm",
            Self::Lumber     => "Lumber",
            Self::AnimalFarm => "Animal Farm",
            Self::Mine       => "Mine",
            Self::ArmyCamp   => "Army Camp",
        }
    }

    /// Floor below which the level never drops.
    pub fn min_level(&self) -> u32 {
        match self {
            Self::TownHall => 1,
            _              => 0,
        }
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BuildingKind {
    type Err = TrackerError;

    /// Accepts both the snake_case key and the camelCase spelling
    /// used by browser front-ends (`townHall`, `animalFarm`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "town_hall" | "townHall"     => Ok(Self::TownHall),
            "farm"                       => Ok(Self::Farm),
            "lumber"                     => Ok(Self::Lumber),
            "animal_farm" | "animalFarm" => Ok(Self::AnimalFarm),
            "mine"                       => Ok(Self::Mine),
            "army_camp" | "armyCamp"     => Ok(Self::ArmyCamp),
            other => Err(TrackerError::UnknownBuilding(other.to_string())),
        }
    }
}

impl TryFrom<String> for BuildingKind {
    type Error = TrackerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ResourceKind {
    Food,
    Wood,
    Stone,
    Iron,
    Animal,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        Self::Food,
        Self::Wood,
        Self::Stone,
        Self::Iron,
        Self::Animal,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Food   => "food",
            Self::Wood   => "wood",
            Self::Stone  => "stone",
            Self::Iron   => "iron",
            Self::Animal => "animal",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Food   => "Food",
            Self::Wood   => "Wood",
            Self::Stone  => "Stone",
            Self::Iron   => "Iron",
            Self::Animal => "Animal",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ResourceKind {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food"   => Ok(Self::Food),
            "wood"   => Ok(Self::Wood),
            "stone"  => Ok(Self::Stone),
            "iron"   => Ok(Self::Iron),
            "animal" => Ok(Self::Animal),
            other => Err(TrackerError::UnknownResource(other.to_string())),
        }
    }
}

impl TryFrom<String> for ResourceKind {
    type Error = TrackerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ── Counters ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildingLevels {
    pub town_hall:   u32,
    pub farm:        u32,
    pub lumber:      u32,
    pub animal_farm: u32,
    pub mine:        u32,
    pub army_camp:   u32,
}

impl Default for BuildingLevels {
    fn default() -> Self {
        Self {
            town_hall:   BuildingKind::TownHall.min_level(),
            farm:        0,
            lumber:      0,
            animal_farm: 0,
            mine:        0,
            army_camp:   0,
        }
    }
}

impl BuildingLevels {
    pub fn get(&self, kind: BuildingKind) -> u32 {
        match kind {
            BuildingKind::TownHall   => self.town_hall,
            BuildingKind::Farm       => self.farm,
            BuildingKind::Lumber     => self.lumber,
            BuildingKind::AnimalFarm => self.animal_farm,
            BuildingKind::Mine       => self.mine,
            BuildingKind::ArmyCamp   => self.army_camp,
        }
    }

    fn slot(&mut self, kind: BuildingKind) -> &mut u32 {
        match kind {
            BuildingKind::TownHall   => &mut self.town_hall,
            BuildingKind::Farm       => &mut self.farm,
            BuildingKind::Lumber     => &mut self.lumber,
            BuildingKind::AnimalFarm => &mut self.animal_farm,
            BuildingKind::Mine       => &mut self.mine,
            BuildingKind::ArmyCamp   => &mut self.army_camp,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceBundle {
    pub food:   u64,
    pub wood:   u64,
    pub stone:  u64,
    pub iron:   u64,
    pub animal: u64,
}

impl ResourceBundle {
    pub fn get(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Food   => self.food,
            ResourceKind::Wood   => self.wood,
            ResourceKind::Stone  => self.stone,
            ResourceKind::Iron   => self.iron,
            ResourceKind::Animal => self.animal,
        }
    }

    pub fn slot(&mut self, kind: ResourceKind) -> &mut u64 {
        match kind {
            ResourceKind::Food   => &mut self.food,
            ResourceKind::Wood   => &mut self.wood,
            ResourceKind::Stone  => &mut self.stone,
            ResourceKind::Iron   => &mut self.iron,
            ResourceKind::Animal => &mut self.animal,
        }
    }

    /// Element-wise saturating sum.
    pub fn plus(&self, other: &ResourceBundle) -> ResourceBundle {
        let mut out = *self;
        for kind in ResourceKind::ALL {
            let slot = out.slot(kind);
            *slot = slot.saturating_add(other.get(kind));
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        ResourceKind::ALL.iter().all(|k| self.get(*k) == 0)
    }
}

/// Apply a signed delta to an unsigned counter, clamping at `floor`.
pub(crate) fn clamp_delta_u64(current: u64, delta: i64, floor: u64) -> u64 {
    let raw = if delta >= 0 {
        current.saturating_add(delta as u64)
    } else {
        current.saturating_sub(delta.unsigned_abs())
    };
    raw.max(floor)
}

fn clamp_delta_u32(current: u32, delta: i64, floor: u32) -> u32 {
    let wide = clamp_delta_u64(u64::from(current), delta, u64::from(floor));
    u32::try_from(wide).unwrap_or(u32::MAX)
}

// ── Player snapshot ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerState {
    pub buildings:   BuildingLevels,
    pub army_count:  u64,
    pub resources:   ResourceBundle,
    /// Instant up to which accrual has been fully applied.
    pub last_update: Millis,
}

impl PlayerState {
    /// Fresh player: town hall at 1, everything else at zero.
    pub fn new(now: Millis) -> Self {
        Self {
            buildings:   BuildingLevels::default(),
            army_count:  0,
            resources:   ResourceBundle::default(),
            last_update: now,
        }
    }

    pub fn with_building_delta(&self, kind: BuildingKind, delta: i64) -> Self {
        let mut next = self.clone();
        let slot = next.buildings.slot(kind);
        *slot = clamp_delta_u32(*slot, delta, kind.min_level());
        next
    }

    pub fn with_army_delta(&self, delta: i64) -> Self {
        Self {
            army_count: clamp_delta_u64(self.army_count, delta, 0),
            ..self.clone()
        }
    }

    pub fn with_resource_delta(&self, kind: ResourceKind, delta: i64) -> Self {
        let mut next = self.clone();
        let slot = next.resources.slot(kind);
        *slot = clamp_delta_u64(*slot, delta, 0);
        next
    }

    pub fn can_decrement_building(&self, kind: BuildingKind) -> bool {
        self.buildings.get(kind) > kind.min_level()
    }

    pub fn can_decrement_resource(&self, kind: ResourceKind) -> bool {
        self.resources.get(kind) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_handles_extremes() {
        assert_eq!(clamp_delta_u64(3, -10, 0), 0);
        assert_eq!(clamp_delta_u64(3, i64::MIN, 1), 1);
        assert_eq!(clamp_delta_u64(u64::MAX - 1, 5, 0), u64::MAX);
        assert_eq!(clamp_delta_u32(u32::MAX, 1, 0), u32::MAX);
    }

    #[test]
    fn kinds_parse_both_spellings() {
        assert_eq!("townHall".parse::<BuildingKind>().unwrap(), BuildingKind::TownHall);
        assert_eq!("animal_farm".parse::<BuildingKind>().unwrap(), BuildingKind::AnimalFarm);
        assert!(matches!(
            "barracks".parse::<BuildingKind>(),
            Err(TrackerError::UnknownBuilding(s)) if s == "barracks"
        ));
        assert!(matches!(
            "gold".parse::<ResourceKind>(),
            Err(TrackerError::UnknownResource(_))
        ));
    }
}
