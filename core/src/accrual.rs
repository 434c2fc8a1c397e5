//! Block accrual: converts elapsed logical time into resources.
//!
//! RULES:
//!   - Only whole blocks are granted. The sub-block remainder stays
//!     between `last_update` and the logical time for the next pass.
//!   - `last_update` advances by exactly `blocks * block_duration`,
//!     never snapped to the logical time.
//!   - Accruing k1 blocks then k2 blocks equals accruing k1 + k2 at once.

use crate::{
    error::{TrackerError, TrackerResult},
    player::{BuildingKind, BuildingLevels, PlayerState, ResourceBundle, ResourceKind},
    types::{DurationMs, Millis},
};
use serde::{Deserialize, Serialize};

/// How a building level turns into a per-block amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rate {
    /// `level * multiplier` per block.
    PerLevel { multiplier: u64 },
    /// Flat `amount` per block once the level reaches `min_level`.
    Threshold { min_level: u32, amount: u64 },
}

impl Rate {
    fn per_block(&self, level: u32) -> u64 {
        match *self {
            Rate::PerLevel { multiplier } => u64::from(level).saturating_mul(multiplier),
            Rate::Threshold { min_level, amount } => {
                if level >= min_level { amount } else { 0 }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductionRule {
    pub resource: ResourceKind,
    pub building: BuildingKind,
    #[serde(flatten)]
    pub rate:     Rate,
}

/// The production-rate table. Rules for the same resource add up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ProductionTable {
    pub rules: Vec<ProductionRule>,
}

impl Default for ProductionTable {
    fn default() -> Self {
        use BuildingKind as B;
        use ResourceKind as R;
        let per_level = |resource, building| ProductionRule {
            resource,
            building,
            rate: Rate::PerLevel { multiplier: 1 },
        };
        Self {
            rules: vec![
                per_level(R::Food, B::Farm),
                per_level(R::Wood, B::Lumber),
                per_level(R::Stone, B::Mine),
                ProductionRule {
                    resource: R::Iron,
                    building: B::Mine,
                    rate:     Rate::Threshold { min_level: 2, amount: 1 },
                },
                per_level(R::Animal, B::AnimalFarm),
            ],
        }
    }
}

impl ProductionTable {
    /// Resources granted for one block at the given building levels.
    pub fn per_block(&self, buildings: &BuildingLevels) -> ResourceBundle {
        let mut out = ResourceBundle::default();
        for rule in &self.rules {
            let slot = out.slot(rule.resource);
            *slot = slot.saturating_add(rule.rate.per_block(buildings.get(rule.building)));
        }
        out
    }

    /// Resources granted for `blocks` consecutive blocks.
    pub fn for_blocks(&self, buildings: &BuildingLevels, blocks: u64) -> ResourceBundle {
        let one = self.per_block(buildings);
        let mut out = ResourceBundle::default();
        for kind in ResourceKind::ALL {
            *out.slot(kind) = one.get(kind).saturating_mul(blocks);
        }
        out
    }
}

/// Result of one accrual computation for one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accrual {
    pub blocks: u64,
    pub delta:  ResourceBundle,
    pub state:  PlayerState,
}

/// Whole blocks elapsed between `last_update` and `logical_time`.
pub fn elapsed_blocks(
    last_update:    Millis,
    logical_time:   Millis,
    block_duration: DurationMs,
) -> TrackerResult<u64> {
    if block_duration == 0 {
        return Err(TrackerError::InvalidConfig("block duration must be positive".into()));
    }
    if logical_time < last_update {
        return Err(TrackerError::NegativeElapsed { last_update, logical_time });
    }
    let elapsed = logical_time.abs_diff(last_update);
    Ok(elapsed / block_duration)
}

/// Compute the player's state after accruing every whole block up to
/// `logical_time`. Returns `None` when less than one block has elapsed.
/// A logical time before `last_update` is a caller bug.
pub fn apply_accrual(
    player:         &PlayerState,
    logical_time:   Millis,
    block_duration: DurationMs,
    table:          &ProductionTable,
) -> TrackerResult<Option<Accrual>> {
    let blocks = elapsed_blocks(player.last_update, logical_time, block_duration)?;
    if blocks < 1 {
        return Ok(None);
    }

    let delta = table.for_blocks(&player.buildings, blocks);
    let consumed = blocks
        .checked_mul(block_duration)
        .and_then(|ms| Millis::try_from(ms).ok())
        .ok_or_else(|| anyhow::anyhow!("accrual span of {blocks} blocks overflows timestamp"))?;

    let state = PlayerState {
        resources:   player.resources.plus(&delta),
        last_update: player.last_update + consumed,
        ..player.clone()
    };

    Ok(Some(Accrual { blocks, delta, state }))
}
