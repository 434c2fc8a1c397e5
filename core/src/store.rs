//! Player state store.
//!
//! RULE: Only the store replaces player snapshots.
//! Each operation computes a complete new PlayerState first and then
//! commits it in one assignment, so no reader sees a half-updated player.

use crate::{
    accrual::{apply_accrual, ProductionTable},
    error::{TrackerError, TrackerResult},
    event::TrackerEvent,
    player::{BuildingKind, PlayerState, ResourceKind},
    types::{DurationMs, Millis, PlayerId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerRecord {
    pub id:    PlayerId,
    pub name:  String,
    pub state: PlayerState,
}

#[derive(Debug, Clone)]
pub struct PlayerStore {
    players: Vec<PlayerRecord>,
}

impl PlayerStore {
    /// One fresh player per roster name, all stamped with `now`.
    pub fn new<I, S>(roster: I, now: Millis) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let players = roster
            .into_iter()
            .enumerate()
            .map(|(id, name)| PlayerRecord {
                id,
                name:  name.into(),
                state: PlayerState::new(now),
            })
            .collect();
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn get(&self, id: PlayerId) -> TrackerResult<&PlayerRecord> {
        self.players.get(id).ok_or(TrackerError::UnknownPlayer(id))
    }

    pub fn state(&self, id: PlayerId) -> TrackerResult<&PlayerState> {
        Ok(&self.get(id)?.state)
    }

    fn commit(&mut self, id: PlayerId, next: PlayerState) -> TrackerResult<()> {
        let record = self.players.get_mut(id).ok_or(TrackerError::UnknownPlayer(id))?;
        record.state = next;
        Ok(())
    }

    // ── Manual adjustments ─────────────────────────────────────────

    /// Shift a building level by `delta`, clamped at the building's floor.
    pub fn set_building_level(
        &mut self,
        id:    PlayerId,
        kind:  BuildingKind,
        delta: i64,
    ) -> TrackerResult<(PlayerState, Option<TrackerEvent>)> {
        let current = self.state(id)?;
        let next = current.with_building_delta(kind, delta);
        let (from, to) = (current.buildings.get(kind), next.buildings.get(kind));
        self.commit(id, next.clone())?;

        let event = (from != to).then(|| {
            log::debug!("player={id} {kind}: {from} -> {to}");
            TrackerEvent::BuildingLevelChanged { player: id, building: kind, from, to }
        });
        Ok((next, event))
    }

    /// Shift the army count by `delta`, clamped at zero.
    pub fn set_army_count(
        &mut self,
        id:    PlayerId,
        delta: i64,
    ) -> TrackerResult<(PlayerState, Option<TrackerEvent>)> {
        let current = self.state(id)?;
        let next = current.with_army_delta(delta);
        let (from, to) = (current.army_count, next.army_count);
        self.commit(id, next.clone())?;

        let event = (from != to).then(|| {
            log::debug!("player={id} army: {from} -> {to}");
            TrackerEvent::ArmyCountChanged { player: id, from, to }
        });
        Ok((next, event))
    }

    /// Shift a resource amount by `delta`, clamped at zero.
    pub fn set_resource(
        &mut self,
        id:    PlayerId,
        kind:  ResourceKind,
        delta: i64,
    ) -> TrackerResult<(PlayerState, Option<TrackerEvent>)> {
        let current = self.state(id)?;
        let next = current.with_resource_delta(kind, delta);
        let (from, to) = (current.resources.get(kind), next.resources.get(kind));
        self.commit(id, next.clone())?;

        let event = (from != to).then(|| {
            log::debug!("player={id} {kind}: {from} -> {to}");
            TrackerEvent::ResourceAdjusted { player: id, resource: kind, from, to }
        });
        Ok((next, event))
    }

    // ── Accrual ────────────────────────────────────────────────────

    /// Accrue every player up to `logical_time`.
    ///
    /// All new snapshots are computed before any is committed, so a
    /// precondition failure on one player leaves every player untouched.
    pub fn run_accrual_pass(
        &mut self,
        logical_time:   Millis,
        block_duration: DurationMs,
        table:          &ProductionTable,
    ) -> TrackerResult<Vec<TrackerEvent>> {
        let mut pending = Vec::new();
        for record in &self.players {
            if let Some(accrual) = apply_accrual(&record.state, logical_time, block_duration, table)? {
                pending.push((record.id, accrual));
            }
        }

        let mut events = Vec::with_capacity(pending.len());
        for (id, accrual) in pending {
            log::debug!(
                "player={id} accrued {} block(s): {:?}, last_update={}",
                accrual.blocks,
                accrual.delta,
                accrual.state.last_update
            );
            events.push(TrackerEvent::ResourcesAccrued {
                player:      id,
                blocks:      accrual.blocks,
                delta:       accrual.delta,
                last_update: accrual.state.last_update,
            });
            self.commit(id, accrual.state)?;
        }
        Ok(events)
    }
}
