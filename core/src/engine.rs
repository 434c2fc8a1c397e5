//! The tracker engine: single root object owning all mutable state.
//!
//! EXECUTION ORDER per advance (fixed):
//!   1. Clock advance (tick or fast-forward)
//!   2. Accrual pass over every player
//!   3. Projection is recomputed on demand by readers
//!
//! RULES:
//!   - All mutation goes through `&mut Tracker`; callers serialize access.
//!   - Ticks are suppressed while paused. Fast-forward never is.
//!   - Projections never mutate anything.

use crate::{
    clock::{AdvanceSource, GameClock},
    command::TrackerCommand,
    config::TrackerConfig,
    error::TrackerResult,
    event::TrackerEvent,
    player::{BuildingKind, PlayerState, ResourceKind},
    projection::{project, Projection},
    store::PlayerStore,
    types::{DurationMs, Millis, PlayerId},
    view::{ClockView, PlayerDetail, PlayerSummary},
};

/// The player whose timestamp drives the shared countdown.
pub const REFERENCE_PLAYER: PlayerId = 0;

pub struct Tracker {
    config: TrackerConfig,
    clock:  GameClock,
    store:  PlayerStore,
}

impl Tracker {
    /// Build a tracker whose clock and every player start at `start`.
    pub fn new(config: TrackerConfig, start: Millis) -> TrackerResult<Self> {
        config.validate()?;
        let store = PlayerStore::new(config.roster.iter().cloned(), start);
        log::info!(
            "Tracker started: {} players, block={}ms, t={start}",
            store.len(),
            config.block_duration_ms
        );
        Ok(Self {
            clock: GameClock::new(start),
            store,
            config,
        })
    }

    /// Build a tracker seeded from the wall clock.
    pub fn start_now(config: TrackerConfig) -> TrackerResult<Self> {
        Self::new(config, chrono::Utc::now().timestamp_millis())
    }

    pub fn config(&self) -> &TrackerConfig { &self.config }
    pub fn clock(&self) -> &GameClock { &self.clock }
    pub fn store(&self) -> &PlayerStore { &self.store }

    pub fn logical_time(&self) -> Millis { self.clock.logical_time }
    pub fn is_paused(&self) -> bool { self.clock.paused }

    pub fn player(&self, id: PlayerId) -> TrackerResult<&PlayerState> {
        self.store.state(id)
    }

    // ── Clock ──────────────────────────────────────────────────────

    /// Real-time tick. A no-op returning no events while paused.
    pub fn tick(&mut self) -> TrackerResult<Vec<TrackerEvent>> {
        self.advance(self.config.tick_interval_ms, AdvanceSource::Tick)
    }

    /// Manual jump by the configured fast-forward span, paused or not.
    pub fn fast_forward(&mut self) -> TrackerResult<Vec<TrackerEvent>> {
        let delta = self.config.fast_forward_ms();
        log::info!("Fast-forward {delta}ms");
        self.advance(delta, AdvanceSource::FastForward)
    }

    /// Advance the clock then accrue every player.
    pub fn advance(
        &mut self,
        delta:  DurationMs,
        source: AdvanceSource,
    ) -> TrackerResult<Vec<TrackerEvent>> {
        let Some(logical_time) = self.clock.advance(delta, source) else {
            log::trace!("{source:?} suppressed: clock paused");
            return Ok(vec![]);
        };

        let mut events = vec![TrackerEvent::ClockAdvanced {
            source,
            delta_ms: delta,
            logical_time,
        }];
        let accrued = self.store.run_accrual_pass(
            logical_time,
            self.config.block_duration_ms,
            &self.config.production,
        )?;
        if accrued.is_empty() {
            log::trace!("t={logical_time}: no block boundary crossed");
        }
        events.extend(accrued);
        log::trace!(
            "t={logical_time}: {}",
            events.iter().map(TrackerEvent::type_name).collect::<Vec<_>>().join(", ")
        );
        Ok(events)
    }

    pub fn pause(&mut self) -> Vec<TrackerEvent> {
        if self.clock.paused {
            return vec![];
        }
        self.clock.pause();
        log::info!("Clock paused at t={}", self.clock.logical_time);
        vec![TrackerEvent::Paused { logical_time: self.clock.logical_time }]
    }

    pub fn resume(&mut self) -> Vec<TrackerEvent> {
        if !self.clock.paused {
            return vec![];
        }
        self.clock.resume();
        log::info!("Clock resumed at t={}", self.clock.logical_time);
        vec![TrackerEvent::Resumed { logical_time: self.clock.logical_time }]
    }

    pub fn toggle_pause(&mut self) -> Vec<TrackerEvent> {
        let paused = self.clock.toggle_pause();
        let logical_time = self.clock.logical_time;
        if paused {
            log::info!("Clock paused at t={logical_time}");
            vec![TrackerEvent::Paused { logical_time }]
        } else {
            log::info!("Clock resumed at t={logical_time}");
            vec![TrackerEvent::Resumed { logical_time }]
        }
    }

    // ── Player adjustments ─────────────────────────────────────────

    pub fn adjust_building(
        &mut self,
        id:    PlayerId,
        kind:  BuildingKind,
        delta: i64,
    ) -> TrackerResult<Vec<TrackerEvent>> {
        let (_, event) = self.store.set_building_level(id, kind, delta)?;
        Ok(event.into_iter().collect())
    }

    pub fn adjust_army(&mut self, id: PlayerId, delta: i64) -> TrackerResult<Vec<TrackerEvent>> {
        let (_, event) = self.store.set_army_count(id, delta)?;
        Ok(event.into_iter().collect())
    }

    pub fn adjust_resource(
        &mut self,
        id:    PlayerId,
        kind:  ResourceKind,
        delta: i64,
    ) -> TrackerResult<Vec<TrackerEvent>> {
        let (_, event) = self.store.set_resource(id, kind, delta)?;
        Ok(event.into_iter().collect())
    }

    /// Apply one front-end command.
    pub fn dispatch(&mut self, command: TrackerCommand) -> TrackerResult<Vec<TrackerEvent>> {
        log::debug!("dispatch {}", command.name());
        match command {
            TrackerCommand::Pause       => Ok(self.pause()),
            TrackerCommand::Resume      => Ok(self.resume()),
            TrackerCommand::TogglePause => Ok(self.toggle_pause()),
            TrackerCommand::FastForward => self.fast_forward(),
            TrackerCommand::AdjustBuilding { player, building, delta } => {
                self.adjust_building(player, building, delta)
            }
            TrackerCommand::AdjustArmy { player, delta } => self.adjust_army(player, delta),
            TrackerCommand::AdjustResource { player, resource, delta } => {
                self.adjust_resource(player, resource, delta)
            }
        }
    }

    // ── Read-only views ────────────────────────────────────────────

    /// Shared countdown, driven by the reference player's timestamp.
    pub fn projection(&self) -> TrackerResult<Projection> {
        self.projection_for(REFERENCE_PLAYER)
    }

    /// Countdown computed from one player's own timestamp.
    pub fn projection_for(&self, id: PlayerId) -> TrackerResult<Projection> {
        let state = self.store.state(id)?;
        project(self.clock.logical_time, state.last_update, self.config.block_duration_ms)
    }

    pub fn listing(&self) -> Vec<PlayerSummary> {
        self.store.players().iter().map(PlayerSummary::from_record).collect()
    }

    /// Detail screen for one player. Carries the shared countdown,
    /// matching what every detail screen displays.
    pub fn detail(&self, id: PlayerId) -> TrackerResult<PlayerDetail> {
        let record = self.store.get(id)?;
        Ok(PlayerDetail::from_record(record, self.projection()?))
    }

    pub fn clock_view(&self) -> ClockView {
        ClockView {
            logical_time: self.clock.logical_time,
            paused:       self.clock.paused,
        }
    }
}
