//! Core of the hamlet resource tracker: a pausable logical clock that
//! grants building production in whole 15-minute blocks, a per-player
//! counter store, and the countdown shown to players.

pub mod accrual;
pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod player;
pub mod projection;
pub mod store;
pub mod ticker;
pub mod types;
pub mod view;
