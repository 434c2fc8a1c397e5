//! Real-time ticker: a background thread that posts a message on a
//! channel at a fixed interval.
//!
//! RULE: The ticker never touches tracker state. It only sends messages;
//! the receiving control loop owns all mutation. Stopping joins the
//! thread, so nothing fires after `stop()` returns.

use std::{
    sync::mpsc::{self, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

pub struct Ticker {
    stop_tx: Option<Sender<()>>,
    handle:  Option<JoinHandle<()>>,
}

impl Ticker {
    /// Start posting `message` on `tx` every `interval`. The first
    /// message is sent one full interval after spawning.
    pub fn spawn<M>(interval: Duration, tx: Sender<M>, message: M) -> Self
    where
        M: Clone + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    if tx.send(message.clone()).is_err() {
                        log::debug!("ticker receiver gone, stopping");
                        break;
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        log::debug!("ticker started: every {interval:?}");
        Self { stop_tx: Some(stop_tx), handle: Some(handle) }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Signal the thread and wait for it to exit. Idempotent.
    pub fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            // The thread may already have exited on its own.
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("ticker thread panicked");
            }
            log::debug!("ticker stopped");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
