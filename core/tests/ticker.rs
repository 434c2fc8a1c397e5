//! Ticker tests: pulses arrive, and nothing survives stop().

use hamlet_core::ticker::Ticker;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

#[test]
fn ticker_pulses_until_stopped() {
    let (tx, rx) = mpsc::channel();
    let mut ticker = Ticker::spawn(Duration::from_millis(5), tx, 7u32);

    for _ in 0..3 {
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(7));
    }

    ticker.stop();
    assert!(!ticker.is_running());

    // Drain anything sent before the stop, then the channel must be closed.
    while rx.try_recv().is_ok() {}
    assert_eq!(
        rx.recv_timeout(Duration::from_millis(50)),
        Err(RecvTimeoutError::Disconnected)
    );
}

#[test]
fn stop_is_idempotent() {
    let (tx, _rx) = mpsc::channel();
    let mut ticker = Ticker::spawn(Duration::from_secs(60), tx, ());
    ticker.stop();
    ticker.stop();
    assert!(!ticker.is_running());
}

#[test]
fn dropping_the_ticker_stops_it() {
    let (tx, rx) = mpsc::channel();
    let ticker = Ticker::spawn(Duration::from_secs(60), tx, ());
    drop(ticker);

    assert_eq!(
        rx.recv_timeout(Duration::from_secs(5)),
        Err(RecvTimeoutError::Disconnected)
    );
}
