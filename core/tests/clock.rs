use hamlet_core::clock::{AdvanceSource, GameClock};

const T: i64 = 1_700_000_000_000;

#[test]
fn ticks_advance_while_running() {
    let mut clock = GameClock::new(T);
    assert!(!clock.paused);
    assert_eq!(clock.advance(1_000, AdvanceSource::Tick), Some(T + 1_000));
    assert_eq!(clock.advance(0, AdvanceSource::Tick), Some(T + 1_000));
}

#[test]
fn pause_suppresses_ticks_but_not_fast_forward() {
    let mut clock = GameClock::new(T);
    clock.pause();

    assert_eq!(clock.advance(1_000, AdvanceSource::Tick), None);
    assert_eq!(clock.logical_time, T);

    assert_eq!(clock.advance(900_000, AdvanceSource::FastForward), Some(T + 900_000));
    assert!(clock.paused, "fast-forward must not resume the clock");
}

#[test]
fn toggle_flips_and_reports() {
    let mut clock = GameClock::new(T);
    assert!(clock.toggle_pause());
    assert!(!clock.toggle_pause());
    clock.resume();
    assert!(!clock.paused);
}

#[test]
fn advance_saturates_instead_of_wrapping() {
    let mut clock = GameClock::new(i64::MAX - 5);
    assert_eq!(clock.advance(u64::MAX, AdvanceSource::FastForward), Some(i64::MAX));
}
