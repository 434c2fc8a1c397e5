//! hamlet-runner: headless driver and JSON-lines front-end bridge for the
//! hamlet resource tracker.
//!
//! Usage:
//!   hamlet-runner --seconds 3600 --fast-forwards 4
//!   hamlet-runner --config data/tracker.json --ipc-mode

use anyhow::{Context, Result};
use hamlet_core::{
    command::TrackerCommand,
    config::TrackerConfig,
    engine::Tracker,
    error::TrackerResult,
    event::TrackerEvent,
    player::ResourceKind,
    projection::Projection,
    ticker::Ticker,
    types::PlayerId,
    view::{ClockView, PlayerDetail, PlayerSummary},
};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    List,
    Detail { player: PlayerId },
    GetState,
    Command { command: TrackerCommand },
    Quit,
}

#[derive(serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcResponse {
    List { players: Vec<PlayerSummary> },
    Detail { detail: PlayerDetail },
    State { clock: ClockView, projection: Projection },
    Applied { clock: ClockView, projection: Projection, events: Vec<TrackerEvent> },
    Tick { clock: ClockView, projection: Projection, events: Vec<TrackerEvent> },
}

/// Everything the control loop reacts to, from either source.
#[derive(Clone)]
enum ControlMessage {
    Tick,
    Line(String),
    Eof,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seconds = parse_arg(&args, "--seconds", 0u64);
    let fast_forwards = parse_arg(&args, "--fast-forwards", 0u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());

    let config = match config_path {
        Some(path) => TrackerConfig::load(path)
            .with_context(|| format!("loading config from {path}"))?,
        None => TrackerConfig::default(),
    };

    if !ipc_mode {
        println!("hamlet-runner");
        println!("  players:        {}", config.roster.len());
        println!("  block:          {}ms", config.block_duration_ms);
        println!("  seconds:        {seconds}");
        println!("  fast-forwards:  {fast_forwards}");
        println!();
    }

    let mut tracker = Tracker::start_now(config)?;

    if ipc_mode {
        run_ipc_loop(&mut tracker)?;
    } else {
        for _ in 0..seconds {
            tracker.tick()?;
        }
        for _ in 0..fast_forwards {
            tracker.fast_forward()?;
        }
        print_summary(&tracker)?;
    }

    Ok(())
}

/// Single control loop: stdin lines and ticker pulses arrive on one
/// channel, so every advance and accrual pass runs to completion before
/// the next message is looked at.
fn run_ipc_loop(tracker: &mut Tracker) -> Result<()> {
    let (tx, rx) = mpsc::channel::<ControlMessage>();
    let interval = Duration::from_millis(tracker.config().tick_interval_ms);

    let stdin_tx = tx.clone();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if stdin_tx.send(ControlMessage::Line(line)).is_err() {
                return;
            }
        }
        let _ = stdin_tx.send(ControlMessage::Eof);
    });

    let mut ticker: Option<Ticker> = None;
    sync_ticker(tracker, &mut ticker, &tx, interval);

    let mut stdout = io::stdout();
    while let Ok(message) = rx.recv() {
        match message {
            ControlMessage::Eof => break,
            ControlMessage::Tick => {
                let events = tracker.tick()?;
                let response = IpcResponse::Tick {
                    clock:      tracker.clock_view(),
                    projection: tracker.projection()?,
                    events,
                };
                writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
            }
            ControlMessage::Line(line) => {
                if !process_line(tracker, &line, &mut stdout)? {
                    break;
                }
                sync_ticker(tracker, &mut ticker, &tx, interval);
            }
        }
        stdout.flush()?;
    }

    if let Some(mut t) = ticker.take() {
        t.stop();
    }
    Ok(())
}

/// Answer one request line on `out`. Returns `false` once the front-end
/// asked to quit. Bad JSON and precondition violations are answered with
/// `{"error": ...}` and the loop keeps going.
fn process_line(tracker: &mut Tracker, line: &str, out: &mut impl Write) -> Result<bool> {
    if line.trim().is_empty() {
        return Ok(true);
    }
    let request: IpcRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            log::warn!("Rejected request: {e}");
            write_error(out, &e.to_string())?;
            return Ok(true);
        }
    };
    match handle_request(tracker, request) {
        Ok(None) => return Ok(false),
        Ok(Some(response)) => {
            writeln!(out, "{}", serde_json::to_string(&response)?)?;
        }
        Err(e) if e.is_precondition_violation() => {
            log::warn!("Rejected command: {e}");
            write_error(out, &e.to_string())?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(true)
}

/// Returns `None` when the front-end asked to quit.
fn handle_request(
    tracker: &mut Tracker,
    request: IpcRequest,
) -> TrackerResult<Option<IpcResponse>> {
    Ok(Some(match request {
        IpcRequest::List => IpcResponse::List { players: tracker.listing() },
        IpcRequest::Detail { player } => IpcResponse::Detail { detail: tracker.detail(player)? },
        IpcRequest::GetState => IpcResponse::State {
            clock:      tracker.clock_view(),
            projection: tracker.projection()?,
        },
        IpcRequest::Command { command } => {
            let events = tracker.dispatch(command)?;
            IpcResponse::Applied {
                clock:      tracker.clock_view(),
                projection: tracker.projection()?,
                events,
            }
        }
        IpcRequest::Quit => return Ok(None),
    }))
}

/// Keep exactly one ticker alive while running, none while paused.
fn sync_ticker(
    tracker:  &Tracker,
    ticker:   &mut Option<Ticker>,
    tx:       &Sender<ControlMessage>,
    interval: Duration,
) {
    match (tracker.is_paused(), ticker.is_some()) {
        (true, true) => {
            if let Some(mut t) = ticker.take() {
                t.stop();
            }
        }
        (false, false) => {
            *ticker = Some(Ticker::spawn(interval, tx.clone(), ControlMessage::Tick));
        }
        _ => {}
    }
}

fn write_error(out: &mut impl Write, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{}", err_json)?;
    Ok(())
}

fn print_summary(tracker: &Tracker) -> Result<()> {
    let projection = tracker.projection()?;

    println!("=== RUN SUMMARY ===");
    println!("  logical time:   {}", tracker.logical_time());
    println!(
        "  logical clock:  {}",
        chrono::DateTime::from_timestamp_millis(tracker.logical_time())
            .map(|t| t.to_rfc3339())
            .unwrap_or_default()
    );
    println!("  next resources: {}", projection.countdown_label);
    println!("  progress:       {:.1}%", projection.progress_percent);

    println!();
    println!("=== PLAYERS ===");
    for record in tracker.store().players() {
        let state = &record.state;
        let resources: Vec<String> = ResourceKind::ALL
            .iter()
            .map(|k| format!("{}={}", k.key(), state.resources.get(*k)))
            .collect();
        println!(
            "  {:<8} | TH {} | army {} | {}",
            record.name,
            state.buildings.town_hall,
            state.army_count,
            resources.join(" ")
        );
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
