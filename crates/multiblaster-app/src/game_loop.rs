//! Game loop thread: drives one replica in real time and publishes snapshots.
//!
//! Acts as a loopback replicator: local session events are stamped with the
//! engine's current virtual time, appended to the session log, and applied.
//! The log also carries the seed, the starting highscores and the stop time.
//! The engine is moved into the thread, which then owns it. Commands arrive
//! via `mpsc` channel; the latest snapshot is kept in shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use multiblaster_core::commands::TimedEvent;
use multiblaster_core::constants::TICK_INTERVAL_MS;
use multiblaster_core::state::WorldSnapshot;
use multiblaster_sim::SimulationEngine;

use crate::replay::SessionLog;
use crate::state::{GameLoopCommand, SessionRecord};

/// Spawn the game loop in a new thread.
///
/// Returns the command sender and the handle that yields the session record on shutdown.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    latest_snapshot: Arc<Mutex<Option<WorldSnapshot>>>,
) -> std::io::Result<(
    mpsc::Sender<GameLoopCommand>,
    std::thread::JoinHandle<SessionRecord>,
)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("multiblaster-game-loop".into())
        .spawn(move || run_game_loop(engine, cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<WorldSnapshot>>,
) -> SessionRecord {
    let tick_duration = Duration::from_millis(TICK_INTERVAL_MS);
    let mut log = SessionLog::new(engine.seed(), engine.highscores().clone());
    let mut next_tick_time = Instant::now();
    info!(?tick_duration, "game loop started");

    loop {
        // 1. Drain pending commands, stamping each with the current virtual time
        let mut shutdown = false;
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Session(event)) => {
                    let entry = TimedEvent::new(engine.time().now_ms, event);
                    log.events.push(entry.clone());
                    engine.apply(entry);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    shutdown = true;
                    break;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }
        if shutdown {
            // Only pending at t=0, when shutdown beats the first step.
            engine.run_until(engine.time().now_ms);
            let final_snapshot = engine.snapshot();
            log.end_ms = final_snapshot.time.now_ms;
            info!(
                ticks = final_snapshot.time.tick,
                events = log.events.len(),
                end_ms = log.end_ms,
                "game loop stopped"
            );
            return SessionRecord {
                log,
                final_snapshot,
            };
        }

        // 2. Run the next scheduled step
        let snapshot = engine.tick();

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            debug!(behind = ?(now - next_tick_time), "game loop fell behind");
            next_tick_time = now;
        }
    }
}
