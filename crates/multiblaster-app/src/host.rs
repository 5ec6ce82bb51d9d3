//! Host front: starts the replica, forwards local session events, exposes snapshots.
//!
//! These functions bridge callers to the game loop thread via channels.

use thiserror::Error;
use tracing::info;

use multiblaster_core::commands::SessionEvent;
use multiblaster_core::state::WorldSnapshot;
use multiblaster_sim::persistence::PersistenceError;
use multiblaster_sim::SimulationEngine;

use crate::config::HostConfig;
use crate::game_loop;
use crate::replay::{self, ReplayError};
use crate::state::{GameLoopCommand, HostState, SessionRecord};

#[derive(Debug, Error)]
pub enum HostError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop has stopped")]
    Disconnected,
    #[error("host state lock was poisoned")]
    Poisoned,
    #[error("game loop thread panicked")]
    LoopPanicked,
    #[error("failed to spawn game loop: {0}")]
    Spawn(#[from] std::io::Error),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
}

/// Rehydrate highscores and spawn the game loop. Fails if already running.
pub fn start(state: &HostState, config: &HostConfig) -> Result<(), HostError> {
    let mut tx_lock = state.command_tx.lock().map_err(|_| HostError::Poisoned)?;
    if tx_lock.is_some() {
        return Err(HostError::AlreadyRunning);
    }

    let engine = SimulationEngine::with_store(config.sim_config(), config.highscore_store())?;
    let (cmd_tx, handle) = game_loop::spawn_game_loop(engine, state.latest_snapshot.clone())?;

    *tx_lock = Some(cmd_tx);
    *state.loop_handle.lock().map_err(|_| HostError::Poisoned)? = Some(handle);
    info!(seed = config.seed, "host started");
    Ok(())
}

/// Forward one local session event to the running replica.
pub fn send(state: &HostState, event: SessionEvent) -> Result<(), HostError> {
    let tx_lock = state.command_tx.lock().map_err(|_| HostError::Poisoned)?;
    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::Session(event))
            .map_err(|_| HostError::Disconnected),
        None => Err(HostError::NotStarted),
    }
}

/// Latest published snapshot, if the loop has ticked yet.
pub fn snapshot(state: &HostState) -> Result<Option<WorldSnapshot>, HostError> {
    let lock = state.latest_snapshot.lock().map_err(|_| HostError::Poisoned)?;
    Ok(lock.clone())
}

/// Stop the loop, wait for it, and write the session log if one is configured.
pub fn stop(state: &HostState, config: &HostConfig) -> Result<SessionRecord, HostError> {
    let tx = state
        .command_tx
        .lock()
        .map_err(|_| HostError::Poisoned)?
        .take()
        .ok_or(HostError::NotStarted)?;
    // A send error means the loop already exited; joining still collects its record.
    let _ = tx.send(GameLoopCommand::Shutdown);

    let handle = state
        .loop_handle
        .lock()
        .map_err(|_| HostError::Poisoned)?
        .take()
        .ok_or(HostError::NotStarted)?;
    let record = handle.join().map_err(|_| HostError::LoopPanicked)?;

    if let Some(path) = &config.event_log_path {
        replay::save_log(path, &record.log)?;
        info!(
            path = %path.display(),
            events = record.log.events.len(),
            end_ms = record.log.end_ms,
            "session log written"
        );
    }
    Ok(record)
}
