//! Session log files: everything a fresh replica needs to reproduce a session.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use multiblaster_core::commands::TimedEvent;
use multiblaster_core::state::WorldSnapshot;
use multiblaster_core::types::HighscoreTable;
use multiblaster_sim::persistence::{MemoryStore, PersistenceError};
use multiblaster_sim::{SimConfig, SimulationEngine};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to access event log {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("event log is malformed: {0}")]
    Format(#[from] serde_json::Error),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// A recorded session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLog {
    pub seed: u64,
    /// Highscore table the session started from.
    pub highscores: HighscoreTable,
    /// Virtual time the session stopped at.
    pub end_ms: u64,
    /// Every event applied, stamped, in order.
    pub events: Vec<TimedEvent>,
}

impl SessionLog {
    /// An empty log for a session starting from `highscores`.
    pub fn new(seed: u64, highscores: HighscoreTable) -> Self {
        Self {
            seed,
            highscores,
            end_ms: 0,
            events: Vec::new(),
        }
    }
}

pub fn load_log(path: &Path) -> Result<SessionLog, ReplayError> {
    let json = fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}

pub fn save_log(path: &Path, log: &SessionLog) -> Result<(), ReplayError> {
    let io_err = |source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let json = serde_json::to_string_pretty(log)?;
    fs::write(path, json).map_err(io_err)?;
    Ok(())
}

/// Run `log` through a fresh replica and return its state at `end_ms`.
///
/// Highscores are kept in memory, so a replay never touches persisted scores.
pub fn replay(log: SessionLog) -> Result<WorldSnapshot, ReplayError> {
    let events = log.events.len();
    let mut engine = SimulationEngine::with_store(
        SimConfig { seed: log.seed },
        Box::new(MemoryStore::with_table(log.highscores)),
    )?;
    engine.apply_all(log.events);
    engine.run_until(log.end_ms);
    let snapshot = engine.snapshot();
    info!(
        events,
        ticks = snapshot.time.tick,
        ships = snapshot.ships.len(),
        "replay finished"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use multiblaster_core::commands::PlayerInput;
    use multiblaster_core::types::PlayerId;

    use super::*;

    fn sample_log() -> SessionLog {
        let mut highscores = HighscoreTable::new();
        highscores.insert("ZZ".into(), 4);
        SessionLog {
            seed: 3,
            highscores,
            end_ms: 700,
            events: vec![
                TimedEvent::joined(0, PlayerId(1)),
                TimedEvent::joined(10, PlayerId(2)),
                TimedEvent::input(
                    40,
                    PlayerId(2),
                    PlayerInput::SetInitials {
                        initials: "CD".into(),
                    },
                ),
                TimedEvent::input(500, PlayerId(1), PlayerInput::FireBlaster),
            ],
        }
    }

    #[test]
    fn test_save_then_load_log() {
        let path = std::env::temp_dir()
            .join(format!("multiblaster-replay-{}", std::process::id()))
            .join("log.json");
        let log = sample_log();
        save_log(&path, &log).unwrap();
        assert_eq!(load_log(&path).unwrap(), log);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_log_is_io_error() {
        let path = std::env::temp_dir().join("multiblaster-no-such-log.json");
        assert!(matches!(load_log(&path), Err(ReplayError::Io { .. })));
    }

    #[test]
    fn test_replay_runs_to_recorded_end() {
        let snapshot = replay(sample_log()).unwrap();

        assert_eq!(snapshot.time.now_ms, 700);
        assert_eq!(snapshot.time.tick, 15);
        assert_eq!(snapshot.ships.len(), 2);
        assert_eq!(snapshot.projectiles.len(), 1);
        assert_eq!(snapshot.highscores.get("CD"), Some(&0));
        assert_eq!(snapshot.highscores.get("ZZ"), Some(&4));
    }

    #[test]
    fn test_replay_uses_recorded_seed() {
        let a = replay(sample_log()).unwrap();
        let b = replay(SessionLog {
            seed: 4,
            ..sample_log()
        })
        .unwrap();
        assert_ne!(a.ships[0].position, b.ships[0].position);
    }
}
