//! Durable highscore storage.
//!
//! The ledger hands the whole table to a `HighscoreStore` on every change and
//! reads it back once when a session is rehydrated.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use multiblaster_core::types::HighscoreTable;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("highscore storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("highscore file is malformed: {0}")]
    Format(#[from] serde_json::Error),
    #[error("in-memory highscore store lock was poisoned")]
    Poisoned,
}

/// Where the highscore table survives between sessions.
pub trait HighscoreStore: Send {
    fn load(&self) -> Result<HighscoreTable, PersistenceError>;
    fn save(&mut self, table: &HighscoreTable) -> Result<(), PersistenceError>;
}

/// On-disk layout of a saved session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(default)]
    pub highscores: HighscoreTable,
}

#[derive(Debug, Default)]
struct MemoryInner {
    table: HighscoreTable,
    saves: usize,
}

/// Shared in-memory store. Clones see the same table, so a test can keep one
/// handle while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `table`, as if a previous session saved it.
    pub fn with_table(table: HighscoreTable) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryInner { table, saves: 0 })),
        }
    }

    /// Number of successful saves so far.
    pub fn saves(&self) -> usize {
        self.inner.lock().map(|inner| inner.saves).unwrap_or_default()
    }

    /// Last table saved (or the seeded one).
    pub fn table(&self) -> HighscoreTable {
        self.inner
            .lock()
            .map(|inner| inner.table.clone())
            .unwrap_or_default()
    }
}

impl HighscoreStore for MemoryStore {
    fn load(&self) -> Result<HighscoreTable, PersistenceError> {
        let inner = self.inner.lock().map_err(|_| PersistenceError::Poisoned)?;
        Ok(inner.table.clone())
    }

    fn save(&mut self, table: &HighscoreTable) -> Result<(), PersistenceError> {
        let mut inner = self.inner.lock().map_err(|_| PersistenceError::Poisoned)?;
        inner.table = table.clone();
        inner.saves += 1;
        Ok(())
    }
}

/// Pretty-printed JSON file holding a `PersistedSession`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighscoreStore for JsonFileStore {
    /// A missing file is a fresh session, not an error.
    fn load(&self) -> Result<HighscoreTable, PersistenceError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HighscoreTable::new()),
            Err(e) => return Err(e.into()),
        };
        let session: PersistedSession = serde_json::from_str(&json)?;
        Ok(session.highscores)
    }

    fn save(&mut self, table: &HighscoreTable) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let session = PersistedSession {
            highscores: table.clone(),
        };
        let json = serde_json::to_string_pretty(&session)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
