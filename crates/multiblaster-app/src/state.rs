//! Host state shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use multiblaster_core::commands::SessionEvent;
use multiblaster_core::state::WorldSnapshot;

use crate::replay::SessionLog;

/// Commands sent from the host front to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A local session event, stamped with virtual time by the loop.
    Session(SessionEvent),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// What the loop hands back when it stops.
#[derive(Debug)]
pub struct SessionRecord {
    /// Replaying this reproduces `final_snapshot`.
    pub log: SessionLog,
    pub final_snapshot: WorldSnapshot,
}

/// Shared host state.
///
/// - `mpsc::Sender` is wrapped in `Mutex` (Sender is Send but not Sync)
/// - `Mutex<Option<...>>` for parts that only exist once the loop is started
/// - `Arc<Mutex<...>>` for the latest snapshot (shared with the loop thread)
pub struct HostState {
    /// `None` before `host::start`.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<WorldSnapshot>>>,
    pub loop_handle: Mutex<Option<JoinHandle<SessionRecord>>>,
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_handle: Mutex::new(None),
        }
    }
}

impl HostState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.command_tx
            .lock()
            .map(|tx| tx.is_some())
            .unwrap_or(false)
    }
}
