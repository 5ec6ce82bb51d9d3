//! Highscore ledger: best score per set of initials, shared by the whole session.

use tracing::{debug, warn};

use multiblaster_core::types::HighscoreTable;

use crate::persistence::{HighscoreStore, MemoryStore, PersistenceError};

pub struct Ledger {
    table: HighscoreTable,
    store: Box<dyn HighscoreStore>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }
}

impl Ledger {
    /// Empty ledger writing through to `store`.
    pub fn new(store: Box<dyn HighscoreStore>) -> Self {
        Self {
            table: HighscoreTable::new(),
            store,
        }
    }

    /// Ledger seeded from whatever `store` saved previously.
    pub fn rehydrate(store: Box<dyn HighscoreStore>) -> Result<Self, PersistenceError> {
        let table = store.load()?;
        debug!(entries = table.len(), "highscores rehydrated");
        Ok(Self { table, store })
    }

    pub fn table(&self) -> &HighscoreTable {
        &self.table
    }

    pub fn best(&self, initials: &str) -> Option<u32> {
        self.table.get(initials).copied()
    }

    /// Record `score` for `initials` if it beats the stored best.
    /// Returns whether the table changed.
    pub fn submit(&mut self, initials: &str, score: u32) -> bool {
        if self.best(initials).is_some_and(|best| best >= score) {
            return false;
        }
        self.table.insert(initials.to_owned(), score);
        self.persist();
        true
    }

    /// Drop the entry for `initials`, returning its score.
    pub fn remove(&mut self, initials: &str) -> Option<u32> {
        let removed = self.table.remove(initials);
        if removed.is_some() {
            self.persist();
        }
        removed
    }

    /// Move the entry under `old` to `new`, merged with `score`, in one save.
    /// Returns the new best when the entry under `new` was raised.
    pub fn rename(&mut self, old: &str, new: &str, score: u32) -> Option<u32> {
        let carried = self.table.remove(old);
        let best = score.max(carried.unwrap_or(0));
        let raised = !self.best(new).is_some_and(|held| held >= best);
        if raised {
            self.table.insert(new.to_owned(), best);
        }
        if raised || carried.is_some() {
            self.persist();
        }
        raised.then_some(best)
    }

    fn persist(&mut self) {
        // A failed save must not stall the simulation; the next change retries.
        if let Err(error) = self.store.save(&self.table) {
            warn!(%error, "failed to persist highscores");
        }
    }
}
