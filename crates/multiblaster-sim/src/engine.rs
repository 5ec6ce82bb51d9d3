//! Simulation engine: the replicated core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, applies the ordered session log,
//! runs the fixed-step systems on a virtual-time scheduler, and produces
//! `WorldSnapshot`s. Completely headless: every replica that applies the same
//! log with the same seed ends up in the same state.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use multiblaster_core::commands::{SessionEvent, TimedEvent};
use multiblaster_core::components::{Body, Ship};
use multiblaster_core::constants::TICK_INTERVAL_MS;
use multiblaster_core::events::SimEvent;
use multiblaster_core::state::WorldSnapshot;
use multiblaster_core::types::{HighscoreTable, PlayerId, SimTime};

use crate::ledger::Ledger;
use crate::persistence::{HighscoreStore, PersistenceError};
use crate::scheduler::{Scheduler, Task};
use crate::store::EntityStore;
use crate::systems;

/// Configuration for starting a new session.
///
/// Steps are always `TICK_INTERVAL_MS` apart; debris and spawn-protection
/// timers are tuned to that interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// RNG seed. Every replica of a session must use the same one.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The simulation engine. Owns the ECS world and all replicated state.
pub struct SimulationEngine {
    store: EntityStore,
    ledger: Ledger,
    scheduler: Scheduler,
    ticks: u64,
    seed: u64,
    rng: ChaCha8Rng,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Fresh session with an in-memory highscore store.
    pub fn new(config: SimConfig) -> Self {
        Self::with_ledger(config, Ledger::default())
    }

    /// Session whose highscores are rehydrated from, and saved to, `store`.
    pub fn with_store(
        config: SimConfig,
        store: Box<dyn HighscoreStore>,
    ) -> Result<Self, PersistenceError> {
        Ok(Self::with_ledger(config, Ledger::rehydrate(store)?))
    }

    fn with_ledger(config: SimConfig, ledger: Ledger) -> Self {
        let mut scheduler = Scheduler::new();
        // The first step runs at session start; each step schedules the next.
        scheduler.schedule_at(0, Task::Advance);
        info!(
            seed = config.seed,
            highscores = ledger.table().len(),
            "session started"
        );
        Self {
            store: EntityStore::new(),
            ledger,
            scheduler,
            ticks: 0,
            seed: config.seed,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Apply one entry of the replicated log.
    ///
    /// Steps due at or before the entry's time run first. An entry stamped
    /// earlier than the current virtual time applies at the current time.
    pub fn apply(&mut self, entry: TimedEvent) {
        if entry.time_ms < self.scheduler.now_ms() {
            debug!(
                time_ms = entry.time_ms,
                now_ms = self.scheduler.now_ms(),
                "event stamped in the past, applying now"
            );
        }
        self.run_until(entry.time_ms);
        self.handle_event(entry.event);
    }

    /// Apply a whole log in order.
    pub fn apply_all(&mut self, entries: impl IntoIterator<Item = TimedEvent>) {
        for entry in entries {
            self.apply(entry);
        }
    }

    /// Run every step due at or before `time_ms`, then move the clock there.
    pub fn run_until(&mut self, time_ms: u64) {
        while let Some(task) = self.scheduler.pop_due(time_ms) {
            self.run_task(task);
        }
        self.scheduler.advance_clock(time_ms);
    }

    /// Run the next scheduled step and return the resulting snapshot.
    pub fn tick(&mut self) -> WorldSnapshot {
        if let Some(task) = self.scheduler.pop_next() {
            self.run_task(task);
        }
        self.snapshot()
    }

    /// Build a snapshot of the current state, draining pending sim events.
    pub fn snapshot(&mut self) -> WorldSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.store, &self.ledger, self.time(), events)
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::Advance => self.advance(),
        }
    }

    /// One fixed step: ships, projectiles, collisions, then reschedule.
    fn advance(&mut self) {
        let now_ms = self.scheduler.now_ms();

        systems::movement::run(
            &mut self.store,
            &mut self.rng,
            now_ms,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        systems::collision::run(&mut self.store, &mut self.ledger, now_ms, &mut self.events);

        self.ticks += 1;
        self.scheduler.schedule_after(TICK_INTERVAL_MS, Task::Advance);
    }

    fn handle_event(&mut self, event: SessionEvent) {
        let now_ms = self.scheduler.now_ms();
        match event {
            SessionEvent::Joined { player_id } => systems::membership::join(
                &mut self.store,
                &mut self.rng,
                player_id,
                now_ms,
                &mut self.events,
            ),
            SessionEvent::Left { player_id } => {
                systems::membership::leave(&mut self.store, player_id, &mut self.events)
            }
            SessionEvent::Input { player_id, input } => systems::input::apply(
                &mut self.store,
                &mut self.ledger,
                player_id,
                input,
                &mut self.events,
            ),
        }
    }

    /// Current virtual time and completed step count.
    pub fn time(&self) -> SimTime {
        SimTime {
            tick: self.ticks,
            now_ms: self.scheduler.now_ms(),
        }
    }

    /// Virtual time of the next scheduled step.
    pub fn next_step_due_ms(&self) -> Option<u64> {
        self.scheduler.next_due_ms()
    }

    /// The seed this session was started with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        self.store.world()
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn highscores(&self) -> &HighscoreTable {
        self.ledger.table()
    }

    /// Copy of a player's ship and body, if they are in the session.
    pub fn ship(&self, player_id: PlayerId) -> Option<(Ship, Body)> {
        let entity = self.store.ship_entity(player_id)?;
        let world = self.store.world();
        let ship = world.get::<&Ship>(entity).ok()?;
        let body = world.get::<&Body>(entity).ok()?;
        Some(((*ship).clone(), *body))
    }

    /// Move a ship to a known place (for scenario tests).
    #[cfg(test)]
    pub fn place_ship(
        &mut self,
        player_id: PlayerId,
        position: glam::DVec2,
        velocity: glam::DVec2,
        heading: f64,
    ) {
        let Some(entity) = self.store.ship_entity(player_id) else {
            return;
        };
        if let Ok((ship, body)) = self
            .store
            .world_mut()
            .query_one_mut::<(&mut Ship, &mut Body)>(entity)
        {
            ship.heading = heading;
            body.position = position;
            body.velocity = velocity;
        }
    }

    /// Edit a ship in place (for scenario tests).
    #[cfg(test)]
    pub fn edit_ship(&mut self, player_id: PlayerId, edit: impl FnOnce(&mut Ship)) {
        let Some(entity) = self.store.ship_entity(player_id) else {
            return;
        };
        if let Ok(mut ship) = self.store.world().get::<&mut Ship>(entity) {
            edit(&mut *ship);
        }
    }

    /// Launch a projectile with an exact position and velocity (for scenario tests).
    #[cfg(test)]
    pub fn spawn_test_projectile(
        &mut self,
        owner: PlayerId,
        position: glam::DVec2,
        velocity: glam::DVec2,
    ) -> u64 {
        self.store
            .spawn_projectile(owner, Body { position, velocity })
    }
}
