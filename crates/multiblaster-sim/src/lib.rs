//! Simulation engine for MULTIBLASTER.
//!
//! Owns the hecs ECS world, advances it on a virtual-time scheduler,
//! applies the replicated session log, and produces `WorldSnapshot`s.

pub mod engine;
pub mod ledger;
pub mod motion;
pub mod persistence;
pub mod scheduler;
pub mod store;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
