//! MULTIBLASTER headless host.
//!
//! This crate wires the simulation crates into a runnable replica: config
//! loading, logging, a real-time game loop thread, and event-log replay.

pub mod config;
pub mod game_loop;
pub mod host;
pub mod logging;
pub mod replay;
pub mod state;
