//! Core types and definitions for the MULTIBLASTER simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, session commands, snapshot views, events, and constants.
//! It has no dependency on the engine, storage, or any host runtime.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
