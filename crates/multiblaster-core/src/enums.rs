//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Whether a ship is flying or drifting as wreckage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitState {
    /// Normal flight: accepts thruster and fire input.
    #[default]
    Alive,
    /// Wreckage after a hit. Holds ticks since the hit (1..=DEBRIS_TICKS).
    Debris(u32),
}

impl HitState {
    pub fn is_debris(&self) -> bool {
        matches!(self, HitState::Debris(_))
    }
}
