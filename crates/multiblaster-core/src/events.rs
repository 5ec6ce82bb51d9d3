//! Events emitted by the simulation for UI and audio feedback.
//!
//! Collected while ticks and session events are applied, then drained into
//! the next snapshot.

use serde::{Deserialize, Serialize};

use crate::types::PlayerId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A ship was created for a joining player.
    ShipJoined { player_id: PlayerId },
    /// A ship was removed because its player left.
    ShipLeft { player_id: PlayerId },
    /// A ship was destroyed. `shooter` is `None` when the owner already left.
    ShipHit {
        victim: PlayerId,
        shooter: Option<PlayerId>,
        projectile_id: u64,
    },
    /// A wrecked ship came back at a fresh position.
    ShipRespawned { player_id: PlayerId },
    /// A projectile reached the end of its lifetime.
    ProjectileExpired { projectile_id: u64 },
    /// A player claimed new initials.
    InitialsChanged { player_id: PlayerId, initials: String },
    /// The ledger stored a new best score.
    HighscoreChanged { initials: String, score: u32 },
}
