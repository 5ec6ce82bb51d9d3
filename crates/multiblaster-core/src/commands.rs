//! Session events delivered by the replication layer.
//!
//! Every replica receives the same `TimedEvent`s in the same order and
//! applies each one immediately; nothing is deferred to a tick boundary.

use serde::{Deserialize, Serialize};

use crate::components::ClientMetrics;
use crate::types::PlayerId;

/// Input published by a single player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerInput {
    /// Hold or release the counter-clockwise turn thruster.
    LeftThruster { active: bool },
    /// Hold or release the clockwise turn thruster.
    RightThruster { active: bool },
    /// Hold or release the main engine.
    ForwardThruster { active: bool },
    /// Fire one projectile along the current heading.
    FireBlaster,
    /// Claim initials for the highscore ledger.
    SetInitials { initials: String },
    /// Report client performance figures.
    SendMetrics { metrics: ClientMetrics },
}

/// One entry of the globally-ordered session log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A participant connected.
    Joined { player_id: PlayerId },
    /// A participant disconnected.
    Left { player_id: PlayerId },
    /// A participant's input.
    Input {
        player_id: PlayerId,
        input: PlayerInput,
    },
}

/// A session event stamped with the virtual time at which replicas apply it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub time_ms: u64,
    pub event: SessionEvent,
}

impl TimedEvent {
    pub fn new(time_ms: u64, event: SessionEvent) -> Self {
        Self { time_ms, event }
    }

    pub fn joined(time_ms: u64, player_id: PlayerId) -> Self {
        Self::new(time_ms, SessionEvent::Joined { player_id })
    }

    pub fn left(time_ms: u64, player_id: PlayerId) -> Self {
        Self::new(time_ms, SessionEvent::Left { player_id })
    }

    pub fn input(time_ms: u64, player_id: PlayerId, input: PlayerInput) -> Self {
        Self::new(time_ms, SessionEvent::Input { player_id, input })
    }
}
