//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::HitState;
use crate::types::PlayerId;

/// Position and velocity of anything that drifts across the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: DVec2,
    pub velocity: DVec2,
}

/// Thruster switches as last reported by the owning player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thrusters {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
}

/// Client-side performance figures a player reports through the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientMetrics {
    /// Rendered frames per second.
    pub fps: f64,
    /// Round-trip latency to the replication layer (ms).
    pub latency_ms: f64,
    /// Pending messages the client still has to apply.
    pub backlog: f64,
}

/// One ship per connected player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub player_id: PlayerId,
    /// Empty until the player picks initials.
    pub initials: String,
    /// Heading in radians, always in [0, 2π).
    pub heading: f64,
    pub thrusters: Thrusters,
    pub score: u32,
    pub hit_state: HitState,
    /// Immune to collisions until SPAWN_PROTECTION_MS after `spawned_at_ms`.
    pub spawn_protected: bool,
    /// Virtual time of the latest (re)spawn.
    pub spawned_at_ms: u64,
    /// Latest metrics reported by this player, if any.
    pub metrics: Option<ClientMetrics>,
}

/// A blaster shot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Creation counter; also the collision scan order.
    pub id: u64,
    /// The firing ship. May no longer be in the session.
    pub owner: PlayerId,
    /// Ticks since the shot was fired.
    pub age: u32,
}
