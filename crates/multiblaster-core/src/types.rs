//! Fundamental geometric and simulation types.
//!
//! Also hosts the toroidal wrap and clamp helpers every movement rule goes
//! through, so ships and projectiles share one definition of the field.

use std::collections::BTreeMap;
use std::f64::consts::TAU;
use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{FIELD_SIZE, MAX_AXIS_SPEED};

/// Stable external identity of a participant, assigned by the replication layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Best score per set of initials.
///
/// A `BTreeMap` keeps iteration and serialization order identical on every replica.
pub type HighscoreTable = BTreeMap<String, u32>;

/// Virtual simulation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of completed `advance()` ticks.
    pub tick: u64,
    /// Replicated virtual clock in milliseconds.
    pub now_ms: u64,
}

/// Wrap a single coordinate into `[0, FIELD_SIZE)`.
pub fn wrap_coordinate(value: f64) -> f64 {
    let wrapped = value.rem_euclid(FIELD_SIZE);
    // rem_euclid rounds tiny negative inputs up to the modulus itself.
    if wrapped >= FIELD_SIZE {
        0.0
    } else {
        wrapped
    }
}

/// Wrap a position onto the torus.
pub fn wrap_position(position: DVec2) -> DVec2 {
    DVec2::new(wrap_coordinate(position.x), wrap_coordinate(position.y))
}

/// Normalize an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(TAU);
    if normalized >= TAU {
        0.0
    } else {
        normalized
    }
}

/// Clamp each velocity axis to `[-MAX_AXIS_SPEED, MAX_AXIS_SPEED]`.
pub fn clamp_velocity(velocity: DVec2) -> DVec2 {
    velocity.clamp(DVec2::splat(-MAX_AXIS_SPEED), DVec2::splat(MAX_AXIS_SPEED))
}

/// Unit vector for a heading (0 = +x, counter-clockwise in field coordinates).
pub fn heading_vector(heading: f64) -> DVec2 {
    DVec2::new(heading.cos(), heading.sin())
}
