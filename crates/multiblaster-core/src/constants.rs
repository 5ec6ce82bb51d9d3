//! Simulation constants and tuning parameters.
//!
//! Every replica must agree on these values; changing any of them is a
//! protocol change.

/// Virtual milliseconds between two `advance()` ticks.
pub const TICK_INTERVAL_MS: u64 = 50;

// --- Field ---

/// Width and height of the toroidal play field.
pub const FIELD_SIZE: f64 = 1000.0;

/// Minimum distance from the field edge for a fresh spawn.
pub const SPAWN_MARGIN: f64 = 40.0;

/// Extent of the spawn area along each axis (field minus both margins).
pub const SPAWN_SPAN: f64 = FIELD_SIZE - 2.0 * SPAWN_MARGIN;

// --- Ship handling ---

/// Heading change per tick while a turn thruster is held (radians).
pub const TURN_RATE: f64 = 0.2;

/// Acceleration per tick while the forward thruster is held.
pub const THRUST_FORCE: f64 = 0.5;

/// Acceleration applied to the ship when it fires (kickback).
pub const RECOIL_FORCE: f64 = -0.5;

/// Velocity bound on each axis.
pub const MAX_AXIS_SPEED: f64 = 10.0;

// --- Blaster ---

/// Projectile speed along the firing heading.
pub const PROJECTILE_SPEED: f64 = 20.0;

/// Distance from ship center to the muzzle.
pub const MUZZLE_OFFSET: f64 = 20.0;

/// A projectile older than this many ticks is removed (1.5 s).
pub const PROJECTILE_MAX_AGE: u32 = 30;

// --- Collision ---

/// Half width/height of the ship hit box.
pub const HIT_BOX_HALF_EXTENT: f64 = 20.0;

// --- Respawn ---

/// Ticks a ship drifts as debris before it respawns (3 s).
pub const DEBRIS_TICKS: u32 = 60;

/// Virtual milliseconds of immunity after a (re)spawn.
pub const SPAWN_PROTECTION_MS: u64 = 3000;

// --- Ledger ---

/// Maximum length of player initials, in characters.
pub const MAX_INITIALS_CHARS: usize = 20;
