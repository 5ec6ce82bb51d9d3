//! Entity factories: spawning and resetting ships, launching projectiles.
//!
//! Every random draw in the simulation happens here, through the engine's
//! seeded RNG, while the ordered session log is being applied.

use std::f64::consts::TAU;

use glam::DVec2;
use hecs::Entity;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use multiblaster_core::components::{Body, Ship, Thrusters};
use multiblaster_core::constants::{
    MUZZLE_OFFSET, PROJECTILE_SPEED, RECOIL_FORCE, SPAWN_MARGIN, SPAWN_SPAN,
};
use multiblaster_core::enums::HitState;
use multiblaster_core::types::{heading_vector, normalize_angle, wrap_position, PlayerId};

use crate::motion::accelerate;
use crate::store::EntityStore;

/// Random spawn point inside the margin plus a random heading.
/// Draw order is x, y, heading.
pub fn random_spawn(rng: &mut ChaCha8Rng) -> (DVec2, f64) {
    let x = rng.gen::<f64>() * SPAWN_SPAN + SPAWN_MARGIN;
    let y = rng.gen::<f64>() * SPAWN_SPAN + SPAWN_MARGIN;
    let heading = normalize_angle(rng.gen::<f64>() * TAU);
    (DVec2::new(x, y), heading)
}

/// Create a freshly spawned ship for `player_id` at the end of the join order.
pub fn spawn_ship(
    store: &mut EntityStore,
    rng: &mut ChaCha8Rng,
    player_id: PlayerId,
    now_ms: u64,
) -> Entity {
    let (position, heading) = random_spawn(rng);
    let ship = Ship {
        player_id,
        initials: String::new(),
        heading,
        thrusters: Thrusters::default(),
        score: 0,
        hit_state: HitState::Alive,
        spawn_protected: true,
        spawned_at_ms: now_ms,
        metrics: None,
    };
    let body = Body {
        position,
        velocity: DVec2::ZERO,
    };
    store.insert_ship(ship, body)
}

/// Put a wrecked ship back into play. Score, initials and metrics survive.
pub fn respawn_ship(ship: &mut Ship, body: &mut Body, rng: &mut ChaCha8Rng, now_ms: u64) {
    let (position, heading) = random_spawn(rng);
    body.position = position;
    body.velocity = DVec2::ZERO;
    ship.heading = heading;
    ship.thrusters = Thrusters::default();
    ship.hit_state = HitState::Alive;
    ship.spawn_protected = true;
    ship.spawned_at_ms = now_ms;
}

/// Launch a projectile from the ship's nose and apply recoil.
/// Wrecked ships cannot fire; returns the new projectile's id otherwise.
pub fn fire_blaster(store: &mut EntityStore, ship_entity: Entity) -> Option<u64> {
    let (owner, launch) = {
        let (ship, body) = store
            .world_mut()
            .query_one_mut::<(&Ship, &mut Body)>(ship_entity)
            .ok()?;
        if ship.hit_state.is_debris() {
            return None;
        }
        let direction = heading_vector(ship.heading);
        let launch = Body {
            position: wrap_position(body.position + direction * MUZZLE_OFFSET),
            velocity: direction * PROJECTILE_SPEED,
        };
        accelerate(body, ship.heading, RECOIL_FORCE);
        (ship.player_id, launch)
    };
    Some(store.spawn_projectile(owner, launch))
}
