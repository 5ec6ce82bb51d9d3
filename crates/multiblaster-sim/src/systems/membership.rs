//! Membership: ships appear when players join and vanish when they leave.

use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use multiblaster_core::events::SimEvent;
use multiblaster_core::types::PlayerId;

use crate::store::EntityStore;
use crate::world_setup;

/// Spawn a ship for a new player. A second join for the same id is ignored.
pub fn join(
    store: &mut EntityStore,
    rng: &mut ChaCha8Rng,
    player_id: PlayerId,
    now_ms: u64,
    events: &mut Vec<SimEvent>,
) {
    if store.contains_ship(player_id) {
        debug!(%player_id, "duplicate join ignored");
        return;
    }
    world_setup::spawn_ship(store, rng, player_id, now_ms);
    info!(%player_id, ships = store.ship_count(), "player joined");
    events.push(SimEvent::ShipJoined { player_id });
}

/// Remove a departing player's ship. Their projectiles stay in flight.
pub fn leave(store: &mut EntityStore, player_id: PlayerId, events: &mut Vec<SimEvent>) {
    match store.remove_ship(player_id) {
        Some(ship) => {
            info!(%player_id, score = ship.score, ships = store.ship_count(), "player left");
            events.push(SimEvent::ShipLeft { player_id });
        }
        None => debug!(%player_id, "leave for unknown player ignored"),
    }
}
