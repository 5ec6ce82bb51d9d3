//! Movement system: steps every ship in join order, then every projectile in
//! creation order.

use hecs::Entity;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use multiblaster_core::components::{Body, Projectile, Ship};
use multiblaster_core::events::SimEvent;

use crate::motion::{Motion, Step};
use crate::store::EntityStore;
use crate::world_setup;

/// Move everything one tick. Wrecked ships that finished drifting respawn;
/// expired projectiles are removed. `expired` is a reusable scratch buffer.
pub fn run(
    store: &mut EntityStore,
    rng: &mut ChaCha8Rng,
    now_ms: u64,
    expired: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) {
    for index in 0..store.ship_count() {
        let (player_id, entity) = store.ship_order()[index];
        let Ok((ship, body)) = store
            .world_mut()
            .query_one_mut::<(&mut Ship, &mut Body)>(entity)
        else {
            continue;
        };
        if ship.step(body) == Step::Respawn {
            world_setup::respawn_ship(ship, body, rng, now_ms);
            debug!(%player_id, "ship respawned");
            events.push(SimEvent::ShipRespawned { player_id });
        }
    }

    expired.clear();
    for index in 0..store.projectile_count() {
        let entity = store.projectile_order()[index];
        let Ok((projectile, body)) = store
            .world_mut()
            .query_one_mut::<(&mut Projectile, &mut Body)>(entity)
        else {
            continue;
        };
        if projectile.step(body) == Step::Expired {
            expired.push(entity);
            events.push(SimEvent::ProjectileExpired {
                projectile_id: projectile.id,
            });
        }
    }
    store.despawn_projectiles(expired.drain(..));
}
