//! Input system: applies one player's input from the session log to their ship.

use hecs::Entity;
use tracing::debug;

use multiblaster_core::commands::PlayerInput;
use multiblaster_core::components::{Ship, Thrusters};
use multiblaster_core::events::SimEvent;
use multiblaster_core::types::PlayerId;

use crate::ledger::Ledger;
use crate::store::EntityStore;
use crate::systems::scoring;
use crate::world_setup;

pub fn apply(
    store: &mut EntityStore,
    ledger: &mut Ledger,
    player_id: PlayerId,
    input: PlayerInput,
    events: &mut Vec<SimEvent>,
) {
    let Some(entity) = store.ship_entity(player_id) else {
        debug!(%player_id, "input for unknown player ignored");
        return;
    };

    match input {
        PlayerInput::LeftThruster { active } => {
            set_thrusters(store, entity, |thrusters| thrusters.left = active)
        }
        PlayerInput::RightThruster { active } => {
            set_thrusters(store, entity, |thrusters| thrusters.right = active)
        }
        PlayerInput::ForwardThruster { active } => {
            set_thrusters(store, entity, |thrusters| thrusters.forward = active)
        }
        PlayerInput::FireBlaster => {
            if world_setup::fire_blaster(store, entity).is_none() {
                debug!(%player_id, "wrecked ship cannot fire");
            }
        }
        PlayerInput::SetInitials { initials } => {
            if let Err(reason) = scoring::claim_initials(store, ledger, entity, initials, events) {
                debug!(%player_id, ?reason, "initials rejected");
            }
        }
        PlayerInput::SendMetrics { metrics } => {
            if let Ok(mut ship) = store.world().get::<&mut Ship>(entity) {
                ship.metrics = Some(metrics);
            }
        }
    }
}

/// Thruster flags are stored even while wrecked; movement ignores them until respawn clears them.
fn set_thrusters(store: &mut EntityStore, entity: Entity, update: impl FnOnce(&mut Thrusters)) {
    if let Ok(mut ship) = store.world().get::<&mut Ship>(entity) {
        update(&mut ship.thrusters);
    }
}
