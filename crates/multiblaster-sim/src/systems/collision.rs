//! Collision system: projectile-versus-ship hits.
//!
//! Ships are checked in join order against projectiles in creation order.
//! The first projectile inside a ship's box decides that ship's outcome for
//! the tick, even when that outcome is "nothing happens".

use glam::DVec2;
use hecs::Entity;
use tracing::debug;

use multiblaster_core::components::{Body, Projectile, Ship};
use multiblaster_core::constants::{HIT_BOX_HALF_EXTENT, SPAWN_PROTECTION_MS};
use multiblaster_core::enums::HitState;
use multiblaster_core::events::SimEvent;
use multiblaster_core::types::PlayerId;

use crate::ledger::Ledger;
use crate::store::EntityStore;
use crate::systems::scoring;

/// Axis-aligned box around a ship. Containment is strict on every edge.
#[derive(Debug, Clone, Copy)]
struct HitBox {
    min: DVec2,
    max: DVec2,
}

impl HitBox {
    fn around(center: DVec2) -> Self {
        let half = DVec2::splat(HIT_BOX_HALF_EXTENT);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    fn contains(&self, point: DVec2) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }
}

pub fn run(
    store: &mut EntityStore,
    ledger: &mut Ledger,
    now_ms: u64,
    events: &mut Vec<SimEvent>,
) {
    for index in 0..store.ship_count() {
        let (victim, entity) = store.ship_order()[index];
        let Some(hit_box) = vulnerable_hit_box(store, entity, now_ms) else {
            continue;
        };
        let Some((projectile_entity, projectile)) = first_projectile_inside(store, &hit_box)
        else {
            continue;
        };
        resolve_hit(store, ledger, entity, victim, projectile_entity, projectile, events);
    }
}

/// Expire spawn protection, then return the ship's box if it can be hit.
fn vulnerable_hit_box(store: &mut EntityStore, entity: Entity, now_ms: u64) -> Option<HitBox> {
    let (ship, body) = store
        .world_mut()
        .query_one_mut::<(&mut Ship, &Body)>(entity)
        .ok()?;
    if ship.spawn_protected && now_ms.saturating_sub(ship.spawned_at_ms) >= SPAWN_PROTECTION_MS {
        ship.spawn_protected = false;
    }
    if ship.hit_state.is_debris() || ship.spawn_protected {
        return None;
    }
    Some(HitBox::around(body.position))
}

fn first_projectile_inside(store: &EntityStore, hit_box: &HitBox) -> Option<(Entity, Projectile)> {
    let world = store.world();
    store.projectile_order().iter().find_map(|&entity| {
        let body = world.get::<&Body>(entity).ok()?;
        if !hit_box.contains(body.position) {
            return None;
        }
        let projectile = world.get::<&Projectile>(entity).ok()?;
        Some((entity, (*projectile).clone()))
    })
}

/// Apply one projectile to one ship.
///
/// Own shots never hit. A shot whose owner is still on the field but wrecked
/// is ignored. A shot whose owner has left still wrecks the ship but scores
/// for nobody.
fn resolve_hit(
    store: &mut EntityStore,
    ledger: &mut Ledger,
    victim_entity: Entity,
    victim: PlayerId,
    projectile_entity: Entity,
    projectile: Projectile,
    events: &mut Vec<SimEvent>,
) {
    if projectile.owner == victim {
        return;
    }
    let shooter_entity = store.ship_entity(projectile.owner);
    if let Some(shooter_entity) = shooter_entity {
        let shooter_wrecked = store
            .world()
            .get::<&Ship>(shooter_entity)
            .map(|ship| ship.hit_state.is_debris())
            .unwrap_or(true);
        if shooter_wrecked {
            return;
        }
    }

    if let Ok(mut ship) = store.world().get::<&mut Ship>(victim_entity) {
        ship.hit_state = HitState::Debris(1);
    }
    store.despawn_projectile(projectile_entity);

    let shooter = shooter_entity.map(|_| projectile.owner);
    debug!(
        %victim,
        shooter = ?shooter,
        projectile_id = projectile.id,
        "ship hit"
    );
    events.push(SimEvent::ShipHit {
        victim,
        shooter,
        projectile_id: projectile.id,
    });

    if let Some(shooter_entity) = shooter_entity {
        scoring::award_kill(store, ledger, shooter_entity, events);
    }
}
