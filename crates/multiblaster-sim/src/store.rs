//! Entity store: the hecs world plus the iteration orders the simulation depends on.
//!
//! hecs swaps entities around inside an archetype on despawn, so query order
//! is not stable. Ship join order and projectile creation order are kept here
//! and every system that needs "first match wins" walks these lists.

use hecs::{Entity, World};

use multiblaster_core::components::{Body, Projectile, Ship};
use multiblaster_core::types::PlayerId;

pub struct EntityStore {
    world: World,
    /// Ships in join order.
    ships: Vec<(PlayerId, Entity)>,
    /// Projectiles in creation order.
    projectiles: Vec<Entity>,
    next_projectile_id: u64,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            ships: Vec::new(),
            projectiles: Vec::new(),
            next_projectile_id: 0,
        }
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Ships in join order.
    pub fn ship_order(&self) -> &[(PlayerId, Entity)] {
        &self.ships
    }

    /// Projectiles in creation order.
    pub fn projectile_order(&self) -> &[Entity] {
        &self.projectiles
    }

    pub fn ship_count(&self) -> usize {
        self.ships.len()
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    pub fn contains_ship(&self, player_id: PlayerId) -> bool {
        self.ship_entity(player_id).is_some()
    }

    /// Look up the entity for a player. `None` once the player has left.
    pub fn ship_entity(&self, player_id: PlayerId) -> Option<Entity> {
        self.ships
            .iter()
            .find(|(id, _)| *id == player_id)
            .map(|&(_, entity)| entity)
    }

    /// Whether any live ship currently holds `initials`.
    pub fn initials_taken(&self, initials: &str) -> bool {
        self.world
            .query::<&Ship>()
            .iter()
            .any(|(_, ship)| ship.initials == initials)
    }

    /// Add a ship at the end of the join order.
    pub fn insert_ship(&mut self, ship: Ship, body: Body) -> Entity {
        let player_id = ship.player_id;
        let entity = self.world.spawn((ship, body));
        self.ships.push((player_id, entity));
        entity
    }

    /// Remove a player's ship, returning its final state.
    pub fn remove_ship(&mut self, player_id: PlayerId) -> Option<Ship> {
        let index = self.ships.iter().position(|(id, _)| *id == player_id)?;
        let (_, entity) = self.ships.remove(index);
        let ship = self.world.remove_one::<Ship>(entity).ok();
        let _ = self.world.despawn(entity);
        ship
    }

    /// Add a projectile at the end of the creation order. Returns its id.
    pub fn spawn_projectile(&mut self, owner: PlayerId, body: Body) -> u64 {
        let id = self.next_projectile_id;
        self.next_projectile_id += 1;
        let entity = self.world.spawn((Projectile { id, owner, age: 0 }, body));
        self.projectiles.push(entity);
        id
    }

    pub fn despawn_projectile(&mut self, entity: Entity) {
        self.projectiles.retain(|&e| e != entity);
        let _ = self.world.despawn(entity);
    }

    /// Remove a batch of projectiles, keeping the order of the survivors.
    pub fn despawn_projectiles(&mut self, entities: impl IntoIterator<Item = Entity>) {
        let mut removed = false;
        for entity in entities {
            let _ = self.world.despawn(entity);
            removed = true;
        }
        if removed {
            let world = &self.world;
            self.projectiles.retain(|&e| world.contains(e));
        }
    }
}
