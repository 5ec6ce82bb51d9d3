//! Snapshot system: reads the store and ledger and builds a `WorldSnapshot`.
//!
//! This system is read-only. It never modifies the world.

use multiblaster_core::components::{Body, ClientMetrics, Projectile, Ship};
use multiblaster_core::events::SimEvent;
use multiblaster_core::state::*;
use multiblaster_core::types::{HighscoreTable, SimTime};

use crate::ledger::Ledger;
use crate::store::EntityStore;

/// Build a complete snapshot. `events` are the sim events since the last snapshot.
pub fn build_snapshot(
    store: &EntityStore,
    ledger: &Ledger,
    time: SimTime,
    events: Vec<SimEvent>,
) -> WorldSnapshot {
    let (ships, reports) = build_ships(store);
    let metrics = MetricsSummary::from_reports(ships.len(), reports.iter());

    WorldSnapshot {
        time,
        leaderboard: build_leaderboard(ledger.table(), &ships),
        ships,
        projectiles: build_projectiles(store),
        highscores: ledger.table().clone(),
        metrics,
        events,
    }
}

/// Ship views in join order, plus every metrics report on file.
fn build_ships(store: &EntityStore) -> (Vec<ShipView>, Vec<ClientMetrics>) {
    let world = store.world();
    let mut ships = Vec::with_capacity(store.ship_count());
    let mut reports = Vec::new();

    for &(_, entity) in store.ship_order() {
        let (Ok(ship), Ok(body)) = (world.get::<&Ship>(entity), world.get::<&Body>(entity)) else {
            continue;
        };
        if let Some(metrics) = ship.metrics {
            reports.push(metrics);
        }
        ships.push(ShipView {
            player_id: ship.player_id,
            initials: ship.initials.clone(),
            position: body.position,
            velocity: body.velocity,
            heading: ship.heading,
            thrusters: ship.thrusters,
            score: ship.score,
            hit_state: ship.hit_state,
            spawn_protected: ship.spawn_protected,
        });
    }
    (ships, reports)
}

fn build_projectiles(store: &EntityStore) -> Vec<ProjectileView> {
    let world = store.world();
    store
        .projectile_order()
        .iter()
        .filter_map(|&entity| {
            let projectile = world.get::<&Projectile>(entity).ok()?;
            let body = world.get::<&Body>(entity).ok()?;
            Some(ProjectileView {
                id: projectile.id,
                owner: projectile.owner,
                position: body.position,
                age: projectile.age,
            })
        })
        .collect()
}

/// Highscores plus one row per ship without initials, best first.
///
/// Unnamed ships are labelled by their 1-based join position. Ties keep
/// highscore rows (alphabetical) ahead of unnamed ships.
pub fn build_leaderboard(table: &HighscoreTable, ships: &[ShipView]) -> Vec<LeaderboardEntry> {
    let mut rows: Vec<LeaderboardEntry> = table
        .iter()
        .map(|(initials, &score)| LeaderboardEntry {
            label: initials.clone(),
            score,
        })
        .collect();

    rows.extend(
        ships
            .iter()
            .enumerate()
            .filter(|(_, ship)| ship.initials.is_empty())
            .map(|(index, ship)| LeaderboardEntry {
                label: format!("Player {}", index + 1),
                score: ship.score,
            }),
    );

    // Stable sort keeps the insertion order within equal scores.
    rows.sort_by(|a, b| b.score.cmp(&a.score));
    rows
}
