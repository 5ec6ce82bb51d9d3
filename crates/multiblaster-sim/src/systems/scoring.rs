//! Scoring: kill credit and the initials-to-highscore handshake with the ledger.

use hecs::Entity;
use tracing::debug;

use multiblaster_core::components::Ship;
use multiblaster_core::constants::MAX_INITIALS_CHARS;
use multiblaster_core::events::SimEvent;

use crate::ledger::Ledger;
use crate::store::EntityStore;

/// Credit one kill to the shooter and offer the new score to the ledger.
pub fn award_kill(
    store: &mut EntityStore,
    ledger: &mut Ledger,
    shooter_entity: Entity,
    events: &mut Vec<SimEvent>,
) {
    let Ok(mut ship) = store.world().get::<&mut Ship>(shooter_entity) else {
        return;
    };
    ship.score += 1;
    if !ship.initials.is_empty() && ledger.submit(&ship.initials, ship.score) {
        events.push(SimEvent::HighscoreChanged {
            initials: ship.initials.clone(),
            score: ship.score,
        });
    }
}

/// Why a set-initials request was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialsRejection {
    Empty,
    TooLong,
    Taken,
    UnknownShip,
}

/// Give a ship new initials.
///
/// The best score stored under the old initials moves to the new ones,
/// merged with the ship's current score, so no recorded best ever drops.
pub fn claim_initials(
    store: &mut EntityStore,
    ledger: &mut Ledger,
    entity: Entity,
    initials: String,
    events: &mut Vec<SimEvent>,
) -> Result<(), InitialsRejection> {
    if initials.is_empty() {
        return Err(InitialsRejection::Empty);
    }
    if initials.chars().count() > MAX_INITIALS_CHARS {
        return Err(InitialsRejection::TooLong);
    }
    // Includes the requesting ship's own current initials.
    if store.initials_taken(&initials) {
        return Err(InitialsRejection::Taken);
    }
    let Ok(mut ship) = store.world().get::<&mut Ship>(entity) else {
        return Err(InitialsRejection::UnknownShip);
    };

    let old = std::mem::replace(&mut ship.initials, initials);
    let raised = ledger.rename(&old, &ship.initials, ship.score);
    debug!(
        player_id = %ship.player_id,
        initials = %ship.initials,
        previous = %old,
        "initials claimed"
    );
    events.push(SimEvent::InitialsChanged {
        player_id: ship.player_id,
        initials: ship.initials.clone(),
    });
    if let Some(score) = raised {
        events.push(SimEvent::HighscoreChanged {
            initials: ship.initials.clone(),
            score,
        });
    }
    Ok(())
}
