//! Systems that operate on the entity store.
//!
//! Systems are free functions over `EntityStore` (plus the ledger or RNG when
//! they need them). They hold no state of their own.

pub mod collision;
pub mod input;
pub mod membership;
pub mod movement;
pub mod scoring;
pub mod snapshot;
