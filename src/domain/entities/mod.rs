//! Domain entities - Core business objects with identity

mod creature;
mod roster;

pub use creature::CreatureEntry;
pub use roster::{EmptyRoster, Roster};
