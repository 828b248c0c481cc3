//! Roster data consumed by the engine.

pub mod player;
pub mod team;

pub use player::{Player, Role};
pub use team::Team;

pub(crate) use player::StatAxis;
