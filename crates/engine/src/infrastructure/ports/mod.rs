//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Campaign, character and creature catalogues
//! - Encounter persistence
//! - Roll and combat logs
//! - Clock/Random (for testing)

mod error;
mod repos;
mod testing;
pub mod types;

pub use error::RepoError;
pub use repos::*;
pub use testing::*;
pub use types::{CombatLogEntry, CombatTarget, RollLogEntry, RollRecord};
