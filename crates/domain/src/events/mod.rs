//! Domain Events
//!
//! Values produced by rules operations for the caller to persist. The domain
//! never writes them anywhere itself.
//!
//! - `combat_events`: damage and healing records plus the processor that creates them
//! - `encounter_events`: what an encounter mutation changed

pub mod combat_events;
pub mod encounter_events;

pub use combat_events::*;
pub use encounter_events::*;
