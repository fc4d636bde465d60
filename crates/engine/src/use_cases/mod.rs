//! Use cases - orchestration around the rules core.
//!
//! Each module loads from the collaborator ports, calls into `mesa-domain`,
//! and writes back the new authoritative values.

pub mod budget;
pub mod combat;
pub mod encounter;
pub mod skill_check;

pub use budget::{BudgetError, BudgetUseCases, ConfirmSuggestion, SuggestEncounter};
pub use combat::{ApplyCombatEvent, CombatError};
pub use encounter::{EncounterError, EncounterOps};
pub use skill_check::{DiceUseCases, RollDice, RollSkillCheck, SkillCheckError};
