//! Mesa domain - rules resolution and encounter management
//!
//! Everything here is pure and synchronous. Randomness enters as an injected
//! `&mut dyn FnMut() -> f64` returning values in `[0, 1)`, so every roll and
//! suggestion is reproducible under a scripted source.

pub mod aggregates;
pub mod challenge_budget;
pub mod entities;
pub mod error;
pub mod events;
pub mod game_systems;
pub mod ids;
pub mod value_objects;

pub use aggregates::{Combatant, CombatantSource, Encounter, EncounterEntry, EncounterStatus};

pub use challenge_budget::{
    BudgetRequest, BudgetStrategy, BudgetSuggestion, ChallengeBudgetPlanner, PlannerNotice,
    DEFAULT_MAX_ATTEMPTS, MAX_CREATURE_COUNT,
};

pub use entities::{CharacterSheet, CreatureTemplate, SkillDefinition};

pub use error::DomainError;

pub use events::{
    AmountInput, CombatEvent, CombatEventKind, CombatEventProcessor, CombatOutcome,
    EncounterChange, ResolvedAmount,
};

pub use game_systems::{
    CheckOutcome, CheckPlan, D20Bonuses, RuleSystem, RulesProfile, SkillCheckResult,
    SkillResolver, SuccessLevel,
};

pub use ids::{CampaignId, CharacterId, CreatureTemplateId, EncounterEntryId, EncounterId};

pub use value_objects::{
    roll, AttributeSet, DiceFormula, DiceOperator, DifficultyRating, HitPoints, RollOutcome,
    SkillState, MAX_DICE,
};
