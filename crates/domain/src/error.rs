//! Unified error types for the domain layer
//!
//! Every public rules operation validates its input before touching state and
//! reports failures through [`DomainError`]. None of these are fatal: the caller
//! can always retry with corrected input.

use thiserror::Error;

use crate::ids::EncounterEntryId;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed dice expression. Never auto-corrected.
    #[error("fórmula inválida: '{0}'")]
    InvalidFormula(String),

    /// A fixed (or rolled) damage/heal amount was zero or negative
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    /// The referenced encounter entry is not a current member (stale client view)
    #[error("unknown encounter entry: {0}")]
    UnknownEntry(EncounterEntryId),

    /// An entry with this id is already in the encounter
    #[error("encounter entry {0} already exists")]
    DuplicateEntry(EncounterEntryId),

    /// Player-controlled entries take their name from the linked character
    #[error("entry {0} is player-controlled and cannot be renamed")]
    RenameNotAllowed(EncounterEntryId),

    /// A reorder request did not list every entry exactly once
    #[error("reorder must list every entry exactly once ({given} ids given, {expected} entries present)")]
    IncompleteOrder { given: usize, expected: usize },

    /// The encounter was closed; no further mutation is accepted
    #[error("encounter is closed")]
    EncounterClosed,

    /// Hit point values that cannot satisfy `0 <= current <= max`
    #[error("invalid hit points: current {current}, max {max}")]
    InvalidHitPoints { current: i32, max: i32 },

    /// Negative, NaN or unparseable difficulty rating
    #[error("invalid difficulty rating: {0}")]
    InvalidDifficultyRating(String),

    /// Target budget or creature count out of range
    #[error("invalid budget request: {0}")]
    InvalidBudgetRequest(String),

    /// Skill id not present in the active system's catalogue
    #[error("unknown skill '{skill}' for system {system}")]
    UnknownSkill { skill: String, system: &'static str },

    /// Campaign declared a rule system this engine does not know
    #[error("unknown rule system: {0}")]
    UnknownRuleSystem(String),
}

impl DomainError {
    /// Creates an invalid-formula error from the offending input.
    pub fn invalid_formula(input: impl Into<String>) -> Self {
        Self::InvalidFormula(input.into())
    }

    /// Creates an invalid budget request error.
    pub fn invalid_budget(msg: impl Into<String>) -> Self {
        Self::InvalidBudgetRequest(msg.into())
    }

    /// True when the failure means the caller's cached entry list is out of date.
    pub fn is_stale_view(&self) -> bool {
        matches!(self, Self::UnknownEntry(_) | Self::IncompleteOrder { .. })
    }
}
