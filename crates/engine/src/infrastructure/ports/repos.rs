//! Collaborator port traits.
//!
//! The rules core never touches storage. Use cases load through these ports,
//! call the core, then hand the new authoritative values back.

use async_trait::async_trait;

use mesa_domain::{
    CampaignId, CharacterId, CharacterSheet, CreatureTemplate, CreatureTemplateId, Encounter,
    EncounterId, HitPoints, RuleSystem,
};

use super::error::RepoError;
use super::types::{CombatLogEntry, RollLogEntry};

// =============================================================================
// Campaign / Character Catalogue
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignRepo: Send + Sync {
    /// The rule system the campaign declared
    async fn get_rule_system(&self, id: CampaignId) -> Result<Option<RuleSystem>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    /// Attributes, level and skill overlays
    async fn get_sheet(&self, id: CharacterId) -> Result<Option<CharacterSheet>, RepoError>;
    async fn get_hit_points(&self, id: CharacterId) -> Result<Option<HitPoints>, RepoError>;
    async fn save_hit_points(&self, id: CharacterId, hit_points: HitPoints) -> Result<(), RepoError>;
}

// =============================================================================
// Encounters
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EncounterRepo: Send + Sync {
    async fn get(&self, id: EncounterId) -> Result<Option<Encounter>, RepoError>;
    /// The campaign's open encounter, if any
    async fn find_active(&self, campaign_id: CampaignId) -> Result<Option<Encounter>, RepoError>;
    /// Store the encounter with its entries, replacing what was there
    async fn save(&self, encounter: &Encounter) -> Result<(), RepoError>;
}

// =============================================================================
// Creature Catalogue
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreatureCatalog: Send + Sync {
    async fn get(&self, id: CreatureTemplateId) -> Result<Option<CreatureTemplate>, RepoError>;
    /// Pool for budget planning, filtered to the campaign's system
    async fn list_for_system(&self, system: RuleSystem) -> Result<Vec<CreatureTemplate>, RepoError>;
}

// =============================================================================
// Logs
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RollLogRepo: Send + Sync {
    async fn append(&self, entry: RollLogEntry) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CombatLogRepo: Send + Sync {
    async fn append(&self, entry: CombatLogEntry) -> Result<(), RepoError>;
}
