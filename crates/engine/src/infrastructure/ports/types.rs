//! Records handed to the logging collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mesa_domain::{
    CampaignId, CharacterId, CombatEvent, EncounterEntryId, EncounterId, HitPoints, RollOutcome,
    SkillCheckResult,
};

/// What was rolled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "result", rename_all = "camelCase")]
pub enum RollRecord {
    /// Free-form formula roll ("2d6+3")
    Dice(RollOutcome),
    /// Skill check under the campaign's rule system
    SkillCheck(SkillCheckResult),
}

/// One line in the campaign's roll log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollLogEntry {
    pub id: Uuid,
    pub campaign_id: CampaignId,
    pub character_id: Option<CharacterId>,
    pub record: RollRecord,
    pub rolled_at: DateTime<Utc>,
}

/// Whose hit points a combat event changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CombatTarget {
    #[serde(rename_all = "camelCase")]
    Character { character_id: CharacterId },
    #[serde(rename_all = "camelCase")]
    EncounterEntry {
        encounter_id: EncounterId,
        entry_id: EncounterEntryId,
    },
}

/// One line in the combat audit log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatLogEntry {
    pub id: Uuid,
    pub campaign_id: CampaignId,
    pub target: CombatTarget,
    pub event: CombatEvent,
    pub hit_points_after: HitPoints,
    pub recorded_at: DateTime<Utc>,
}
