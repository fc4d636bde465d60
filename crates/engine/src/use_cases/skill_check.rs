//! Dice and skill check use cases.
//!
//! Both load what they need, let the rules core roll with the engine's random
//! source, and append the result to the campaign's roll log. The roll is
//! returned to the caller either way; a failing log write is an error.

use std::sync::Arc;

use mesa_domain::{
    roll, CampaignId, CharacterId, DomainError, RollOutcome, RuleSystem, SkillCheckResult,
    SkillResolver,
};

use crate::infrastructure::ports::{
    CampaignRepo, CharacterRepo, ClockPort, RandomPort, RepoError, RollLogEntry, RollLogRepo,
    RollRecord,
};

/// Container for dice use cases.
pub struct DiceUseCases {
    pub skill_check: Arc<RollSkillCheck>,
    pub roll: Arc<RollDice>,
}

impl DiceUseCases {
    pub fn new(skill_check: Arc<RollSkillCheck>, roll: Arc<RollDice>) -> Self {
        Self { skill_check, roll }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SkillCheckError {
    #[error("Campaign not found: {0}")]
    CampaignNotFound(CampaignId),
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Roll a catalogue skill for a character under the campaign's rule system.
pub struct RollSkillCheck {
    campaigns: Arc<dyn CampaignRepo>,
    characters: Arc<dyn CharacterRepo>,
    roll_log: Arc<dyn RollLogRepo>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
}

impl RollSkillCheck {
    pub fn new(
        campaigns: Arc<dyn CampaignRepo>,
        characters: Arc<dyn CharacterRepo>,
        roll_log: Arc<dyn RollLogRepo>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            campaigns,
            characters,
            roll_log,
            random,
            clock,
        }
    }

    pub async fn execute(
        &self,
        campaign_id: CampaignId,
        character_id: CharacterId,
        skill_id: &str,
    ) -> Result<SkillCheckResult, SkillCheckError> {
        let system = rule_system(self.campaigns.as_ref(), campaign_id).await?;
        let sheet = self
            .characters
            .get_sheet(character_id)
            .await?
            .ok_or(SkillCheckError::CharacterNotFound(character_id))?;

        let result = SkillResolver::new(system).roll_by_id(skill_id, &sheet, &mut || {
            self.random.next_unit()
        })?;

        tracing::debug!(
            campaign_id = %campaign_id,
            character_id = %character_id,
            system = %system,
            skill = %result.skill_id,
            total = result.display_total,
            success = ?result.is_success(),
            "Skill check rolled"
        );

        self.roll_log
            .append(RollLogEntry {
                id: self.random.gen_uuid(),
                campaign_id,
                character_id: Some(character_id),
                record: RollRecord::SkillCheck(result.clone()),
                rolled_at: self.clock.now(),
            })
            .await?;

        Ok(result)
    }
}

/// Roll a free-form formula such as "2d6+3".
pub struct RollDice {
    roll_log: Arc<dyn RollLogRepo>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
}

impl RollDice {
    pub fn new(
        roll_log: Arc<dyn RollLogRepo>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            roll_log,
            random,
            clock,
        }
    }

    pub async fn execute(
        &self,
        campaign_id: CampaignId,
        character_id: Option<CharacterId>,
        formula: &str,
    ) -> Result<RollOutcome, SkillCheckError> {
        let outcome = roll(formula, &mut || self.random.next_unit())?;

        tracing::debug!(
            campaign_id = %campaign_id,
            formula = %outcome.formula,
            detail = %outcome.rendered_detail,
            "Dice rolled"
        );

        self.roll_log
            .append(RollLogEntry {
                id: self.random.gen_uuid(),
                campaign_id,
                character_id,
                record: RollRecord::Dice(outcome.clone()),
                rolled_at: self.clock.now(),
            })
            .await?;

        Ok(outcome)
    }
}

async fn rule_system(
    campaigns: &dyn CampaignRepo,
    campaign_id: CampaignId,
) -> Result<RuleSystem, SkillCheckError> {
    campaigns
        .get_rule_system(campaign_id)
        .await?
        .ok_or(SkillCheckError::CampaignNotFound(campaign_id))
}
