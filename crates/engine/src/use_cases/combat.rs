//! Apply damage or healing to a character or an encounter entry.

use std::sync::Arc;

use mesa_domain::{
    AmountInput, CampaignId, CharacterId, CombatEventKind, CombatEventProcessor, CombatOutcome,
    CombatantSource, DomainError, EncounterId, HitPoints,
};

use crate::infrastructure::ports::{
    CharacterRepo, ClockPort, CombatLogEntry, CombatLogRepo, CombatTarget, EncounterRepo,
    RandomPort, RepoError,
};

#[derive(Debug, thiserror::Error)]
pub enum CombatError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error("Encounter not found: {0}")]
    EncounterNotFound(EncounterId),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Resolve an amount, apply it to the target's pool, persist, and log.
///
/// Nothing is written when validation fails.
pub struct ApplyCombatEvent {
    characters: Arc<dyn CharacterRepo>,
    encounters: Arc<dyn EncounterRepo>,
    combat_log: Arc<dyn CombatLogRepo>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
}

impl ApplyCombatEvent {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        encounters: Arc<dyn EncounterRepo>,
        combat_log: Arc<dyn CombatLogRepo>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            characters,
            encounters,
            combat_log,
            random,
            clock,
        }
    }

    pub async fn execute(
        &self,
        campaign_id: CampaignId,
        target: CombatTarget,
        kind: CombatEventKind,
        input: &AmountInput,
    ) -> Result<CombatOutcome, CombatError> {
        // Once a pool write lands the event is logged, even if a later write fails
        let (outcome, mirror_error) = match target {
            CombatTarget::Character { character_id } => {
                let hit_points = self
                    .characters
                    .get_hit_points(character_id)
                    .await?
                    .ok_or(CombatError::CharacterNotFound(character_id))?;
                let outcome = self.resolve(hit_points, kind, input)?;
                self.characters
                    .save_hit_points(character_id, outcome.hit_points)
                    .await?;
                (outcome, None)
            }
            CombatTarget::EncounterEntry {
                encounter_id,
                entry_id,
            } => {
                let mut encounter = self
                    .encounters
                    .get(encounter_id)
                    .await?
                    .ok_or(CombatError::EncounterNotFound(encounter_id))?;
                let Some(entry) = encounter.entry(entry_id) else {
                    tracing::warn!(
                        encounter_id = %encounter_id,
                        entry_id = %entry_id,
                        "Combat event targets an entry that no longer exists"
                    );
                    return Err(DomainError::UnknownEntry(entry_id).into());
                };
                let source = entry.source();
                let outcome = self.resolve(entry.hit_points(), kind, input)?;

                encounter.apply_hit_points(entry_id, outcome.hit_points)?;
                self.encounters.save(&encounter).await?;
                // Player entries mirror the character's own pool
                let mut mirror_error = None;
                if let CombatantSource::Character(character_id) = source {
                    match self
                        .characters
                        .save_hit_points(character_id, outcome.hit_points)
                        .await
                    {
                        Ok(()) => {}
                        Err(e) if e.is_not_found() => {
                            tracing::warn!(
                                character_id = %character_id,
                                entry_id = %entry_id,
                                "Encounter entry links a character that no longer exists"
                            );
                        }
                        Err(e) => {
                            tracing::error!(
                                character_id = %character_id,
                                entry_id = %entry_id,
                                error = %e,
                                "Failed to mirror entry hit points to character"
                            );
                            mirror_error = Some(e);
                        }
                    }
                }
                (outcome, mirror_error)
            }
        };

        tracing::info!(
            campaign_id = %campaign_id,
            target = ?target,
            kind = outcome.event.kind().label(),
            amount = outcome.event.amount(),
            applied = outcome.applied,
            current = outcome.hit_points.current(),
            is_down = outcome.is_down,
            "Combat event applied"
        );

        let appended = self
            .combat_log
            .append(CombatLogEntry {
                id: self.random.gen_uuid(),
                campaign_id,
                target,
                event: outcome.event.clone(),
                hit_points_after: outcome.hit_points,
                recorded_at: self.clock.now(),
            })
            .await;
        if let Err(e) = appended {
            tracing::error!(
                campaign_id = %campaign_id,
                target = ?target,
                current = outcome.hit_points.current(),
                error = %e,
                "Hit points saved but combat log append failed"
            );
            return Err(e.into());
        }

        match mirror_error {
            Some(e) => Err(e.into()),
            None => Ok(outcome),
        }
    }

    fn resolve(
        &self,
        hit_points: HitPoints,
        kind: CombatEventKind,
        input: &AmountInput,
    ) -> Result<CombatOutcome, DomainError> {
        CombatEventProcessor::apply(hit_points, kind, input, &mut || self.random.next_unit())
    }
}
