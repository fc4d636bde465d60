//! Encounter lifecycle operations.
//!
//! Each operation loads the encounter, applies one mutation from the rules
//! core, and saves the result. A rejected mutation saves nothing. Requests that
//! name entries the encounter no longer has are logged as stale views.

use std::sync::Arc;

use mesa_domain::{
    CampaignId, CharacterId, Combatant, CreatureTemplateId, DomainError, Encounter,
    EncounterChange, EncounterEntry, EncounterEntryId, EncounterId,
};

use crate::infrastructure::ports::{
    CharacterRepo, CreatureCatalog, EncounterRepo, RandomPort, RepoError,
};

#[derive(Debug, thiserror::Error)]
pub enum EncounterError {
    #[error("Encounter not found: {0}")]
    NotFound(EncounterId),
    #[error("Creature template not found: {0}")]
    CreatureNotFound(CreatureTemplateId),
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Ids for new encounters and entries come from the random port, so a seeded
/// engine replays them along with its rolls.
pub struct EncounterOps {
    encounters: Arc<dyn EncounterRepo>,
    characters: Arc<dyn CharacterRepo>,
    catalog: Arc<dyn CreatureCatalog>,
    random: Arc<dyn RandomPort>,
}

impl EncounterOps {
    pub fn new(
        encounters: Arc<dyn EncounterRepo>,
        characters: Arc<dyn CharacterRepo>,
        catalog: Arc<dyn CreatureCatalog>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            encounters,
            characters,
            catalog,
            random,
        }
    }

    /// The campaign's open encounter, created on first access.
    pub async fn open_or_get(&self, campaign_id: CampaignId) -> Result<Encounter, EncounterError> {
        if let Some(existing) = self.encounters.find_active(campaign_id).await? {
            return Ok(existing);
        }

        let encounter =
            Encounter::open_with_id(EncounterId::from_uuid(self.random.gen_uuid()), campaign_id);
        self.encounters.save(&encounter).await?;
        tracing::info!(
            campaign_id = %campaign_id,
            encounter_id = %encounter.id(),
            "Encounter opened"
        );
        Ok(encounter)
    }

    pub async fn get(&self, encounter_id: EncounterId) -> Result<Encounter, EncounterError> {
        self.load(encounter_id).await
    }

    /// Add a catalogue creature with its template's hit points and armor class.
    pub async fn add_creature(
        &self,
        encounter_id: EncounterId,
        template_id: CreatureTemplateId,
    ) -> Result<EncounterEntry, EncounterError> {
        let template = self
            .catalog
            .get(template_id)
            .await?
            .ok_or(EncounterError::CreatureNotFound(template_id))?;
        self.add(encounter_id, Combatant::creature(&template)).await
    }

    /// Add a player character, carrying their current hit point pool.
    pub async fn add_character(
        &self,
        encounter_id: EncounterId,
        character_id: CharacterId,
    ) -> Result<EncounterEntry, EncounterError> {
        let sheet = self
            .characters
            .get_sheet(character_id)
            .await?
            .ok_or(EncounterError::CharacterNotFound(character_id))?;
        let hit_points = self
            .characters
            .get_hit_points(character_id)
            .await?
            .ok_or(EncounterError::CharacterNotFound(character_id))?;
        self.add(
            encounter_id,
            Combatant::character(character_id, sheet.name, hit_points),
        )
        .await
    }

    pub async fn add(
        &self,
        encounter_id: EncounterId,
        combatant: Combatant,
    ) -> Result<EncounterEntry, EncounterError> {
        let mut encounter = self.load(encounter_id).await?;
        let entry_id = EncounterEntryId::from_uuid(self.random.gen_uuid());
        let entry = encounter.add_entry_with_id(entry_id, combatant)?;
        self.encounters.save(&encounter).await?;

        tracing::info!(
            encounter_id = %encounter_id,
            entry_id = %entry.id(),
            display_name = %entry.display_name(),
            "Encounter entry added"
        );
        Ok(entry)
    }

    pub async fn reorder(
        &self,
        encounter_id: EncounterId,
        order: &[EncounterEntryId],
    ) -> Result<EncounterChange, EncounterError> {
        self.mutate(encounter_id, |e| e.reorder(order)).await
    }

    pub async fn sort_by_initiative(
        &self,
        encounter_id: EncounterId,
    ) -> Result<EncounterChange, EncounterError> {
        self.mutate(encounter_id, Encounter::sort_by_initiative_descending)
            .await
    }

    pub async fn set_initiative(
        &self,
        encounter_id: EncounterId,
        entry_id: EncounterEntryId,
        value: i32,
    ) -> Result<EncounterChange, EncounterError> {
        self.mutate(encounter_id, |e| e.set_initiative(entry_id, value))
            .await
    }

    pub async fn rename(
        &self,
        encounter_id: EncounterId,
        entry_id: EncounterEntryId,
        new_name: &str,
    ) -> Result<EncounterChange, EncounterError> {
        self.mutate(encounter_id, |e| e.rename(entry_id, new_name))
            .await
    }

    pub async fn remove(
        &self,
        encounter_id: EncounterId,
        entry_id: EncounterEntryId,
    ) -> Result<EncounterChange, EncounterError> {
        self.mutate(encounter_id, |e| e.remove(entry_id)).await
    }

    pub async fn next_turn(
        &self,
        encounter_id: EncounterId,
    ) -> Result<EncounterChange, EncounterError> {
        self.mutate(encounter_id, Encounter::next_turn).await
    }

    pub async fn previous_turn(
        &self,
        encounter_id: EncounterId,
    ) -> Result<EncounterChange, EncounterError> {
        self.mutate(encounter_id, Encounter::previous_turn).await
    }

    pub async fn close(&self, encounter_id: EncounterId) -> Result<EncounterChange, EncounterError> {
        self.mutate(encounter_id, Encounter::close).await
    }

    async fn load(&self, encounter_id: EncounterId) -> Result<Encounter, EncounterError> {
        self.encounters
            .get(encounter_id)
            .await?
            .ok_or(EncounterError::NotFound(encounter_id))
    }

    async fn mutate<F>(
        &self,
        encounter_id: EncounterId,
        change: F,
    ) -> Result<EncounterChange, EncounterError>
    where
        F: FnOnce(&mut Encounter) -> Result<EncounterChange, DomainError>,
    {
        let mut encounter = self.load(encounter_id).await?;
        let change = match change(&mut encounter) {
            Ok(change) => change,
            Err(e) if e.is_stale_view() => {
                tracing::warn!(
                    encounter_id = %encounter_id,
                    error = %e,
                    "Encounter request based on a stale view"
                );
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };

        self.encounters.save(&encounter).await?;
        tracing::info!(encounter_id = %encounter_id, change = ?change, "Encounter updated");
        Ok(change)
    }
}
