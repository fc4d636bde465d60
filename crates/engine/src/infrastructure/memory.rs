//! In-process collaborators.
//!
//! Back every port with `DashMap`s so the use cases can run without an external
//! store: demos, local tools, and tests that want real round trips.

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;

use mesa_domain::{
    CampaignId, CharacterId, CharacterSheet, CreatureTemplate, CreatureTemplateId, Encounter,
    EncounterId, HitPoints, RuleSystem,
};

use super::ports::{
    CampaignRepo, CharacterRepo, CombatLogEntry, CombatLogRepo, CreatureCatalog, EncounterRepo,
    RepoError, RollLogEntry, RollLogRepo,
};

#[derive(Default)]
pub struct MemoryStore {
    campaigns: DashMap<CampaignId, RuleSystem>,
    sheets: DashMap<CharacterId, CharacterSheet>,
    hit_points: DashMap<CharacterId, HitPoints>,
    encounters: DashMap<EncounterId, Encounter>,
    creatures: DashMap<CreatureTemplateId, (RuleSystem, CreatureTemplate)>,
    roll_log: Mutex<Vec<RollLogEntry>>,
    combat_log: Mutex<Vec<CombatLogEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_campaign(&self, id: CampaignId, system: RuleSystem) {
        self.campaigns.insert(id, system);
    }

    pub fn insert_character(&self, sheet: CharacterSheet, hit_points: HitPoints) {
        self.hit_points.insert(sheet.character_id, hit_points);
        self.sheets.insert(sheet.character_id, sheet);
    }

    pub fn insert_creature(&self, system: RuleSystem, template: CreatureTemplate) {
        self.creatures.insert(template.id, (system, template));
    }

    pub async fn roll_log(&self) -> Vec<RollLogEntry> {
        self.roll_log.lock().await.clone()
    }

    pub async fn combat_log(&self) -> Vec<CombatLogEntry> {
        self.combat_log.lock().await.clone()
    }
}

#[async_trait]
impl CampaignRepo for MemoryStore {
    async fn get_rule_system(&self, id: CampaignId) -> Result<Option<RuleSystem>, RepoError> {
        Ok(self.campaigns.get(&id).map(|system| *system))
    }
}

#[async_trait]
impl CharacterRepo for MemoryStore {
    async fn get_sheet(&self, id: CharacterId) -> Result<Option<CharacterSheet>, RepoError> {
        Ok(self.sheets.get(&id).map(|sheet| sheet.clone()))
    }

    async fn get_hit_points(&self, id: CharacterId) -> Result<Option<HitPoints>, RepoError> {
        Ok(self.hit_points.get(&id).map(|hp| *hp))
    }

    async fn save_hit_points(&self, id: CharacterId, hit_points: HitPoints) -> Result<(), RepoError> {
        match self.hit_points.get_mut(&id) {
            Some(mut stored) => {
                *stored = hit_points;
                Ok(())
            }
            None => Err(RepoError::not_found("Character", id)),
        }
    }
}

#[async_trait]
impl EncounterRepo for MemoryStore {
    async fn get(&self, id: EncounterId) -> Result<Option<Encounter>, RepoError> {
        Ok(self.encounters.get(&id).map(|e| e.clone()))
    }

    async fn find_active(&self, campaign_id: CampaignId) -> Result<Option<Encounter>, RepoError> {
        Ok(self
            .encounters
            .iter()
            .find(|e| e.campaign_id() == campaign_id && e.is_active())
            .map(|e| e.clone()))
    }

    async fn save(&self, encounter: &Encounter) -> Result<(), RepoError> {
        self.encounters.insert(encounter.id(), encounter.clone());
        Ok(())
    }
}

#[async_trait]
impl CreatureCatalog for MemoryStore {
    async fn get(&self, id: CreatureTemplateId) -> Result<Option<CreatureTemplate>, RepoError> {
        Ok(self.creatures.get(&id).map(|entry| entry.1.clone()))
    }

    async fn list_for_system(&self, system: RuleSystem) -> Result<Vec<CreatureTemplate>, RepoError> {
        let mut pool: Vec<CreatureTemplate> = self
            .creatures
            .iter()
            .filter(|entry| entry.0 == system)
            .map(|entry| entry.1.clone())
            .collect();
        // DashMap iteration order is arbitrary; keep draws reproducible under a seed
        pool.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(pool)
    }
}

#[async_trait]
impl RollLogRepo for MemoryStore {
    async fn append(&self, entry: RollLogEntry) -> Result<(), RepoError> {
        self.roll_log.lock().await.push(entry);
        Ok(())
    }
}

#[async_trait]
impl CombatLogRepo for MemoryStore {
    async fn append(&self, entry: CombatLogEntry) -> Result<(), RepoError> {
        self.combat_log.lock().await.push(entry);
        Ok(())
    }
}
