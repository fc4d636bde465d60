//! Encounter budget suggestions.
//!
//! Suggesting is read-only; nothing reaches the encounter until the caller
//! confirms the creatures it wants.

use std::sync::Arc;

use mesa_domain::{
    BudgetRequest, BudgetSuggestion, CampaignId, ChallengeBudgetPlanner, Combatant,
    CreatureTemplate, DomainError, EncounterEntry, EncounterEntryId, EncounterId, PlannerNotice,
};

use crate::infrastructure::ports::{
    CampaignRepo, CreatureCatalog, EncounterRepo, RandomPort, RepoError,
};

/// Container for budget use cases.
pub struct BudgetUseCases {
    pub suggest: Arc<SuggestEncounter>,
    pub confirm: Arc<ConfirmSuggestion>,
}

impl BudgetUseCases {
    pub fn new(suggest: Arc<SuggestEncounter>, confirm: Arc<ConfirmSuggestion>) -> Self {
        Self { suggest, confirm }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    #[error("Campaign not found: {0}")]
    CampaignNotFound(CampaignId),
    #[error("Encounter not found: {0}")]
    EncounterNotFound(EncounterId),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Draw creatures from the campaign system's catalogue against a budget.
pub struct SuggestEncounter {
    campaigns: Arc<dyn CampaignRepo>,
    catalog: Arc<dyn CreatureCatalog>,
    random: Arc<dyn RandomPort>,
    planner: ChallengeBudgetPlanner,
}

impl SuggestEncounter {
    pub fn new(
        campaigns: Arc<dyn CampaignRepo>,
        catalog: Arc<dyn CreatureCatalog>,
        random: Arc<dyn RandomPort>,
        planner: ChallengeBudgetPlanner,
    ) -> Self {
        Self {
            campaigns,
            catalog,
            random,
            planner,
        }
    }

    pub async fn execute(
        &self,
        campaign_id: CampaignId,
        request: &BudgetRequest,
    ) -> Result<BudgetSuggestion, BudgetError> {
        let system = self
            .campaigns
            .get_rule_system(campaign_id)
            .await?
            .ok_or(BudgetError::CampaignNotFound(campaign_id))?;
        let pool = self.catalog.list_for_system(system).await?;

        let suggestion = self
            .planner
            .suggest(request, &pool, &mut || self.random.next_unit())?;

        if suggestion.notice == Some(PlannerNotice::EmptyPool) {
            tracing::warn!(
                campaign_id = %campaign_id,
                system = %system,
                pool_size = pool.len(),
                excluded = request.excluded.len(),
                target = request.target_budget,
                "No creature fits the requested budget"
            );
        } else {
            tracing::debug!(
                campaign_id = %campaign_id,
                picked = suggestion.creatures.len(),
                spent = suggestion.spent,
                target = request.target_budget,
                "Encounter suggestion drawn"
            );
        }

        Ok(suggestion)
    }
}

/// Add accepted suggestion creatures to an encounter in a single save.
pub struct ConfirmSuggestion {
    encounters: Arc<dyn EncounterRepo>,
    random: Arc<dyn RandomPort>,
}

impl ConfirmSuggestion {
    pub fn new(encounters: Arc<dyn EncounterRepo>, random: Arc<dyn RandomPort>) -> Self {
        Self { encounters, random }
    }

    pub async fn execute(
        &self,
        encounter_id: EncounterId,
        creatures: &[CreatureTemplate],
    ) -> Result<Vec<EncounterEntry>, BudgetError> {
        let mut encounter = self
            .encounters
            .get(encounter_id)
            .await?
            .ok_or(BudgetError::EncounterNotFound(encounter_id))?;

        let entries = creatures
            .iter()
            .map(|template| {
                let entry_id = EncounterEntryId::from_uuid(self.random.gen_uuid());
                encounter.add_entry_with_id(entry_id, Combatant::creature(template))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.encounters.save(&encounter).await?;

        tracing::info!(
            encounter_id = %encounter_id,
            added = entries.len(),
            "Suggested creatures added to encounter"
        );
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mesa_domain::{BudgetStrategy, DifficultyRating, Encounter, RuleSystem};

    use super::*;
    use crate::infrastructure::clock::ScriptedRandom;
    use crate::infrastructure::memory::MemoryStore;
    use crate::infrastructure::ports::{MockCampaignRepo, MockCreatureCatalog, MockEncounterRepo};

    fn creature(name: &str, rating: f64) -> CreatureTemplate {
        CreatureTemplate::new(name, DifficultyRating::new(rating).unwrap(), 10, 12)
    }

    fn campaigns() -> MockCampaignRepo {
        let mut repo = MockCampaignRepo::new();
        repo.expect_get_rule_system()
            .returning(|_| Ok(Some(RuleSystem::D20Ability)));
        repo
    }

    #[tokio::test]
    async fn fixed_split_draws_from_system_pool() {
        let mut catalog = MockCreatureCatalog::new();
        catalog
            .expect_list_for_system()
            .withf(|system| *system == RuleSystem::D20Ability)
            .returning(|_| Ok(vec![creature("Wolf", 1.0), creature("Troll", 5.0)]));

        let use_case = SuggestEncounter::new(
            Arc::new(campaigns()),
            Arc::new(catalog),
            Arc::new(ScriptedRandom::new(&[0.1])),
            ChallengeBudgetPlanner::default(),
        );

        let request = BudgetRequest::new(4.0, 2, BudgetStrategy::Fixed);
        let suggestion = use_case.execute(CampaignId::new(), &request).await.unwrap();
        let names: Vec<_> = suggestion.creatures.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Wolf", "Wolf"]);
        assert_eq!(suggestion.spent, 2.0);
        assert!(suggestion.notice.is_none());
    }

    #[tokio::test]
    async fn excluded_pool_returns_empty_notice() {
        let wolf = creature("Wolf", 1.0);
        let wolf_id = wolf.id;
        let mut catalog = MockCreatureCatalog::new();
        catalog
            .expect_list_for_system()
            .returning(move |_| Ok(vec![wolf.clone()]));

        let use_case = SuggestEncounter::new(
            Arc::new(campaigns()),
            Arc::new(catalog),
            Arc::new(ScriptedRandom::new(&[0.1])),
            ChallengeBudgetPlanner::default(),
        );

        let request = BudgetRequest::new(4.0, 2, BudgetStrategy::Random).excluding([wolf_id]);
        let suggestion = use_case.execute(CampaignId::new(), &request).await.unwrap();
        assert!(suggestion.is_empty());
        assert_eq!(suggestion.notice, Some(PlannerNotice::EmptyPool));
    }

    #[tokio::test]
    async fn invalid_request_is_rejected() {
        let mut catalog = MockCreatureCatalog::new();
        catalog.expect_list_for_system().returning(|_| Ok(vec![]));

        let use_case = SuggestEncounter::new(
            Arc::new(campaigns()),
            Arc::new(catalog),
            Arc::new(ScriptedRandom::new(&[0.1])),
            ChallengeBudgetPlanner::default(),
        );

        let request = BudgetRequest::new(0.0, 2, BudgetStrategy::Fixed);
        let err = use_case.execute(CampaignId::new(), &request).await.unwrap_err();
        assert!(matches!(
            err,
            BudgetError::Domain(DomainError::InvalidBudgetRequest(_))
        ));
    }

    #[tokio::test]
    async fn confirm_adds_suffixed_entries() {
        let store = Arc::new(MemoryStore::default());
        let encounter = Encounter::open(CampaignId::new());
        EncounterRepo::save(store.as_ref(), &encounter).await.unwrap();

        let use_case =
            ConfirmSuggestion::new(store.clone(), Arc::new(ScriptedRandom::new(&[0.1])));
        let wolf = creature("Wolf", 1.0);
        let entries = use_case
            .execute(encounter.id(), &[wolf.clone(), wolf])
            .await
            .unwrap();

        let names: Vec<_> = entries.iter().map(|e| e.display_name()).collect();
        assert_eq!(names, vec!["Wolf", "Wolf B"]);
        let saved = EncounterRepo::get(store.as_ref(), encounter.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saved.len(), 2);
    }

    #[tokio::test]
    async fn confirm_on_closed_encounter_saves_nothing() {
        let mut encounter = Encounter::open(CampaignId::new());
        encounter.close().unwrap();
        let encounter_id = encounter.id();
        let mut encounters = MockEncounterRepo::new();
        encounters
            .expect_get()
            .returning(move |_| Ok(Some(encounter.clone())));
        encounters.expect_save().times(0);

        let use_case =
            ConfirmSuggestion::new(Arc::new(encounters), Arc::new(ScriptedRandom::new(&[0.1])));
        let err = use_case
            .execute(encounter_id, &[creature("Wolf", 1.0)])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BudgetError::Domain(DomainError::EncounterClosed)
        ));
    }
}
