//! Application state and composition.

use std::sync::Arc;

use mesa_domain::ChallengeBudgetPlanner;

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    memory::MemoryStore,
    ports::{
        CampaignRepo, CharacterRepo, ClockPort, CombatLogRepo, CreatureCatalog, EncounterRepo,
        RandomPort, RollLogRepo,
    },
    settings::EngineSettings,
    telemetry::init_tracing,
};
use crate::use_cases;

/// Main application state.
///
/// Holds the collaborator ports and every use case wired against them.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub settings: EngineSettings,
}

/// Collaborator ports, injected directly as trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub campaign: Arc<dyn CampaignRepo>,
    pub character: Arc<dyn CharacterRepo>,
    pub encounter: Arc<dyn EncounterRepo>,
    pub creatures: Arc<dyn CreatureCatalog>,
    pub roll_log: Arc<dyn RollLogRepo>,
    pub combat_log: Arc<dyn CombatLogRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub dice: use_cases::DiceUseCases,
    pub combat: Arc<use_cases::ApplyCombatEvent>,
    pub encounter: Arc<use_cases::EncounterOps>,
    pub budget: use_cases::BudgetUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        repos: Repositories,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
        settings: EngineSettings,
    ) -> Self {
        let dice = use_cases::DiceUseCases::new(
            Arc::new(use_cases::RollSkillCheck::new(
                repos.campaign.clone(),
                repos.character.clone(),
                repos.roll_log.clone(),
                random.clone(),
                clock.clone(),
            )),
            Arc::new(use_cases::RollDice::new(
                repos.roll_log.clone(),
                random.clone(),
                clock.clone(),
            )),
        );

        let combat = Arc::new(use_cases::ApplyCombatEvent::new(
            repos.character.clone(),
            repos.encounter.clone(),
            repos.combat_log.clone(),
            random.clone(),
            clock,
        ));

        let encounter = Arc::new(use_cases::EncounterOps::new(
            repos.encounter.clone(),
            repos.character.clone(),
            repos.creatures.clone(),
            random.clone(),
        ));

        let planner = ChallengeBudgetPlanner::with_max_attempts(settings.planner_max_attempts);
        let budget = use_cases::BudgetUseCases::new(
            Arc::new(use_cases::SuggestEncounter::new(
                repos.campaign.clone(),
                repos.creatures.clone(),
                random.clone(),
                planner,
            )),
            Arc::new(use_cases::ConfirmSuggestion::new(
                repos.encounter.clone(),
                random,
            )),
        );

        Self {
            repositories: repos,
            use_cases: UseCases {
                dice,
                combat,
                encounter,
                budget,
            },
            settings,
        }
    }

    /// Wire every port to one in-memory store.
    ///
    /// The store is returned so callers can seed campaigns, characters and
    /// creatures. `settings.rng_seed` makes every roll and every new id
    /// reproducible. Tracing is installed with `settings.log_filter` unless a
    /// subscriber already exists.
    pub fn in_memory(settings: EngineSettings) -> (Self, Arc<MemoryStore>) {
        init_tracing(&settings.log_filter);
        let store = Arc::new(MemoryStore::new());
        let repos = Repositories {
            campaign: store.clone(),
            character: store.clone(),
            encounter: store.clone(),
            creatures: store.clone(),
            roll_log: store.clone(),
            combat_log: store.clone(),
        };
        let random: Arc<dyn RandomPort> = Arc::new(SystemRandom::from_seed(settings.rng_seed));
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

        tracing::info!(
            seeded = settings.rng_seed.is_some(),
            planner_max_attempts = settings.planner_max_attempts,
            "Engine wired to in-memory collaborators"
        );

        (Self::new(repos, random, clock, settings), store)
    }
}

#[cfg(test)]
mod tests {
    use mesa_domain::{
        AmountInput, AttributeSet, BudgetRequest, BudgetStrategy, CampaignId, CharacterId,
        CharacterSheet, CombatEventKind, CreatureTemplate, DifficultyRating, HitPoints,
        RuleSystem, SkillState,
    };

    use super::*;
    use crate::infrastructure::ports::CombatTarget;

    fn seeded() -> EngineSettings {
        EngineSettings {
            rng_seed: Some(7),
            ..EngineSettings::default()
        }
    }

    #[tokio::test]
    async fn session_flow_through_in_memory_app() {
        let (app, store) = App::in_memory(seeded());
        let campaign_id = CampaignId::new();
        let character_id = CharacterId::new();
        store.insert_campaign(campaign_id, RuleSystem::D20Ability);
        store.insert_character(
            CharacterSheet::new(character_id, "Iris", 3)
                .with_attributes(AttributeSet::from([("DEX", 16)]))
                .with_skill("stealth", SkillState::proficient()),
            HitPoints::full(24),
        );
        store.insert_creature(
            RuleSystem::D20Ability,
            CreatureTemplate::new("Wolf", DifficultyRating::new(1.0).unwrap(), 11, 13),
        );

        let check = app
            .use_cases
            .dice
            .skill_check
            .execute(campaign_id, character_id, "stealth")
            .await
            .unwrap();
        // 1d20 + 3 (DEX) + 2 (proficiency at level 3)
        assert!((6..=25).contains(&check.display_total));

        let suggestion = app
            .use_cases
            .budget
            .suggest
            .execute(campaign_id, &BudgetRequest::new(2.0, 2, BudgetStrategy::Fixed))
            .await
            .unwrap();
        assert_eq!(suggestion.creatures.len(), 2);

        let encounter = app.use_cases.encounter.open_or_get(campaign_id).await.unwrap();
        let entries = app
            .use_cases
            .budget
            .confirm
            .execute(encounter.id(), &suggestion.creatures)
            .await
            .unwrap();
        app.use_cases
            .encounter
            .add_character(encounter.id(), character_id)
            .await
            .unwrap();

        let outcome = app
            .use_cases
            .combat
            .execute(
                campaign_id,
                CombatTarget::EncounterEntry {
                    encounter_id: encounter.id(),
                    entry_id: entries[0].id(),
                },
                CombatEventKind::DamageTaken,
                &AmountInput::Fixed(20),
            )
            .await
            .unwrap();
        assert!(outcome.is_down);

        assert_eq!(store.roll_log().await.len(), 1);
        assert_eq!(store.combat_log().await.len(), 1);
    }

    #[tokio::test]
    async fn same_seed_gives_same_rolls() {
        let roll_twice = || async {
            let (app, _store) = App::in_memory(seeded());
            let outcome = app
                .use_cases
                .dice
                .roll
                .execute(CampaignId::new(), None, "4d6")
                .await
                .unwrap();
            outcome.rolls
        };

        assert_eq!(roll_twice().await, roll_twice().await);
    }

    #[tokio::test]
    async fn same_seed_gives_same_ids() {
        let open_once = || async {
            let (app, _store) = App::in_memory(seeded());
            let campaign_id = CampaignId::from_uuid(uuid::Uuid::from_u128(3));
            let encounter = app.use_cases.encounter.open_or_get(campaign_id).await.unwrap();
            let wolf = CreatureTemplate::new("Wolf", DifficultyRating::new(1.0).unwrap(), 11, 13);
            let entries = app
                .use_cases
                .budget
                .confirm
                .execute(encounter.id(), &[wolf])
                .await
                .unwrap();
            (encounter.id(), entries[0].id())
        };

        assert_eq!(open_once().await, open_once().await);
    }

    #[test]
    fn in_memory_app_installs_tracing() {
        let _ = App::in_memory(EngineSettings::default());
        assert!(tracing::dispatcher::has_been_set());
    }
}
