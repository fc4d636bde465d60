//! Challenge budget planning
//!
//! Picks creatures from a catalogue pool so their combined difficulty rating
//! approximates a target. The result is advisory: nothing reaches an
//! encounter until the caller confirms it and adds each creature.
//!
//! Two strategies:
//! - `Fixed` splits the budget evenly and fills every slot independently from
//!   creatures rated at most `per_creature + 1`. A slot with no eligible
//!   creature is skipped, so the suggestion may come back short.
//! - `Random` spends a running budget, drawing from the whole pool and keeping
//!   draws whose rating fits the window. It gives up after a bounded number of
//!   rejected draws.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::entities::CreatureTemplate;
use crate::error::DomainError;
use crate::ids::CreatureTemplateId;

/// Rejected draws tolerated by the `Random` strategy before it stops
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Largest `creature_count` a single request may ask for
pub const MAX_CREATURE_COUNT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStrategy {
    Fixed,
    Random,
}

/// What the GM asked for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRequest {
    pub target_budget: f64,
    pub creature_count: u32,
    pub strategy: BudgetStrategy,
    /// Templates the GM ruled out for this suggestion
    #[serde(default)]
    pub excluded: HashSet<CreatureTemplateId>,
}

impl BudgetRequest {
    pub fn new(target_budget: f64, creature_count: u32, strategy: BudgetStrategy) -> Self {
        Self {
            target_budget,
            creature_count,
            strategy,
            excluded: HashSet::new(),
        }
    }

    pub fn excluding(mut self, ids: impl IntoIterator<Item = CreatureTemplateId>) -> Self {
        self.excluded.extend(ids);
        self
    }

    fn validate(&self) -> Result<(), DomainError> {
        if !self.target_budget.is_finite() || self.target_budget <= 0.0 {
            return Err(DomainError::invalid_budget(format!(
                "target budget must be positive, got {}",
                self.target_budget
            )));
        }
        if self.creature_count == 0 || self.creature_count > MAX_CREATURE_COUNT {
            return Err(DomainError::invalid_budget(format!(
                "creature count must be between 1 and {}, got {}",
                MAX_CREATURE_COUNT, self.creature_count
            )));
        }
        Ok(())
    }
}

/// Soft conditions surfaced alongside a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlannerNotice {
    /// No eligible creature could be selected
    EmptyPool,
}

/// Suggested creatures, duplicates allowed, in draw order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSuggestion {
    pub creatures: Vec<CreatureTemplate>,
    /// Sum of the selected ratings
    pub spent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<PlannerNotice>,
}

impl BudgetSuggestion {
    fn from_creatures(creatures: Vec<CreatureTemplate>) -> Self {
        let spent = creatures.iter().map(|c| c.difficulty_rating.value()).sum();
        let notice = creatures.is_empty().then_some(PlannerNotice::EmptyPool);
        Self {
            creatures,
            spent,
            notice,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeBudgetPlanner {
    max_attempts: u32,
}

impl Default for ChallengeBudgetPlanner {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl ChallengeBudgetPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Suggest creatures for `request` from `pool`.
    ///
    /// An empty pool (after exclusions) or a pool with nothing eligible is not
    /// an error: the suggestion is empty and carries `PlannerNotice::EmptyPool`.
    pub fn suggest(
        &self,
        request: &BudgetRequest,
        pool: &[CreatureTemplate],
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<BudgetSuggestion, DomainError> {
        request.validate()?;

        let candidates: Vec<&CreatureTemplate> = pool
            .iter()
            .filter(|c| !request.excluded.contains(&c.id))
            .collect();
        if candidates.is_empty() {
            return Ok(BudgetSuggestion::from_creatures(Vec::new()));
        }

        let picked = match request.strategy {
            BudgetStrategy::Fixed => fixed_split(request, &candidates, rng),
            BudgetStrategy::Random => self.random_spend(request, &candidates, rng),
        };
        Ok(BudgetSuggestion::from_creatures(
            picked.into_iter().cloned().collect(),
        ))
    }

    fn random_spend<'a>(
        &self,
        request: &BudgetRequest,
        candidates: &[&'a CreatureTemplate],
        rng: &mut dyn FnMut() -> f64,
    ) -> Vec<&'a CreatureTemplate> {
        let count = request.creature_count as usize;
        let slot_cap = (request.target_budget / request.creature_count as f64).ceil() + 1.0;
        let mut remaining = request.target_budget;
        let mut failed = 0;
        let mut picked = Vec::with_capacity(count);

        while picked.len() < count && remaining > 0.0 && failed < self.max_attempts {
            let candidate = candidates[pick_index(rng, candidates.len())];
            let rating = candidate.difficulty_rating.value();
            if rating > 0.0 && rating <= remaining.min(slot_cap) {
                picked.push(candidate);
                remaining -= rating;
            } else {
                failed += 1;
            }
        }
        picked
    }
}

fn fixed_split<'a>(
    request: &BudgetRequest,
    candidates: &[&'a CreatureTemplate],
    rng: &mut dyn FnMut() -> f64,
) -> Vec<&'a CreatureTemplate> {
    let per_creature = (request.target_budget / request.creature_count as f64)
        .floor()
        .max(1.0);
    let eligible: Vec<&CreatureTemplate> = candidates
        .iter()
        .copied()
        .filter(|c| c.difficulty_rating.value() <= per_creature + 1.0)
        .collect();
    if eligible.is_empty() {
        return Vec::new();
    }

    (0..request.creature_count)
        .map(|_| eligible[pick_index(rng, eligible.len())])
        .collect()
}

/// Uniform index in `0..len` from a unit float; out-of-range floats are clamped
fn pick_index(rng: &mut dyn FnMut() -> f64, len: usize) -> usize {
    let scaled = (rng() * len as f64).floor();
    (scaled as usize).min(len - 1)
}
