//! Skill check resolution.
//!
//! The resolver asks the active profile for a [`CheckPlan`], rolls the plan's
//! die through the dice engine, and folds the additive parts in afterwards.
//! Bonuses never enter the dice string because they depend on character state.

use serde::{Deserialize, Serialize};

use crate::entities::{CharacterSheet, SkillDefinition};
use crate::error::DomainError;
use crate::value_objects::{RollOutcome, SkillState};

use super::percentile::{self, SuccessLevel};
use super::traits::{CheckPlan, RulesProfile};
use super::RuleSystem;

/// Per-system reading of a check, tagged so d20 and percentile results
/// never share an untyped shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CheckOutcome {
    #[serde(rename_all = "camelCase")]
    Total {
        ability_modifier: i32,
        proficiency_bonus: i32,
        extra_bonus: i32,
        natural_20: bool,
        natural_1: bool,
    },
    #[serde(rename_all = "camelCase")]
    RollUnder {
        target: i64,
        is_success: bool,
        level: SuccessLevel,
    },
}

/// What a skill roll produced, ready for the roll log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCheckResult {
    pub system: RuleSystem,
    pub skill_id: String,
    pub skill_name: String,
    /// The raw die roll
    pub roll: RollOutcome,
    /// e.g. "1d20+6 (mod +2, prof +3, bonus +1)" or "1d100 <= 70"
    pub formula: String,
    /// e.g. "10 +2 +3 +1 = 16" or "60 <= 70: regular"
    pub breakdown: String,
    /// Final total for d20 checks, the natural roll for percentile checks
    pub display_total: i64,
    pub outcome: CheckOutcome,
}

impl SkillCheckResult {
    /// `Some` only for roll-under systems
    pub fn is_success(&self) -> Option<bool> {
        match self.outcome {
            CheckOutcome::Total { .. } => None,
            CheckOutcome::RollUnder { is_success, .. } => Some(is_success),
        }
    }
}

/// Resolves skill checks under one rule system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillResolver {
    system: RuleSystem,
}

impl SkillResolver {
    pub fn new(system: RuleSystem) -> Self {
        Self { system }
    }

    pub fn system(&self) -> RuleSystem {
        self.system
    }

    pub fn profile(&self) -> &'static dyn RulesProfile {
        self.system.profile()
    }

    /// Roll `skill` for an explicit attribute score and overlay.
    ///
    /// Any attribute value is accepted; extreme scores only produce unusual totals.
    pub fn roll(
        &self,
        skill: &SkillDefinition,
        attribute_value: i32,
        state: SkillState,
        level: i32,
        rng: &mut dyn FnMut() -> f64,
    ) -> SkillCheckResult {
        let plan =
            self.profile()
                .compute_check(attribute_value, state.is_proficient, state.extra_bonus, level);
        let roll = plan.die().evaluate(rng);
        let natural = roll.dice_total();

        let (display_total, breakdown, outcome) = match &plan {
            CheckPlan::Total { bonuses, .. } => {
                let total = natural + bonuses.total();
                let mut breakdown = format!("{} {:+}", natural, bonuses.ability_modifier);
                if bonuses.proficiency_bonus != 0 {
                    breakdown.push_str(&format!(" {:+}", bonuses.proficiency_bonus));
                }
                if bonuses.extra_bonus != 0 {
                    breakdown.push_str(&format!(" {:+}", bonuses.extra_bonus));
                }
                breakdown.push_str(&format!(" = {}", total));
                let outcome = CheckOutcome::Total {
                    ability_modifier: bonuses.ability_modifier,
                    proficiency_bonus: bonuses.proficiency_bonus,
                    extra_bonus: bonuses.extra_bonus,
                    natural_20: roll.natural_max(),
                    natural_1: roll.natural_min(),
                };
                (total, breakdown, outcome)
            }
            CheckPlan::RollUnder { target, .. } => {
                let level = percentile::grade(natural as u32, *target);
                let comparison = if level.is_success() { "<=" } else { ">" };
                let breakdown = format!("{} {} {}: {}", natural, comparison, target, level.label());
                let outcome = CheckOutcome::RollUnder {
                    target: *target,
                    is_success: level.is_success(),
                    level,
                };
                (natural, breakdown, outcome)
            }
        };

        SkillCheckResult {
            system: self.system,
            skill_id: skill.id.to_string(),
            skill_name: skill.display_name.to_string(),
            formula: plan.formula_description().to_string(),
            roll,
            breakdown,
            display_total,
            outcome,
        }
    }

    /// Roll a catalogue skill for a character snapshot.
    ///
    /// Unset attributes fall back to the profile's default score and a missing
    /// overlay counts as not proficient with no extra bonus.
    pub fn roll_by_id(
        &self,
        skill_id: &str,
        sheet: &CharacterSheet,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<SkillCheckResult, DomainError> {
        let profile = self.profile();
        let skill = profile.skill(skill_id).ok_or_else(|| DomainError::UnknownSkill {
            skill: skill_id.to_string(),
            system: self.system.system_id(),
        })?;
        let attribute_value = sheet
            .attributes
            .get_or(skill.governing_attribute, profile.default_attribute_score());

        Ok(self.roll(
            skill,
            attribute_value,
            sheet.skill_state(skill_id),
            sheet.level,
            rng,
        ))
    }
}
