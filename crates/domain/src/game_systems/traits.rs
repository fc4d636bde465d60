//! Rule profile trait shared by every supported system.
//!
//! A profile owns a fixed attribute list and skill catalogue, and knows how to
//! turn an attribute score into a check plan. Profiles are stateless statics.

use crate::entities::SkillDefinition;
use crate::value_objects::DiceFormula;

use super::d20::D20Bonuses;
use super::RuleSystem;

/// What to roll for a check and how to read the result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckPlan {
    /// Roll the die, add the bonuses, report the total (d20 systems)
    Total {
        die: DiceFormula,
        bonuses: D20Bonuses,
        description: String,
    },
    /// Roll the die, succeed iff the natural roll is at most `target` (percentile)
    RollUnder {
        die: DiceFormula,
        target: i64,
        description: String,
    },
}

impl CheckPlan {
    pub fn die(&self) -> &DiceFormula {
        match self {
            CheckPlan::Total { die, .. } | CheckPlan::RollUnder { die, .. } => die,
        }
    }

    /// Human-readable formula, e.g. "1d20+5 (mod +2, prof +3)" or "1d100 <= 70"
    pub fn formula_description(&self) -> &str {
        match self {
            CheckPlan::Total { description, .. } | CheckPlan::RollUnder { description, .. } => {
                description
            }
        }
    }

    /// Roll-under predicate; `None` for total-based plans
    pub fn is_success(&self, natural_roll: u32) -> Option<bool> {
        match self {
            CheckPlan::Total { .. } => None,
            CheckPlan::RollUnder { target, .. } => Some(natural_roll as i64 <= *target),
        }
    }
}

/// Per-system rules table.
pub trait RulesProfile: Send + Sync {
    /// The system this profile implements.
    fn system(&self) -> RuleSystem;

    /// Attribute labels in sheet order.
    fn attributes(&self) -> &'static [&'static str];

    /// Skill catalogue in sheet order.
    fn skills(&self) -> &'static [SkillDefinition];

    /// Score assumed for an attribute the character never set.
    fn default_attribute_score(&self) -> i32;

    /// Build the check for one attribute score and skill overlay.
    ///
    /// Never panics: out-of-range scores and levels are legal and simply
    /// produce unusual numbers.
    fn compute_check(
        &self,
        attribute_value: i32,
        is_proficient: bool,
        extra_bonus: i32,
        level: i32,
    ) -> CheckPlan;

    /// Look up a skill by id.
    fn skill(&self, skill_id: &str) -> Option<&'static SkillDefinition> {
        self.skills().iter().find(|s| s.id == skill_id)
    }

    /// Governing attribute label for a skill id.
    fn governing_attribute(&self, skill_id: &str) -> Option<&'static str> {
        self.skill(skill_id).map(|s| s.governing_attribute)
    }
}
