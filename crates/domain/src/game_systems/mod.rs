//! Rule system implementations.
//!
//! Each campaign declares one system; the declared system selects a
//! [`RulesProfile`] that the [`SkillResolver`] consults.
//!
//! # Supported Systems
//!
//! - `D20_ABILITY` - 5e-style d20 with the six classic abilities
//! - `D20_CUSTOM` - same numeric policy, localized attribute and skill names
//! - `PERCENTILE` - d100 roll-under horror system

pub mod d20;
pub mod percentile;
mod resolver;
mod traits;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::SkillDefinition;
use crate::error::DomainError;
use crate::value_objects::DiceFormula;

pub use d20::D20Bonuses;
pub use percentile::SuccessLevel;
pub use resolver::{CheckOutcome, SkillCheckResult, SkillResolver};
pub use traits::{CheckPlan, RulesProfile};

/// The rule system a campaign declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleSystem {
    D20Ability,
    D20Custom,
    Percentile,
}

impl RuleSystem {
    pub fn all() -> &'static [RuleSystem] {
        &[
            RuleSystem::D20Ability,
            RuleSystem::D20Custom,
            RuleSystem::Percentile,
        ]
    }

    /// Stable identifier as stored on the campaign record
    pub fn system_id(&self) -> &'static str {
        match self {
            RuleSystem::D20Ability => "D20_ABILITY",
            RuleSystem::D20Custom => "D20_CUSTOM",
            RuleSystem::Percentile => "PERCENTILE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RuleSystem::D20Ability => "d20 (abilities)",
            RuleSystem::D20Custom => "d20 (atributos)",
            RuleSystem::Percentile => "Percentile horror",
        }
    }

    /// The static rules table for this system
    pub fn profile(&self) -> &'static dyn RulesProfile {
        match self {
            RuleSystem::D20Ability => &D20AbilityProfile,
            RuleSystem::D20Custom => &D20CustomProfile,
            RuleSystem::Percentile => &PercentileProfile,
        }
    }
}

impl FromStr for RuleSystem {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "D20_ABILITY" | "DND5E" | "5E" => Ok(RuleSystem::D20Ability),
            "D20_CUSTOM" => Ok(RuleSystem::D20Custom),
            "PERCENTILE" | "COC" | "D100" => Ok(RuleSystem::Percentile),
            _ => Err(DomainError::UnknownRuleSystem(s.to_string())),
        }
    }
}

impl fmt::Display for RuleSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.system_id())
    }
}

// =============================================================================
// Profiles
// =============================================================================

fn d20_plan(attribute_value: i32, is_proficient: bool, extra_bonus: i32, level: i32) -> CheckPlan {
    let bonuses = D20Bonuses::compute(attribute_value, is_proficient, extra_bonus, level);
    CheckPlan::Total {
        die: DiceFormula::single(d20::CHECK_DIE),
        description: bonuses.describe(),
        bonuses,
    }
}

/// 5e-style profile
pub struct D20AbilityProfile;

impl RulesProfile for D20AbilityProfile {
    fn system(&self) -> RuleSystem {
        RuleSystem::D20Ability
    }

    fn attributes(&self) -> &'static [&'static str] {
        d20::ABILITY_ATTRIBUTES
    }

    fn skills(&self) -> &'static [SkillDefinition] {
        d20::ABILITY_SKILLS
    }

    fn default_attribute_score(&self) -> i32 {
        d20::DEFAULT_SCORE
    }

    fn compute_check(
        &self,
        attribute_value: i32,
        is_proficient: bool,
        extra_bonus: i32,
        level: i32,
    ) -> CheckPlan {
        d20_plan(attribute_value, is_proficient, extra_bonus, level)
    }
}

/// d20 profile with localized catalogue
pub struct D20CustomProfile;

impl RulesProfile for D20CustomProfile {
    fn system(&self) -> RuleSystem {
        RuleSystem::D20Custom
    }

    fn attributes(&self) -> &'static [&'static str] {
        d20::CUSTOM_ATTRIBUTES
    }

    fn skills(&self) -> &'static [SkillDefinition] {
        d20::CUSTOM_SKILLS
    }

    fn default_attribute_score(&self) -> i32 {
        d20::DEFAULT_SCORE
    }

    fn compute_check(
        &self,
        attribute_value: i32,
        is_proficient: bool,
        extra_bonus: i32,
        level: i32,
    ) -> CheckPlan {
        d20_plan(attribute_value, is_proficient, extra_bonus, level)
    }
}

/// Percentile roll-under profile. Proficiency and level do not apply.
pub struct PercentileProfile;

impl RulesProfile for PercentileProfile {
    fn system(&self) -> RuleSystem {
        RuleSystem::Percentile
    }

    fn attributes(&self) -> &'static [&'static str] {
        percentile::ATTRIBUTES
    }

    fn skills(&self) -> &'static [SkillDefinition] {
        percentile::SKILLS
    }

    fn default_attribute_score(&self) -> i32 {
        percentile::DEFAULT_SCORE
    }

    fn compute_check(
        &self,
        attribute_value: i32,
        _is_proficient: bool,
        extra_bonus: i32,
        _level: i32,
    ) -> CheckPlan {
        let target = percentile::success_target(attribute_value, extra_bonus);
        CheckPlan::RollUnder {
            die: DiceFormula::single(percentile::CHECK_DIE),
            target,
            description: format!("1d{} <= {}", percentile::CHECK_DIE, target),
        }
    }
}
