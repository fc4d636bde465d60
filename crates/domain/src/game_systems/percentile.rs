//! Percentile (d100 roll-under) horror profile.
//!
//! No modifier is derived from the score: the attribute score plus any extra
//! bonus is the success target, and a check succeeds iff `1d100 <= target`.
//! Successful rolls are further graded Critical / Extreme / Hard / Regular,
//! failed rolls Fumble / Failure.

use serde::{Deserialize, Serialize};

use crate::entities::SkillDefinition;

/// Default score for an attribute the character never set
pub const DEFAULT_SCORE: i32 = 50;

/// Die rolled for every percentile check
pub const CHECK_DIE: u32 = 100;

pub const ATTRIBUTES: &[&str] = &["FOR", "CON", "TAM", "DES", "APR", "INT", "POD", "EDU"];

pub const SKILLS: &[SkillDefinition] = &[
    SkillDefinition::new("arremessar", "Arremessar", "DES"),
    SkillDefinition::new("charme", "Charme", "APR"),
    SkillDefinition::new("encontrar", "Encontrar", "INT"),
    SkillDefinition::new("escutar", "Escutar", "POD"),
    SkillDefinition::new("esquivar", "Esquivar", "DES"),
    SkillDefinition::new("furtividade", "Furtividade", "DES"),
    SkillDefinition::new("intimidacao", "Intimidação", "FOR"),
    SkillDefinition::new("lutar", "Lutar (Briga)", "FOR"),
    SkillDefinition::new("ocultismo", "Ocultismo", "EDU"),
    SkillDefinition::new("persuasao", "Persuasão", "APR"),
    SkillDefinition::new("primeiros_socorros", "Primeiros Socorros", "EDU"),
    SkillDefinition::new("psicologia", "Psicologia", "INT"),
    SkillDefinition::new("rastrear", "Rastrear", "INT"),
    SkillDefinition::new("usar_bibliotecas", "Usar Bibliotecas", "EDU"),
];

/// Success target for a roll-under check
pub fn success_target(attribute_score: i32, extra_bonus: i32) -> i64 {
    attribute_score as i64 + extra_bonus as i64
}

/// Grade of a percentile roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SuccessLevel {
    /// Successful roll of 01
    Critical,
    /// Roll <= target / 5
    Extreme,
    /// Roll <= target / 2
    Hard,
    /// Roll <= target
    Regular,
    /// Roll > target but not a fumble
    Failure,
    /// Failed roll of 96-100 when target < 50, or of 100 otherwise
    Fumble,
}

impl SuccessLevel {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            SuccessLevel::Critical | SuccessLevel::Extreme | SuccessLevel::Hard | SuccessLevel::Regular
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            SuccessLevel::Critical => "critical",
            SuccessLevel::Extreme => "extreme",
            SuccessLevel::Hard => "hard",
            SuccessLevel::Regular => "regular",
            SuccessLevel::Failure => "failure",
            SuccessLevel::Fumble => "fumble",
        }
    }
}

/// Grade a roll against its target.
///
/// `is_success()` of the returned level is always exactly `roll <= target`;
/// the grading never turns a success into a failure or the other way round.
pub fn grade(roll: u32, target: i64) -> SuccessLevel {
    let roll = roll as i64;
    if roll <= target {
        if roll == 1 {
            SuccessLevel::Critical
        } else if roll <= target / 5 {
            SuccessLevel::Extreme
        } else if roll <= target / 2 {
            SuccessLevel::Hard
        } else {
            SuccessLevel::Regular
        }
    } else if is_fumble(roll, target) {
        SuccessLevel::Fumble
    } else {
        SuccessLevel::Failure
    }
}

fn is_fumble(roll: i64, target: i64) -> bool {
    if target < 50 {
        roll >= 96
    } else {
        roll == 100
    }
}
