//! d20 rule profiles.
//!
//! Two catalogues share one numeric policy:
//! - `D20_ABILITY` uses the familiar six abilities (STR, DEX, CON, INT, WIS, CHA)
//! - `D20_CUSTOM` uses localized labels (FOR, DES, CON, INT, SAB, CAR)
//!
//! A check is `d20 + modifier + (proficient ? proficiency bonus : 0) + extra bonus`
//! where `modifier = floor((score - 10) / 2)`.

use crate::entities::SkillDefinition;

/// Default score for an attribute the character never set
pub const DEFAULT_SCORE: i32 = 10;

/// Die rolled for every d20 check
pub const CHECK_DIE: u32 = 20;

/// Ability modifier, `floor((score - 10) / 2)`.
///
/// Rust's `/` truncates toward zero, so `div_euclid` is used to floor for
/// scores below 10. Extreme or negative scores are legal and never panic.
pub fn ability_modifier(score: i32) -> i32 {
    ((score as i64 - 10).div_euclid(2)) as i32
}

/// Level-scaled proficiency bonus
pub fn proficiency_bonus(level: i32) -> i32 {
    match level {
        l if l >= 17 => 6,
        l if l >= 13 => 5,
        l if l >= 9 => 4,
        l if l >= 5 => 3,
        _ => 2,
    }
}

pub const ABILITY_ATTRIBUTES: &[&str] = &["STR", "DEX", "CON", "INT", "WIS", "CHA"];

pub const ABILITY_SKILLS: &[SkillDefinition] = &[
    SkillDefinition::new("acrobatics", "Acrobatics", "DEX"),
    SkillDefinition::new("animal_handling", "Animal Handling", "WIS"),
    SkillDefinition::new("arcana", "Arcana", "INT"),
    SkillDefinition::new("athletics", "Athletics", "STR"),
    SkillDefinition::new("deception", "Deception", "CHA"),
    SkillDefinition::new("history", "History", "INT"),
    SkillDefinition::new("insight", "Insight", "WIS"),
    SkillDefinition::new("intimidation", "Intimidation", "CHA"),
    SkillDefinition::new("investigation", "Investigation", "INT"),
    SkillDefinition::new("medicine", "Medicine", "WIS"),
    SkillDefinition::new("nature", "Nature", "INT"),
    SkillDefinition::new("perception", "Perception", "WIS"),
    SkillDefinition::new("performance", "Performance", "CHA"),
    SkillDefinition::new("persuasion", "Persuasion", "CHA"),
    SkillDefinition::new("religion", "Religion", "INT"),
    SkillDefinition::new("sleight_of_hand", "Sleight of Hand", "DEX"),
    SkillDefinition::new("stealth", "Stealth", "DEX"),
    SkillDefinition::new("survival", "Survival", "WIS"),
];

pub const CUSTOM_ATTRIBUTES: &[&str] = &["FOR", "DES", "CON", "INT", "SAB", "CAR"];

pub const CUSTOM_SKILLS: &[SkillDefinition] = &[
    SkillDefinition::new("acrobacia", "Acrobacia", "DES"),
    SkillDefinition::new("adestrar_animais", "Adestrar Animais", "SAB"),
    SkillDefinition::new("arcanismo", "Arcanismo", "INT"),
    SkillDefinition::new("atletismo", "Atletismo", "FOR"),
    SkillDefinition::new("atuacao", "Atuação", "CAR"),
    SkillDefinition::new("enganacao", "Enganação", "CAR"),
    SkillDefinition::new("furtividade", "Furtividade", "DES"),
    SkillDefinition::new("historia", "História", "INT"),
    SkillDefinition::new("intimidacao", "Intimidação", "CAR"),
    SkillDefinition::new("intuicao", "Intuição", "SAB"),
    SkillDefinition::new("investigacao", "Investigação", "INT"),
    SkillDefinition::new("medicina", "Medicina", "SAB"),
    SkillDefinition::new("natureza", "Natureza", "INT"),
    SkillDefinition::new("percepcao", "Percepção", "SAB"),
    SkillDefinition::new("persuasao", "Persuasão", "CAR"),
    SkillDefinition::new("prestidigitacao", "Prestidigitação", "DES"),
    SkillDefinition::new("religiao", "Religião", "INT"),
    SkillDefinition::new("sobrevivencia", "Sobrevivência", "SAB"),
];

/// Additive parts of a d20 check, kept apart from the die so the breakdown
/// can show where each point came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct D20Bonuses {
    pub ability_modifier: i32,
    /// Zero when the character is not proficient
    pub proficiency_bonus: i32,
    pub extra_bonus: i32,
}

impl D20Bonuses {
    pub fn compute(attribute_value: i32, is_proficient: bool, extra_bonus: i32, level: i32) -> Self {
        Self {
            ability_modifier: ability_modifier(attribute_value),
            proficiency_bonus: if is_proficient {
                proficiency_bonus(level)
            } else {
                0
            },
            extra_bonus,
        }
    }

    pub fn total(&self) -> i64 {
        self.ability_modifier as i64 + self.proficiency_bonus as i64 + self.extra_bonus as i64
    }

    /// e.g. "1d20+6 (mod +2, prof +3, bonus +1)"
    pub fn describe(&self) -> String {
        let mut parts = vec![format!("mod {:+}", self.ability_modifier)];
        if self.proficiency_bonus != 0 {
            parts.push(format!("prof {:+}", self.proficiency_bonus));
        }
        if self.extra_bonus != 0 {
            parts.push(format!("bonus {:+}", self.extra_bonus));
        }
        let total = self.total();
        let head = if total == 0 {
            format!("1d{}", CHECK_DIE)
        } else {
            format!("1d{}{:+}", CHECK_DIE, total)
        };
        format!("{} ({})", head, parts.join(", "))
    }
}
