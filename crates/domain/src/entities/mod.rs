//! Domain entities - catalogue entries and character snapshots read by the rules core

mod character_sheet;
mod creature;
mod skill;

pub use character_sheet::CharacterSheet;
pub use creature::CreatureTemplate;
pub use skill::SkillDefinition;
