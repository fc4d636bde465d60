//! Skill catalogue entries
//!
//! Skill definitions are static per rule system and never mutated at runtime.
//! Character-specific proficiency lives in [`crate::SkillState`].

use serde::Serialize;

/// A skill in a rule system's fixed catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDefinition {
    /// Stable identifier, unique within one system ("athletics", "esquivar")
    pub id: &'static str,
    /// Name shown on the character sheet
    pub display_name: &'static str,
    /// Attribute label whose score feeds the check
    pub governing_attribute: &'static str,
}

impl SkillDefinition {
    pub const fn new(
        id: &'static str,
        display_name: &'static str,
        governing_attribute: &'static str,
    ) -> Self {
        Self {
            id,
            display_name,
            governing_attribute,
        }
    }
}
