//! Read-only character snapshot fed to the skill resolver
//!
//! Supplied by the character catalogue; the rules core never writes it back.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ids::CharacterId;
use crate::value_objects::{AttributeSet, SkillState};

/// Everything a skill check needs to know about a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSheet {
    pub character_id: CharacterId,
    pub name: String,
    pub level: i32,
    pub attributes: AttributeSet,
    /// Overlays keyed by skill id; missing entries mean `{ false, 0 }`
    #[serde(default)]
    pub skills: HashMap<String, SkillState>,
}

impl CharacterSheet {
    pub fn new(character_id: CharacterId, name: impl Into<String>, level: i32) -> Self {
        Self {
            character_id,
            name: name.into(),
            level,
            attributes: AttributeSet::new(),
            skills: HashMap::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: AttributeSet) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_skill(mut self, skill_id: &str, state: SkillState) -> Self {
        self.skills.insert(skill_id.to_string(), state);
        self
    }

    pub fn skill_state(&self, skill_id: &str) -> SkillState {
        self.skills.get(skill_id).copied().unwrap_or_default()
    }
}
