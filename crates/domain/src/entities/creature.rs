//! Creature catalogue entries

use serde::{Deserialize, Serialize};

use crate::ids::CreatureTemplateId;
use crate::value_objects::{DifficultyRating, HitPoints};

/// Read-only creature definition from the campaign's bestiary.
///
/// Used by the budget planner and to seed new encounter entries; the rules
/// core never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureTemplate {
    pub id: CreatureTemplateId,
    pub name: String,
    pub difficulty_rating: DifficultyRating,
    pub hp: i32,
    pub ac: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creature_type: Option<String>,
}

impl CreatureTemplate {
    pub fn new(name: impl Into<String>, difficulty_rating: DifficultyRating, hp: i32, ac: i32) -> Self {
        Self {
            id: CreatureTemplateId::new(),
            name: name.into(),
            difficulty_rating,
            hp,
            ac,
            creature_type: None,
        }
    }

    pub fn with_type(mut self, creature_type: impl Into<String>) -> Self {
        self.creature_type = Some(creature_type.into());
        self
    }

    /// Starting hit points for a fresh instance. Negative catalogue values become 0.
    pub fn starting_hit_points(&self) -> HitPoints {
        HitPoints::full(self.hp.max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_fractional_rating_from_number() {
        let json = r#"{
            "id": "6f1c3d4e-8a2b-4c5d-9e0f-1a2b3c4d5e6f",
            "name": "Goblin",
            "difficultyRating": 0.25,
            "hp": 7,
            "ac": 15
        }"#;
        let goblin: CreatureTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(goblin.difficulty_rating.to_string(), "1/4");
        assert_eq!(goblin.creature_type, None);
        assert_eq!(goblin.starting_hit_points(), HitPoints::full(7));
    }

    #[test]
    fn rejects_negative_rating() {
        let json = r#"{
            "id": "6f1c3d4e-8a2b-4c5d-9e0f-1a2b3c4d5e6f",
            "name": "Oddity",
            "difficultyRating": -1,
            "hp": 1,
            "ac": 10
        }"#;
        assert!(serde_json::from_str::<CreatureTemplate>(json).is_err());
    }
}
