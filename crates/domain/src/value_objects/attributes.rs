//! Attribute scores and per-skill customization overlays
//!
//! Both are owned by the character record; the rules core only reads them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from system-specific attribute label ("STR", "FOR", "POD", ...) to score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet(BTreeMap<String, i32>);

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, label: &str, score: i32) -> Self {
        self.set(label, score);
        self
    }

    /// Labels are stored upper-case so "str" and "STR" address the same score
    pub fn set(&mut self, label: &str, score: i32) {
        self.0.insert(label.to_uppercase(), score);
    }

    pub fn get(&self, label: &str) -> Option<i32> {
        self.0.get(&label.to_uppercase()).copied()
    }

    /// Score for `label`, or `default` when the character never set it
    pub fn get_or(&self, label: &str, default: i32) -> i32 {
        self.get(label).unwrap_or(default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<const N: usize> From<[(&str, i32); N]> for AttributeSet {
    fn from(pairs: [(&str, i32); N]) -> Self {
        let mut set = Self::new();
        for (label, score) in pairs {
            set.set(label, score);
        }
        set
    }
}

/// Per-character overlay on a skill definition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillState {
    #[serde(default)]
    pub is_proficient: bool,
    #[serde(default)]
    pub extra_bonus: i32,
}

impl SkillState {
    pub fn new(is_proficient: bool, extra_bonus: i32) -> Self {
        Self {
            is_proficient,
            extra_bonus,
        }
    }

    pub fn proficient() -> Self {
        Self::new(true, 0)
    }
}
