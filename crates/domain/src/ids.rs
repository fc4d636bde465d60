//! Typed identifiers.
//!
//! Every id is a v4 UUID newtype. They serialize as the bare UUID string so
//! collaborator records stay flat.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(
    /// A campaign, which fixes the rule system
    CampaignId
);
define_id!(
    /// A character record owned by the character catalogue
    CharacterId
);
define_id!(EncounterId);
define_id!(
    /// One combatant row inside an encounter
    EncounterEntryId
);
define_id!(CreatureTemplateId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_uuid() {
        let uuid = Uuid::new_v4();
        let id = EncounterId::from_uuid(uuid);
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(uuid.to_string()));

        let back: EncounterId = serde_json::from_value(json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn parses_display_form() {
        let id = CreatureTemplateId::new();
        let parsed: CreatureTemplateId = format!(" {id} ").parse().unwrap();
        assert_eq!(parsed, id);
        assert!("goblin".parse::<CreatureTemplateId>().is_err());
    }
}
