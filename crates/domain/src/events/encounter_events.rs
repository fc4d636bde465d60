//! Encounter-related domain events
//!
//! Returned by [`crate::aggregates::Encounter`] mutations so callers can log
//! and persist exactly what changed.

use serde::{Deserialize, Serialize};

use crate::ids::EncounterEntryId;
use crate::value_objects::HitPoints;

/// Outcome of a successful encounter mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EncounterChange {
    #[serde(rename_all = "camelCase")]
    EntryRemoved {
        entry_id: EncounterEntryId,
        display_name: String,
    },
    #[serde(rename_all = "camelCase")]
    Renamed {
        entry_id: EncounterEntryId,
        from: String,
        to: String,
    },
    #[serde(rename_all = "camelCase")]
    InitiativeChanged {
        entry_id: EncounterEntryId,
        from: i32,
        to: i32,
    },
    /// Entry ids in their new `sortOrder`
    Reordered { order: Vec<EncounterEntryId> },
    #[serde(rename_all = "camelCase")]
    HitPointsChanged {
        entry_id: EncounterEntryId,
        from: HitPoints,
        to: HitPoints,
    },
    TurnChanged {
        round: u32,
        active: Option<EncounterEntryId>,
    },
    Closed,
}
