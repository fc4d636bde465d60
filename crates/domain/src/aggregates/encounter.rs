//! Encounter aggregate - ordered turn tracker for one combat
//!
//! # Invariants
//!
//! - `entries()` is always ordered by `sort_order`
//! - Immediately after [`Encounter::reorder`] (or the initiative sort built on it)
//!   `sort_order` values are `0..N-1`, unique and contiguous
//! - A bare [`Encounter::remove`] leaves a gap; new entries take `max + 1`
//! - Once closed, every mutation fails with `EncounterClosed`
//!
//! Display names are disambiguated on insert from the entries present at call
//! time: the first "Goblin" stays unsuffixed, the next becomes "Goblin B".

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::entities::CreatureTemplate;
use crate::error::DomainError;
use crate::events::EncounterChange;
use crate::ids::{CampaignId, CharacterId, CreatureTemplateId, EncounterEntryId, EncounterId};
use crate::value_objects::HitPoints;

/// Lifecycle of an encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EncounterStatus {
    #[default]
    Active,
    Closed,
}

/// Where an entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum CombatantSource {
    Creature(CreatureTemplateId),
    Character(CharacterId),
}

/// Input for [`Encounter::add_entry`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combatant {
    pub base_name: String,
    pub source: CombatantSource,
    pub hit_points: HitPoints,
    pub armor_class: Option<i32>,
    pub initiative: i32,
}

impl Combatant {
    /// A fresh creature at full health
    pub fn creature(template: &CreatureTemplate) -> Self {
        Self {
            base_name: template.name.clone(),
            source: CombatantSource::Creature(template.id),
            hit_points: template.starting_hit_points(),
            armor_class: Some(template.ac),
            initiative: 0,
        }
    }

    /// A player character; its name comes from the linked character record
    pub fn character(character_id: CharacterId, name: impl Into<String>, hit_points: HitPoints) -> Self {
        Self {
            base_name: name.into(),
            source: CombatantSource::Character(character_id),
            hit_points,
            armor_class: None,
            initiative: 0,
        }
    }

    pub fn with_initiative(mut self, initiative: i32) -> Self {
        self.initiative = initiative;
        self
    }

    pub fn with_armor_class(mut self, armor_class: i32) -> Self {
        self.armor_class = Some(armor_class);
        self
    }
}

/// One combatant in the turn order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterEntry {
    id: EncounterEntryId,
    display_name: String,
    initiative: i32,
    hit_points: HitPoints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    armor_class: Option<i32>,
    source: CombatantSource,
    sort_order: u32,
}

impl EncounterEntry {
    /// Rebuild a stored entry
    pub fn restore(
        id: EncounterEntryId,
        display_name: impl Into<String>,
        initiative: i32,
        hit_points: HitPoints,
        armor_class: Option<i32>,
        source: CombatantSource,
        sort_order: u32,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            initiative,
            hit_points,
            armor_class,
            source,
            sort_order,
        }
    }

    pub fn id(&self) -> EncounterEntryId {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn initiative(&self) -> i32 {
        self.initiative
    }

    pub fn hit_points(&self) -> HitPoints {
        self.hit_points
    }

    pub fn hp_current(&self) -> i32 {
        self.hit_points.current()
    }

    pub fn hp_max(&self) -> i32 {
        self.hit_points.max()
    }

    pub fn armor_class(&self) -> Option<i32> {
        self.armor_class
    }

    pub fn source(&self) -> CombatantSource {
        self.source
    }

    pub fn is_player_controlled(&self) -> bool {
        matches!(self.source, CombatantSource::Character(_))
    }

    pub fn sort_order(&self) -> u32 {
        self.sort_order
    }
}

/// A bounded combat session with ordered initiative
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    id: EncounterId,
    campaign_id: CampaignId,
    status: EncounterStatus,
    round: u32,
    active_entry: Option<EncounterEntryId>,
    entries: Vec<EncounterEntry>,
}

impl Encounter {
    /// Start a new, empty, active encounter at round 1
    pub fn open(campaign_id: CampaignId) -> Self {
        Self::open_with_id(EncounterId::new(), campaign_id)
    }

    /// [`Encounter::open`] with a caller-chosen id, for seeded id sources
    pub fn open_with_id(id: EncounterId, campaign_id: CampaignId) -> Self {
        Self {
            id,
            campaign_id,
            status: EncounterStatus::Active,
            round: 1,
            active_entry: None,
            entries: Vec::new(),
        }
    }

    /// Rebuild from storage. Entries are put in `sort_order` order (stable for ties)
    /// and an active marker that no longer matches an entry is dropped.
    pub fn restore(
        id: EncounterId,
        campaign_id: CampaignId,
        status: EncounterStatus,
        round: u32,
        active_entry: Option<EncounterEntryId>,
        mut entries: Vec<EncounterEntry>,
    ) -> Self {
        entries.sort_by_key(|e| e.sort_order);
        let active_entry = active_entry.filter(|id| entries.iter().any(|e| e.id == *id));
        Self {
            id,
            campaign_id,
            status,
            round: round.max(1),
            active_entry,
            entries,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> EncounterId {
        self.id
    }

    pub fn campaign_id(&self) -> CampaignId {
        self.campaign_id
    }

    pub fn status(&self) -> EncounterStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == EncounterStatus::Active
    }

    /// Entries in `sort_order` order
    pub fn entries(&self) -> &[EncounterEntry] {
        &self.entries
    }

    pub fn entry(&self, entry_id: EncounterEntryId) -> Option<&EncounterEntry> {
        self.entries.iter().find(|e| e.id == entry_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Whose turn it is, if the turn cursor has started
    pub fn active_entry(&self) -> Option<&EncounterEntry> {
        self.active_entry.and_then(|id| self.entry(id))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a combatant at the end of the order, suffixing duplicate names.
    pub fn add_entry(&mut self, combatant: Combatant) -> Result<EncounterEntry, DomainError> {
        self.add_entry_with_id(EncounterEntryId::new(), combatant)
    }

    /// [`Encounter::add_entry`] with a caller-chosen id. Fails with
    /// `DuplicateEntry` when the id is already taken.
    pub fn add_entry_with_id(
        &mut self,
        entry_id: EncounterEntryId,
        combatant: Combatant,
    ) -> Result<EncounterEntry, DomainError> {
        self.ensure_active()?;
        if self.entry(entry_id).is_some() {
            return Err(DomainError::DuplicateEntry(entry_id));
        }

        let display_name = self.disambiguated_name(combatant.base_name.trim());
        let sort_order = self
            .entries
            .iter()
            .map(|e| e.sort_order + 1)
            .max()
            .unwrap_or(0);

        let entry = EncounterEntry {
            id: entry_id,
            display_name,
            initiative: combatant.initiative,
            hit_points: combatant.hit_points,
            armor_class: combatant.armor_class,
            source: combatant.source,
            sort_order,
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    /// Set `sort_order` to each id's position in `order`.
    ///
    /// `order` must list every current entry exactly once. Unknown ids fail
    /// with `UnknownEntry`; missing or repeated ids with `IncompleteOrder`.
    pub fn reorder(&mut self, order: &[EncounterEntryId]) -> Result<EncounterChange, DomainError> {
        self.ensure_active()?;

        if let Some(unknown) = order.iter().find(|id| self.entry(**id).is_none()) {
            return Err(DomainError::UnknownEntry(*unknown));
        }
        let distinct: HashSet<_> = order.iter().collect();
        if order.len() != self.entries.len() || distinct.len() != order.len() {
            return Err(DomainError::IncompleteOrder {
                given: order.len(),
                expected: self.entries.len(),
            });
        }

        for entry in &mut self.entries {
            if let Some(position) = order.iter().position(|id| *id == entry.id) {
                entry.sort_order = position as u32;
            }
        }
        self.entries.sort_by_key(|e| e.sort_order);

        Ok(EncounterChange::Reordered {
            order: order.to_vec(),
        })
    }

    /// Reorder by initiative, highest first; ties keep their current relative order.
    pub fn sort_by_initiative_descending(&mut self) -> Result<EncounterChange, DomainError> {
        let mut ranked: Vec<&EncounterEntry> = self.entries.iter().collect();
        // `sort_by` is stable
        ranked.sort_by(|a, b| b.initiative.cmp(&a.initiative));
        let order: Vec<EncounterEntryId> = ranked.into_iter().map(|e| e.id).collect();
        self.reorder(&order)
    }

    pub fn set_initiative(
        &mut self,
        entry_id: EncounterEntryId,
        value: i32,
    ) -> Result<EncounterChange, DomainError> {
        let entry = self.entry_mut(entry_id)?;
        let from = std::mem::replace(&mut entry.initiative, value);
        Ok(EncounterChange::InitiativeChanged {
            entry_id,
            from,
            to: value,
        })
    }

    /// Rename a GM-controlled entry. Player-controlled entries are rejected.
    pub fn rename(
        &mut self,
        entry_id: EncounterEntryId,
        new_name: impl Into<String>,
    ) -> Result<EncounterChange, DomainError> {
        let entry = self.entry_mut(entry_id)?;
        if entry.is_player_controlled() {
            return Err(DomainError::RenameNotAllowed(entry_id));
        }
        let to = new_name.into().trim().to_string();
        let from = std::mem::replace(&mut entry.display_name, to.clone());
        Ok(EncounterChange::Renamed { entry_id, from, to })
    }

    /// Delete an entry, leaving a gap in `sort_order`.
    ///
    /// If it held the turn, the turn passes to the entry after it.
    pub fn remove(&mut self, entry_id: EncounterEntryId) -> Result<EncounterChange, DomainError> {
        self.ensure_active()?;
        let position = self
            .position(entry_id)
            .ok_or(DomainError::UnknownEntry(entry_id))?;

        let removed = self.entries.remove(position);
        if self.active_entry == Some(entry_id) {
            self.active_entry = self.entries.get(position).map(|e| e.id);
        }

        Ok(EncounterChange::EntryRemoved {
            entry_id,
            display_name: removed.display_name,
        })
    }

    /// Store a combat result on an entry
    pub fn apply_hit_points(
        &mut self,
        entry_id: EncounterEntryId,
        hit_points: HitPoints,
    ) -> Result<EncounterChange, DomainError> {
        let entry = self.entry_mut(entry_id)?;
        let from = std::mem::replace(&mut entry.hit_points, hit_points);
        Ok(EncounterChange::HitPointsChanged {
            entry_id,
            from,
            to: hit_points,
        })
    }

    /// Advance the turn cursor in `sort_order`, wrapping into the next round.
    ///
    /// The first call starts with the top entry of round 1.
    pub fn next_turn(&mut self) -> Result<EncounterChange, DomainError> {
        self.ensure_active()?;
        let next = match self.active_position() {
            _ if self.entries.is_empty() => None,
            None => Some(0),
            Some(current) if current + 1 < self.entries.len() => Some(current + 1),
            Some(_) => {
                self.round += 1;
                Some(0)
            }
        };
        self.active_entry = next.map(|idx| self.entries[idx].id);
        Ok(self.turn_changed())
    }

    /// Step the turn cursor back, never before the top of round 1.
    pub fn previous_turn(&mut self) -> Result<EncounterChange, DomainError> {
        self.ensure_active()?;
        if let Some(current) = self.active_position() {
            let previous = if current > 0 {
                current - 1
            } else if self.round > 1 {
                self.round -= 1;
                self.entries.len() - 1
            } else {
                0
            };
            self.active_entry = Some(self.entries[previous].id);
        }
        Ok(self.turn_changed())
    }

    /// End the encounter. No further mutation is accepted.
    pub fn close(&mut self) -> Result<EncounterChange, DomainError> {
        self.ensure_active()?;
        self.status = EncounterStatus::Closed;
        self.active_entry = None;
        Ok(EncounterChange::Closed)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn ensure_active(&self) -> Result<(), DomainError> {
        match self.status {
            EncounterStatus::Active => Ok(()),
            EncounterStatus::Closed => Err(DomainError::EncounterClosed),
        }
    }

    fn position(&self, entry_id: EncounterEntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == entry_id)
    }

    fn active_position(&self) -> Option<usize> {
        self.active_entry.and_then(|id| self.position(id))
    }

    fn entry_mut(&mut self, entry_id: EncounterEntryId) -> Result<&mut EncounterEntry, DomainError> {
        self.ensure_active()?;
        self.entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or(DomainError::UnknownEntry(entry_id))
    }

    fn turn_changed(&self) -> EncounterChange {
        EncounterChange::TurnChanged {
            round: self.round,
            active: self.active_entry,
        }
    }

    /// `base` unless an entry is already called `base` or `base <LETTERS>`.
    ///
    /// The letter index counts every entry named `base` or starting with
    /// `base `, so "Goblin King" still moves the next duplicate along. Taken
    /// letters are skipped.
    fn disambiguated_name(&self, base: &str) -> String {
        let prefix = format!("{} ", base);
        let duplicated = self
            .entries
            .iter()
            .any(|e| e.display_name == base || is_letter_suffixed(&e.display_name, &prefix));
        if !duplicated {
            return base.to_string();
        }

        let existing = self
            .entries
            .iter()
            .filter(|e| e.display_name == base || e.display_name.starts_with(&prefix))
            .count();
        let taken: HashSet<&str> = self.entries.iter().map(|e| e.display_name.as_str()).collect();
        (existing..)
            .map(|idx| format!("{}{}", prefix, suffix_letters(idx)))
            .find(|candidate| !taken.contains(candidate.as_str()))
            .unwrap_or_else(|| format!("{}{}", prefix, suffix_letters(existing)))
    }
}

/// "Goblin B" or "Goblin AA" for prefix "Goblin "
fn is_letter_suffixed(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_uppercase()))
}

/// 0 -> "A", 25 -> "Z", 26 -> "AA", 27 -> "AB"
fn suffix_letters(mut idx: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (idx % 26) as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::DifficultyRating;

    fn goblin() -> CreatureTemplate {
        CreatureTemplate::new("Goblin", DifficultyRating::new(0.25).unwrap(), 7, 15)
    }

    fn encounter_with(names: &[(&str, i32)]) -> (Encounter, Vec<EncounterEntryId>) {
        let mut encounter = Encounter::open(CampaignId::new());
        let ids = names
            .iter()
            .map(|(name, initiative)| {
                let template =
                    CreatureTemplate::new(*name, DifficultyRating::new(1.0).unwrap(), 10, 12);
                encounter
                    .add_entry(Combatant::creature(&template).with_initiative(*initiative))
                    .unwrap()
                    .id()
            })
            .collect();
        (encounter, ids)
    }

    fn names(encounter: &Encounter) -> Vec<&str> {
        encounter.entries().iter().map(|e| e.display_name()).collect()
    }

    mod adding {
        use super::*;

        #[test]
        fn second_duplicate_gets_letter_b() {
            let mut encounter = Encounter::open(CampaignId::new());
            let first = encounter.add_entry(Combatant::creature(&goblin())).unwrap();
            let second = encounter.add_entry(Combatant::creature(&goblin())).unwrap();
            assert_eq!(first.display_name(), "Goblin");
            assert_eq!(second.display_name(), "Goblin B");
            assert_eq!(first.sort_order(), 0);
            assert_eq!(second.sort_order(), 1);
        }

        #[test]
        fn suffix_counts_current_entries_and_skips_taken_letters() {
            let mut encounter = Encounter::open(CampaignId::new());
            let _ = encounter.add_entry(Combatant::creature(&goblin())).unwrap();
            let b = encounter.add_entry(Combatant::creature(&goblin())).unwrap();
            let _ = encounter.add_entry(Combatant::creature(&goblin())).unwrap();
            assert_eq!(names(&encounter), vec!["Goblin", "Goblin B", "Goblin C"]);

            encounter.remove(b.id()).unwrap();
            let next = encounter.add_entry(Combatant::creature(&goblin())).unwrap();
            assert_eq!(next.display_name(), "Goblin D");
        }

        #[test]
        fn longer_name_sharing_a_prefix_is_not_a_duplicate() {
            let (mut encounter, _) = encounter_with(&[("Goblin King", 0)]);
            let plain = encounter.add_entry(Combatant::creature(&goblin())).unwrap();
            assert_eq!(plain.display_name(), "Goblin");

            // "Goblin King" and "Goblin" both count towards the letter
            let again = encounter.add_entry(Combatant::creature(&goblin())).unwrap();
            assert_eq!(again.display_name(), "Goblin C");
        }

        #[test]
        fn suffixed_survivor_still_marks_a_duplicate() {
            let mut encounter = Encounter::open(CampaignId::new());
            let first = encounter.add_entry(Combatant::creature(&goblin())).unwrap();
            encounter.add_entry(Combatant::creature(&goblin())).unwrap();
            encounter.remove(first.id()).unwrap();

            let next = encounter.add_entry(Combatant::creature(&goblin())).unwrap();
            assert_eq!(names(&encounter), vec!["Goblin B", "Goblin C"]);
            assert_eq!(next.display_name(), "Goblin C");
        }

        #[test]
        fn caller_chosen_ids_are_kept_and_must_be_unique() {
            let encounter_id = EncounterId::from_uuid(uuid::Uuid::from_u128(7));
            let mut encounter = Encounter::open_with_id(encounter_id, CampaignId::new());
            assert_eq!(encounter.id(), encounter_id);

            let entry_id = EncounterEntryId::from_uuid(uuid::Uuid::from_u128(8));
            let entry = encounter
                .add_entry_with_id(entry_id, Combatant::creature(&goblin()))
                .unwrap();
            assert_eq!(entry.id(), entry_id);

            let err = encounter
                .add_entry_with_id(entry_id, Combatant::creature(&goblin()))
                .unwrap_err();
            assert_eq!(err, DomainError::DuplicateEntry(entry_id));
            assert_eq!(encounter.len(), 1);
        }

        #[test]
        fn new_entry_follows_highest_sort_order() {
            let (mut encounter, ids) = encounter_with(&[("Orc", 0), ("Wolf", 0), ("Bat", 0)]);
            encounter.remove(ids[0]).unwrap();
            let added = encounter.add_entry(Combatant::creature(&goblin())).unwrap();
            assert_eq!(added.sort_order(), 3);
        }

        #[test]
        fn player_entry_is_player_controlled() {
            let mut encounter = Encounter::open(CampaignId::new());
            let pc = encounter
                .add_entry(Combatant::character(
                    CharacterId::new(),
                    "Iris",
                    HitPoints::new(8, 12).unwrap(),
                ))
                .unwrap();
            assert!(pc.is_player_controlled());
            assert_eq!(pc.hp_current(), 8);
            assert_eq!(pc.hp_max(), 12);
        }

        #[test]
        fn suffix_letters_continue_past_z() {
            assert_eq!(suffix_letters(0), "A");
            assert_eq!(suffix_letters(1), "B");
            assert_eq!(suffix_letters(25), "Z");
            assert_eq!(suffix_letters(26), "AA");
            assert_eq!(suffix_letters(27), "AB");
            assert_eq!(suffix_letters(52), "BA");
        }
    }

    mod ordering {
        use super::*;

        #[test]
        fn reorder_assigns_positions() {
            let (mut encounter, ids) = encounter_with(&[("Orc", 0), ("Wolf", 0), ("Bat", 0)]);
            let order = vec![ids[2], ids[0], ids[1]];
            encounter.reorder(&order).unwrap();

            for (idx, id) in order.iter().enumerate() {
                assert_eq!(encounter.entry(*id).unwrap().sort_order(), idx as u32);
            }
            assert_eq!(names(&encounter), vec!["Bat", "Orc", "Wolf"]);
        }

        #[test]
        fn reorder_closes_gaps_left_by_remove() {
            let (mut encounter, ids) = encounter_with(&[("Orc", 0), ("Wolf", 0), ("Bat", 0)]);
            encounter.remove(ids[1]).unwrap();
            assert_eq!(encounter.entry(ids[2]).unwrap().sort_order(), 2);

            encounter.reorder(&[ids[0], ids[2]]).unwrap();
            assert_eq!(encounter.entry(ids[2]).unwrap().sort_order(), 1);
        }

        #[test]
        fn reorder_rejects_unknown_id_without_mutating() {
            let (mut encounter, ids) = encounter_with(&[("Orc", 0), ("Wolf", 0)]);
            let stranger = EncounterEntryId::new();
            let err = encounter.reorder(&[ids[1], stranger]).unwrap_err();
            assert_eq!(err, DomainError::UnknownEntry(stranger));
            assert_eq!(names(&encounter), vec!["Orc", "Wolf"]);
        }

        #[test]
        fn reorder_rejects_partial_or_repeated_lists() {
            let (mut encounter, ids) = encounter_with(&[("Orc", 0), ("Wolf", 0)]);
            assert_eq!(
                encounter.reorder(&[ids[1]]).unwrap_err(),
                DomainError::IncompleteOrder { given: 1, expected: 2 }
            );
            assert_eq!(
                encounter.reorder(&[ids[1], ids[1]]).unwrap_err(),
                DomainError::IncompleteOrder { given: 2, expected: 2 }
            );
        }

        #[test]
        fn initiative_sort_is_descending_and_stable() {
            let (mut encounter, _) = encounter_with(&[
                ("Orc", 12),
                ("Wolf", 18),
                ("Bat", 12),
                ("Rat", 3),
                ("Imp", 12),
            ]);
            encounter.sort_by_initiative_descending().unwrap();
            assert_eq!(names(&encounter), vec!["Wolf", "Orc", "Bat", "Imp", "Rat"]);
            let orders: Vec<u32> = encounter.entries().iter().map(|e| e.sort_order()).collect();
            assert_eq!(orders, vec![0, 1, 2, 3, 4]);
        }

        #[test]
        fn restore_orders_by_sort_order() {
            let (encounter, ids) = encounter_with(&[("Orc", 0), ("Wolf", 0)]);
            let mut stored: Vec<EncounterEntry> = encounter.entries().to_vec();
            stored.reverse();
            let restored = Encounter::restore(
                encounter.id(),
                encounter.campaign_id(),
                EncounterStatus::Active,
                1,
                Some(EncounterEntryId::new()),
                stored,
            );
            assert_eq!(restored.entries()[0].id(), ids[0]);
            assert!(restored.active_entry().is_none());
        }
    }

    mod editing {
        use super::*;

        #[test]
        fn set_initiative_reports_previous_value() {
            let (mut encounter, ids) = encounter_with(&[("Orc", 4)]);
            let change = encounter.set_initiative(ids[0], 17).unwrap();
            assert_eq!(
                change,
                EncounterChange::InitiativeChanged {
                    entry_id: ids[0],
                    from: 4,
                    to: 17
                }
            );
            assert_eq!(encounter.entry(ids[0]).unwrap().initiative(), 17);
        }

        #[test]
        fn rename_creature() {
            let (mut encounter, ids) = encounter_with(&[("Orc", 0)]);
            encounter.rename(ids[0], "  Orc Chieftain ").unwrap();
            assert_eq!(encounter.entry(ids[0]).unwrap().display_name(), "Orc Chieftain");
        }

        #[test]
        fn rename_player_is_rejected() {
            let mut encounter = Encounter::open(CampaignId::new());
            let pc = encounter
                .add_entry(Combatant::character(CharacterId::new(), "Iris", HitPoints::full(10)))
                .unwrap();
            assert_eq!(
                encounter.rename(pc.id(), "Bob").unwrap_err(),
                DomainError::RenameNotAllowed(pc.id())
            );
        }

        #[test]
        fn unknown_entry_is_reported() {
            let (mut encounter, _) = encounter_with(&[("Orc", 0)]);
            let stranger = EncounterEntryId::new();
            assert_eq!(
                encounter.remove(stranger).unwrap_err(),
                DomainError::UnknownEntry(stranger)
            );
            assert_eq!(
                encounter.rename(stranger, "x").unwrap_err(),
                DomainError::UnknownEntry(stranger)
            );
            assert_eq!(
                encounter.set_initiative(stranger, 1).unwrap_err(),
                DomainError::UnknownEntry(stranger)
            );
        }

        #[test]
        fn apply_hit_points_stores_result() {
            let (mut encounter, ids) = encounter_with(&[("Orc", 0)]);
            let wounded = HitPoints::new(3, 10).unwrap();
            encounter.apply_hit_points(ids[0], wounded).unwrap();
            assert_eq!(encounter.entry(ids[0]).unwrap().hit_points(), wounded);
        }
    }

    mod turns {
        use super::*;

        #[test]
        fn next_turn_walks_order_and_wraps_rounds() {
            let (mut encounter, ids) = encounter_with(&[("Orc", 0), ("Wolf", 0)]);
            assert!(encounter.active_entry().is_none());

            encounter.next_turn().unwrap();
            assert_eq!(encounter.active_entry().unwrap().id(), ids[0]);
            encounter.next_turn().unwrap();
            assert_eq!(encounter.active_entry().unwrap().id(), ids[1]);
            assert_eq!(encounter.round(), 1);

            let change = encounter.next_turn().unwrap();
            assert_eq!(
                change,
                EncounterChange::TurnChanged {
                    round: 2,
                    active: Some(ids[0])
                }
            );
        }

        #[test]
        fn previous_turn_stops_at_top_of_first_round() {
            let (mut encounter, ids) = encounter_with(&[("Orc", 0), ("Wolf", 0)]);
            encounter.next_turn().unwrap();
            encounter.next_turn().unwrap();
            encounter.next_turn().unwrap();
            assert_eq!(encounter.round(), 2);

            encounter.previous_turn().unwrap();
            assert_eq!(encounter.round(), 1);
            assert_eq!(encounter.active_entry().unwrap().id(), ids[1]);

            encounter.previous_turn().unwrap();
            encounter.previous_turn().unwrap();
            assert_eq!(encounter.round(), 1);
            assert_eq!(encounter.active_entry().unwrap().id(), ids[0]);
        }

        #[test]
        fn removing_active_entry_passes_turn() {
            let (mut encounter, ids) = encounter_with(&[("Orc", 0), ("Wolf", 0)]);
            encounter.next_turn().unwrap();
            encounter.remove(ids[0]).unwrap();
            assert_eq!(encounter.active_entry().unwrap().id(), ids[1]);
        }

        #[test]
        fn empty_encounter_has_no_turn() {
            let mut encounter = Encounter::open(CampaignId::new());
            let change = encounter.next_turn().unwrap();
            assert_eq!(change, EncounterChange::TurnChanged { round: 1, active: None });
        }
    }

    #[test]
    fn closed_encounter_rejects_mutation() {
        let (mut encounter, ids) = encounter_with(&[("Orc", 0)]);
        encounter.close().unwrap();
        assert!(!encounter.is_active());
        assert_eq!(
            encounter.add_entry(Combatant::creature(&goblin())).unwrap_err(),
            DomainError::EncounterClosed
        );
        assert_eq!(encounter.remove(ids[0]).unwrap_err(), DomainError::EncounterClosed);
        assert_eq!(encounter.next_turn().unwrap_err(), DomainError::EncounterClosed);
        assert_eq!(encounter.close().unwrap_err(), DomainError::EncounterClosed);
    }
}
