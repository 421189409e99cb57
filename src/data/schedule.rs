use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable identity of a schedule entry, assigned at creation and never reused.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub id: EntryId,
    pub text: String,
}

/// In-memory schedules keyed by `yyyy-MM-dd`.
///
/// A missing key reads as an empty list; the last entry removed from a date
/// removes the key as well. Entries keep insertion order.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ScheduleStore {
    days: BTreeMap<String, Vec<ScheduleEntry>>,
    next_id: u64,
}

impl ScheduleStore {
    /// Appends `text` to the end of `date_key`'s list. Blank text is ignored.
    pub fn add(&mut self, date_key: &str, text: &str) -> Option<EntryId> {
        if text.trim().is_empty() {
            return None;
        }
        self.next_id += 1;
        let id = EntryId(self.next_id);
        self.days
            .entry(date_key.to_string())
            .or_default()
            .push(ScheduleEntry {
                id,
                text: text.to_string(),
            });
        debug!("schedule added date={} id={}", date_key, id.0);
        Some(id)
    }

    /// Replaces the entry at `index` in place.
    pub fn edit(&mut self, date_key: &str, index: usize, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        match self.days.get_mut(date_key).and_then(|l| l.get_mut(index)) {
            Some(entry) => {
                entry.text = text.to_string();
                debug!("schedule edited date={} id={}", date_key, entry.id.0);
                true
            }
            None => false,
        }
    }

    pub fn edit_by_id(&mut self, date_key: &str, id: EntryId, text: &str) -> bool {
        match self.position_of(date_key, id) {
            Some(index) => self.edit(date_key, index, text),
            None => false,
        }
    }

    /// Removes the entry at `index`; later entries shift down by one.
    pub fn delete(&mut self, date_key: &str, index: usize) -> bool {
        let Some(list) = self.days.get_mut(date_key) else {
            return false;
        };
        if index >= list.len() {
            return false;
        }
        let removed = list.remove(index);
        if list.is_empty() {
            self.days.remove(date_key);
        }
        debug!("schedule deleted date={} id={}", date_key, removed.id.0);
        true
    }

    pub fn delete_by_id(&mut self, date_key: &str, id: EntryId) -> bool {
        match self.position_of(date_key, id) {
            Some(index) => self.delete(date_key, index),
            None => false,
        }
    }

    pub fn count_for(&self, date_key: &str) -> usize {
        self.days.get(date_key).map(|l| l.len()).unwrap_or(0)
    }

    pub fn entries_for(&self, date_key: &str) -> &[ScheduleEntry] {
        self.days.get(date_key).map(|l| l.as_slice()).unwrap_or(&[])
    }

    /// Entry texts for `date_key` in display order.
    pub fn texts_for(&self, date_key: &str) -> Vec<&str> {
        self.entries_for(date_key)
            .iter()
            .map(|e| e.text.as_str())
            .collect()
    }

    pub fn entry_at(&self, date_key: &str, index: usize) -> Option<&ScheduleEntry> {
        self.entries_for(date_key).get(index)
    }

    pub fn position_of(&self, date_key: &str, id: EntryId) -> Option<usize> {
        self.entries_for(date_key).iter().position(|e| e.id == id)
    }

    /// Dates that currently hold at least one entry, in key order.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.days.keys().map(|k| k.as_str())
    }

    pub fn total(&self) -> usize {
        self.days.values().map(|l| l.len()).sum()
    }
}
