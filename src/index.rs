//! Alphabetical grouping of tune entries.
//!
//! Entries are bucketed by the uppercased first character of their title and
//! kept in arrival order until [`TuneIndex::finalize`] sorts every bucket once.
//! Arrival order matters: the sort is stable, so tunes whose titles differ only
//! by case stay in the order their files were walked and, within a file, the
//! order they were declared.

use crate::tune::TuneEntry;
use serde::Serialize;
use std::collections::BTreeMap;

/// Letter → entries map. Letters iterate in ascending order.
#[derive(Debug, Default, Serialize)]
pub struct TuneIndex {
    groups: BTreeMap<char, Vec<TuneEntry>>,
}

/// Bucket key for a title: its first character, uppercased.
///
/// `None` for an empty title.
pub fn group_letter(title: &str) -> Option<char> {
    title.chars().next()?.to_uppercase().next()
}

/// Sort key: the whole title, uppercased.
fn title_key(entry: &TuneEntry) -> String {
    entry.title.to_uppercase()
}

impl TuneIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to its letter group, creating the group if needed.
    ///
    /// Entries with an empty title never get here from the parser; if one
    /// does it is ignored.
    pub fn add(&mut self, entry: TuneEntry) {
        let Some(letter) = group_letter(&entry.title) else {
            return;
        };
        tracing::debug!(title = %entry.title, index = entry.index, "adding tune");
        self.groups.entry(letter).or_default().push(entry);
    }

    /// Sort each group by uppercased title. Equal keys keep arrival order.
    pub fn finalize(&mut self) {
        for entries in self.groups.values_mut() {
            entries.sort_by_cached_key(title_key);
        }
    }

    /// `(letter, entries)` pairs in ascending letter order.
    pub fn groups(&self) -> impl Iterator<Item = (char, &[TuneEntry])> {
        self.groups
            .iter()
            .map(|(&letter, entries)| (letter, entries.as_slice()))
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.groups.keys().copied()
    }

    pub fn group(&self, letter: char) -> Option<&[TuneEntry]> {
        self.groups.get(&letter).map(Vec::as_slice)
    }

    /// Total number of entries across all groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Extend<TuneEntry> for TuneIndex {
    fn extend<T: IntoIterator<Item = TuneEntry>>(&mut self, iter: T) {
        for entry in iter {
            self.add(entry);
        }
    }
}
