//! Positional record collections.
//!
//! A [`RecordCollection`] is the in-memory working copy of one stored list
//! (members or payments). Records are addressed by their position in the
//! collection. Filtering and sorting never reorder the collection itself;
//! they produce a [`View`] whose entries remember the real position of each
//! record, so an edit made from a filtered, sorted listing still lands on the
//! right row.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// A record that can live in a [`RecordCollection`].
pub trait Record {
    /// Stable identifier type.
    type Id: Copy + Eq + fmt::Display;

    /// The record's stable identifier.
    fn id(&self) -> Self::Id;

    /// Text fields matched by [`View::filter`].
    fn search_text(&self) -> impl Iterator<Item = &str>;
}

/// A field a collection of `T` can be sorted by.
pub trait SortKey<T> {
    /// Compare two records by this key, ascending.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Apply this direction to an ascending comparison.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("invalid sort direction: {other}")),
        }
    }
}

/// A sort key plus direction, written `<key>-<direction>` (e.g. `name-asc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SortSpec<K> {
    /// Field to sort by.
    pub key: K,
    /// Sort direction.
    pub direction: SortDirection,
}

impl<K> SortSpec<K> {
    /// Create a new sort spec.
    pub const fn new(key: K, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

impl<K: fmt::Display> fmt::Display for SortSpec<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.key, self.direction)
    }
}

impl<K: FromStr<Err = String>> FromStr for SortSpec<K> {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, direction) = s
            .trim()
            .rsplit_once('-')
            .ok_or_else(|| format!("invalid sort '{s}': expected <field>-<asc|desc>"))?;
        Ok(Self {
            key: key.parse()?,
            direction: direction.parse()?,
        })
    }
}

/// Compare two strings the way the list screens order names.
///
/// Case-insensitive first, so `ada` and `Bob` sort alphabetically rather
/// than by code point; the raw strings break ties so the order stays total.
#[must_use]
pub fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

/// Returns true if `record` matches an already-folded (trimmed, lowercased)
/// query. The empty query matches everything.
fn matches_query<T: Record>(record: &T, folded_query: &str) -> bool {
    folded_query.is_empty()
        || record
            .search_text()
            .any(|text| text.to_lowercase().contains(folded_query))
}

/// An ordered collection of records addressed by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordCollection<T> {
    records: Vec<T>,
}

impl<T> Default for RecordCollection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T> From<Vec<T>> for RecordCollection<T> {
    fn from(records: Vec<T>) -> Self {
        Self { records }
    }
}

impl<T> RecordCollection<T> {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the collection has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `position`, if any.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&T> {
        self.records.get(position)
    }

    /// Iterate records in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    /// Append `record` when `position` is `None`, otherwise replace the
    /// record at `position`. Returns the position the record now occupies.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidIndex`] if `position` is out of bounds.
    /// The collection is unchanged in that case.
    pub fn upsert(&mut self, position: Option<usize>, record: T) -> Result<usize, RecordError> {
        match position {
            None => {
                self.records.push(record);
                Ok(self.records.len() - 1)
            }
            Some(position) => {
                let len = self.records.len();
                let slot = self
                    .records
                    .get_mut(position)
                    .ok_or(RecordError::InvalidIndex { position, len })?;
                *slot = record;
                Ok(position)
            }
        }
    }

    /// Remove the record at `position`, shifting later records left.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidIndex`] if `position` is out of bounds.
    /// The collection is unchanged in that case.
    pub fn remove_at(&mut self, position: usize) -> Result<T, RecordError> {
        if position >= self.records.len() {
            return Err(RecordError::InvalidIndex {
                position,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(position))
    }

    /// All records, as a view in stored order.
    #[must_use]
    pub fn view(&self) -> View<'_, T> {
        View {
            entries: self
                .records
                .iter()
                .enumerate()
                .map(|(position, record)| Entry { position, record })
                .collect(),
        }
    }
}

impl<T: Record> RecordCollection<T> {
    /// Current position of the record with `id`.
    #[must_use]
    pub fn position_of(&self, id: T::Id) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    /// Like [`Self::position_of`], but fails with [`RecordError::UnknownId`].
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::UnknownId`] if no record carries `id`.
    pub fn require_position(&self, id: T::Id) -> Result<usize, RecordError> {
        self.position_of(id)
            .ok_or_else(|| RecordError::UnknownId(id.to_string()))
    }

    /// Records whose search text contains `query`, case-insensitively.
    #[must_use]
    pub fn filter(&self, query: &str) -> View<'_, T> {
        self.view().filter(query)
    }

    /// All records ordered by `key` in `direction`.
    #[must_use]
    pub fn sort<K: SortKey<T>>(&self, key: &K, direction: SortDirection) -> View<'_, T> {
        self.view().sort(key, direction)
    }
}

impl<'a, T> IntoIterator for &'a RecordCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A record together with its real position in the backing collection.
#[derive(Debug, PartialEq, Eq)]
pub struct Entry<'a, T> {
    /// Position in the backing [`RecordCollection`].
    pub position: usize,
    /// The record.
    pub record: &'a T,
}

impl<T> Clone for Entry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Entry<'_, T> {}

/// A filtered and/or sorted listing over a [`RecordCollection`].
#[derive(Debug, PartialEq, Eq)]
pub struct View<'a, T> {
    entries: Vec<Entry<'a, T>>,
}

impl<T> Clone for View<'_, T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<'a, T> View<'a, T> {
    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in view order.
    #[must_use]
    pub fn entries(&self) -> &[Entry<'a, T>] {
        &self.entries
    }

    /// Iterate entries in view order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry<'a, T>> {
        self.entries.iter()
    }

    /// Real positions, in view order.
    #[must_use]
    pub fn positions(&self) -> Vec<usize> {
        self.entries.iter().map(|entry| entry.position).collect()
    }

    /// Records, in view order.
    #[must_use]
    pub fn records(&self) -> Vec<&'a T> {
        self.entries.iter().map(|entry| entry.record).collect()
    }

    /// Stable sort by `key` in `direction`.
    ///
    /// Records that compare equal keep their relative order in either
    /// direction.
    #[must_use]
    pub fn sort<K: SortKey<T>>(mut self, key: &K, direction: SortDirection) -> Self {
        self.entries
            .sort_by(|a, b| direction.apply(key.compare(a.record, b.record)));
        self
    }
}

impl<T: Record> View<'_, T> {
    /// Keep entries whose search text contains `query`, case-insensitively.
    ///
    /// The query is trimmed; an empty query keeps everything. Filtering
    /// twice by the same query is the same as filtering once.
    #[must_use]
    pub fn filter(mut self, query: &str) -> Self {
        let folded = query.trim().to_lowercase();
        self.entries
            .retain(|entry| matches_query(entry.record, &folded));
        self
    }
}

impl<'a, T> IntoIterator for View<'a, T> {
    type Item = Entry<'a, T>;
    type IntoIter = std::vec::IntoIter<Entry<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'v, 'a, T> IntoIterator for &'v View<'a, T> {
    type Item = &'v Entry<'a, T>;
    type IntoIter = std::slice::Iter<'v, Entry<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
