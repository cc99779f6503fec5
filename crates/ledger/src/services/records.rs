//! Store-backed record lists.
//!
//! [`RecordList`] owns the working copy of one stored collection. Every
//! mutation is applied to a copy, written to the store, and only then
//! swapped in, so a rejected edit or a failed write leaves both the store
//! and the working copy exactly as they were.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use member_ledger_core::{Record, RecordCollection, RecordError};

use crate::store::{KeyValueStore, StoreError, StoreKey, read_json, write_json};

/// Errors from member and payment operations.
#[derive(Debug, Error)]
pub enum RecordServiceError {
    /// Validation or indexing failure; nothing was written.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Store read/write error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// The working copy of one stored collection.
pub struct RecordList<'a, S: ?Sized, T> {
    store: &'a S,
    key: StoreKey,
    records: RecordCollection<T>,
}

impl<'a, S, T> RecordList<'a, S, T>
where
    S: KeyValueStore + ?Sized,
    T: Record + Clone + Serialize + DeserializeOwned,
{
    /// Load the collection stored under `key`.
    ///
    /// Absent or malformed data loads as an empty collection. Records saved
    /// without an id are given one, and the collection is written back so
    /// those ids stay stable.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read, or the id
    /// migration cannot be written.
    pub fn load(store: &'a S, key: StoreKey) -> Result<Self, StoreError> {
        let values: Vec<serde_json::Value> = read_json(store, key)?.unwrap_or_default();
        let missing_ids = values.iter().any(|value| value.get("id").is_none());

        let records = match values
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()
        {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Ignoring malformed stored records");
                Vec::new()
            }
        };

        let records = RecordCollection::from(records);
        if missing_ids && !records.is_empty() {
            write_json(store, key, &records)?;
            tracing::info!(key = %key, count = records.len(), "Assigned ids to stored records");
        }

        Ok(Self {
            store,
            key,
            records,
        })
    }

    /// The current working copy.
    #[must_use]
    pub const fn records(&self) -> &RecordCollection<T> {
        &self.records
    }

    /// Append (`position` is `None`) or replace a record, then persist.
    ///
    /// # Errors
    ///
    /// Returns `RecordServiceError::Record` for an out-of-bounds position
    /// and `RecordServiceError::Store` if the write fails.
    pub fn upsert(&mut self, position: Option<usize>, record: T) -> Result<usize, RecordServiceError> {
        let mut next = self.records.clone();
        let position = next.upsert(position, record)?;
        self.commit(next)?;
        Ok(position)
    }

    /// Remove the record at `position`, then persist.
    ///
    /// # Errors
    ///
    /// Returns `RecordServiceError::Record` for an out-of-bounds position
    /// and `RecordServiceError::Store` if the write fails.
    pub fn remove_at(&mut self, position: usize) -> Result<T, RecordServiceError> {
        let mut next = self.records.clone();
        let removed = next.remove_at(position)?;
        self.commit(next)?;
        Ok(removed)
    }

    fn commit(&mut self, next: RecordCollection<T>) -> Result<(), StoreError> {
        write_json(self.store, self.key, &next)?;
        self.records = next;
        Ok(())
    }
}
