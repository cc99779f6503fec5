//! Member registry.

use member_ledger_core::{
    Member, MemberDraft, MemberId, MemberSortKey, RecordCollection, RecordError, SortSpec, View,
};

use super::records::{RecordList, RecordServiceError};
use crate::store::{KeyValueStore, StoreError, StoreKey};

/// Owner of the stored member list.
pub struct MemberRegistry<'a, S: ?Sized> {
    list: RecordList<'a, S, Member>,
}

impl<'a, S: KeyValueStore + ?Sized> MemberRegistry<'a, S> {
    /// Load the member list from `store`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn load(store: &'a S) -> Result<Self, StoreError> {
        Ok(Self {
            list: RecordList::load(store, StoreKey::Members)?,
        })
    }

    /// All members in stored order.
    #[must_use]
    pub const fn members(&self) -> &RecordCollection<Member> {
        self.list.records()
    }

    /// Add a member (`position` is `None`) or replace the member at
    /// `position`. An edited member keeps its id.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::ValidationFailed` if the form is incomplete and
    /// `RecordError::InvalidIndex` for an out-of-bounds position. Nothing is
    /// written in either case.
    pub fn save(
        &mut self,
        position: Option<usize>,
        draft: &MemberDraft,
    ) -> Result<&Member, RecordServiceError> {
        let id = match position {
            Some(position) => self.stored(position)?.id,
            None => MemberId::generate(),
        };
        let member = draft.build(id)?;

        let position = self.list.upsert(position, member)?;
        tracing::debug!(position, %id, "Saved member");
        self.stored(position)
    }

    /// Replace the member with `id`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::UnknownId` if no member has `id`, otherwise as
    /// [`Self::save`].
    pub fn save_by_id(
        &mut self,
        id: MemberId,
        draft: &MemberDraft,
    ) -> Result<&Member, RecordServiceError> {
        let position = self.members().require_position(id)?;
        self.save(Some(position), draft)
    }

    /// Delete the member at `position`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::InvalidIndex` for an out-of-bounds position.
    pub fn remove(&mut self, position: usize) -> Result<Member, RecordServiceError> {
        let removed = self.list.remove_at(position)?;
        tracing::debug!(position, id = %removed.id, "Removed member");
        Ok(removed)
    }

    /// Delete the member with `id`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::UnknownId` if no member has `id`.
    pub fn remove_by_id(&mut self, id: MemberId) -> Result<Member, RecordServiceError> {
        let position = self.members().require_position(id)?;
        self.remove(position)
    }

    /// Members matching `query` (name or description), ordered by `sort`.
    #[must_use]
    pub fn list(&self, query: &str, sort: SortSpec<MemberSortKey>) -> View<'_, Member> {
        self.members()
            .filter(query)
            .sort(&sort.key, sort.direction)
    }

    fn stored(&self, position: usize) -> Result<&Member, RecordServiceError> {
        let len = self.members().len();
        self.members()
            .get(position)
            .ok_or_else(|| RecordError::InvalidIndex { position, len }.into())
    }
}
