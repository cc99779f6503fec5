//! Members.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::required;
use crate::collection::{Record, SortKey, collate};
use crate::error::RecordError;
use crate::types::MemberId;

/// A member of the organisation.
///
/// `name`, `dob` and `description` are always non-empty and trimmed.
/// Records stored before ids existed get a fresh id when loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default = "MemberId::generate")]
    pub id: MemberId,
    pub name: String,
    /// Date of birth as entered, normally `YYYY-MM-DD`.
    pub dob: String,
    pub description: String,
}

impl Member {
    /// Date of birth, if `dob` is an ISO date.
    #[must_use]
    pub fn birth_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.dob.trim(), "%Y-%m-%d").ok()
    }

    /// Age in completed years on `today`.
    ///
    /// `None` when the date of birth cannot be parsed or lies after `today`.
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        today.years_since(self.birth_date()?)
    }
}

impl Record for Member {
    type Id = MemberId;

    fn id(&self) -> MemberId {
        self.id
    }

    fn search_text(&self) -> impl Iterator<Item = &str> {
        [self.name.as_str(), self.description.as_str()].into_iter()
    }
}

/// Raw member form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDraft {
    pub name: String,
    pub dob: String,
    pub description: String,
}

impl MemberDraft {
    /// Validate the form and build a member carrying `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::ValidationFailed`] if any field is empty after
    /// trimming.
    pub fn build(&self, id: MemberId) -> Result<Member, RecordError> {
        Ok(Member {
            id,
            name: required("name", &self.name)?,
            dob: required("date of birth", &self.dob)?,
            description: required("description", &self.description)?,
        })
    }
}

impl From<&Member> for MemberDraft {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            dob: member.dob.clone(),
            description: member.description.clone(),
        }
    }
}

/// Fields members can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MemberSortKey {
    #[default]
    Name,
}

impl SortKey<Member> for MemberSortKey {
    fn compare(&self, a: &Member, b: &Member) -> Ordering {
        match self {
            Self::Name => collate(&a.name, &b.name),
        }
    }
}

impl std::fmt::Display for MemberSortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
        }
    }
}

impl std::str::FromStr for MemberSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(Self::Name),
            other => Err(format!("invalid member sort field: {other}")),
        }
    }
}
