//! Command implementations.
//!
//! Every command takes the opened store, does its work through the ledger
//! services and writes its report to stdout. Diagnostics go through
//! `tracing` to stderr.

pub mod auth;
pub mod dashboard;
pub mod members;
pub mod payments;
pub mod theme;

use std::str::FromStr;

use clap::Args;
use thiserror::Error;

use member_ledger::services::{AuthError, AuthGate, RecordServiceError};
use member_ledger::{KeyValueStore, LedgerError, StoreError};
use member_ledger_core::{Record, RecordCollection, RecordError, Session};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The `--id` value is not a record id.
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// Neither a position nor an id was given.
    #[error("Give a position or --id")]
    MissingTarget,

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CommandError {
    /// Returns true if the input was rejected, as opposed to the store or
    /// terminal failing.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        match self {
            Self::Ledger(err) => err.is_user_error(),
            Self::InvalidId(_) | Self::MissingTarget => true,
            Self::Output(_) => false,
        }
    }
}

impl From<AuthError> for CommandError {
    fn from(err: AuthError) -> Self {
        Self::Ledger(err.into())
    }
}

impl From<RecordServiceError> for CommandError {
    fn from(err: RecordServiceError) -> Self {
        Self::Ledger(err.into())
    }
}

impl From<RecordError> for CommandError {
    fn from(err: RecordError) -> Self {
        Self::Ledger(err.into())
    }
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        Self::Ledger(err.into())
    }
}

/// Which record an `edit` or `remove` addresses.
#[derive(Debug, Args)]
pub struct Target {
    /// Position shown by `list`
    #[arg(required_unless_present = "id")]
    pub position: Option<usize>,

    /// Stable record id instead of a position
    #[arg(long, conflicts_with = "position")]
    pub id: Option<String>,
}

impl Target {
    /// Resolve to an occupied position in `records`.
    fn resolve<T>(&self, records: &RecordCollection<T>) -> Result<usize, CommandError>
    where
        T: Record,
        T::Id: FromStr,
    {
        match (self.position, self.id.as_deref()) {
            (Some(position), _) if position < records.len() => Ok(position),
            (Some(position), _) => Err(RecordError::InvalidIndex {
                position,
                len: records.len(),
            }
            .into()),
            (None, Some(raw)) => {
                let id = raw
                    .trim()
                    .parse::<T::Id>()
                    .map_err(|_| CommandError::InvalidId(raw.to_owned()))?;
                Ok(records.require_position(id)?)
            }
            (None, None) => Err(CommandError::MissingTarget),
        }
    }
}

/// The signed-in session, or `NotAuthenticated`.
fn require_session<S: KeyValueStore + ?Sized>(store: &S) -> Result<Session, CommandError> {
    Ok(AuthGate::new(store).require_session()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use member_ledger::MemoryStore;
    use member_ledger::services::MemberRegistry;
    use member_ledger_core::{Member, MemberDraft};

    use super::*;

    fn registry_with_one(store: &MemoryStore) -> Member {
        let mut registry = MemberRegistry::load(store).unwrap();
        registry
            .save(
                None,
                &MemberDraft {
                    name: "Ada".to_owned(),
                    dob: "1990-01-01".to_owned(),
                    description: "Founder".to_owned(),
                },
            )
            .unwrap()
            .clone()
    }

    #[test]
    fn test_target_by_position_and_id() {
        let store = MemoryStore::new();
        let ada = registry_with_one(&store);
        let registry = MemberRegistry::load(&store).unwrap();

        let by_position = Target {
            position: Some(0),
            id: None,
        };
        assert_eq!(by_position.resolve(registry.members()).unwrap(), 0);

        let by_id = Target {
            position: None,
            id: Some(ada.id.to_string()),
        };
        assert_eq!(by_id.resolve(registry.members()).unwrap(), 0);
    }

    #[test]
    fn test_target_rejects_position_past_end() {
        let store = MemoryStore::new();
        registry_with_one(&store);
        let registry = MemberRegistry::load(&store).unwrap();

        let past_end = Target {
            position: Some(1),
            id: None,
        };
        assert!(matches!(
            past_end.resolve(registry.members()),
            Err(CommandError::Ledger(LedgerError::Record(RecordError::InvalidIndex {
                position: 1,
                len: 1
            })))
        ));
    }

    #[test]
    fn test_target_rejects_bad_id() {
        let store = MemoryStore::new();
        registry_with_one(&store);
        let registry = MemberRegistry::load(&store).unwrap();

        let garbage = Target {
            position: None,
            id: Some("not-a-uuid".to_owned()),
        };
        assert!(matches!(
            garbage.resolve(registry.members()),
            Err(CommandError::InvalidId(_))
        ));

        let unknown = Target {
            position: None,
            id: Some("00000000-0000-0000-0000-000000000000".to_owned()),
        };
        assert!(matches!(
            unknown.resolve(registry.members()),
            Err(CommandError::Ledger(LedgerError::Record(RecordError::UnknownId(_))))
        ));
    }

    #[test]
    fn test_protected_commands_need_session() {
        let store = MemoryStore::new();
        assert!(matches!(
            require_session(&store),
            Err(CommandError::Ledger(LedgerError::Auth(AuthError::NotAuthenticated)))
        ));
    }
}
