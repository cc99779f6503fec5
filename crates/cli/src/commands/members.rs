//! Member commands.
//!
//! # Usage
//!
//! ```bash
//! member-ledger members add -n "Ada Lovelace" -d 1815-12-10 --description "Founder"
//! member-ledger members list --search ada --sort name-desc
//! member-ledger members edit 0 --description "Honorary founder"
//! member-ledger members remove 0
//! ```

use std::io::Write;

use clap::Args;

use member_ledger::KeyValueStore;
use member_ledger::services::MemberRegistry;
use member_ledger_core::{Member, MemberDraft, MemberSortKey, RecordError, SortSpec};

use super::{CommandError, Target, require_session};

/// `members add` arguments.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Full name
    #[arg(short, long)]
    pub name: String,

    /// Date of birth (YYYY-MM-DD)
    #[arg(short, long)]
    pub dob: String,

    /// Short description
    #[arg(long)]
    pub description: String,
}

/// `members edit` arguments. Omitted fields keep their current value.
#[derive(Debug, Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub target: Target,

    /// New full name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New date of birth (YYYY-MM-DD)
    #[arg(short, long)]
    pub dob: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,
}

/// Print members matching `search`, in `sort` order, with their positions.
pub fn list<S: KeyValueStore + ?Sized>(
    store: &S,
    search: &str,
    sort: SortSpec<MemberSortKey>,
) -> Result<(), CommandError> {
    require_session(store)?;
    let registry = MemberRegistry::load(store)?;
    let view = registry.list(search, sort);

    let mut out = std::io::stdout().lock();
    if view.is_empty() {
        writeln!(out, "No members found.")?;
        return Ok(());
    }

    let today = chrono::Local::now().date_naive();
    for entry in &view {
        writeln!(out, "{}", row(entry.position, entry.record, today))?;
    }
    writeln!(out, "{} of {} members", view.len(), registry.members().len())?;
    Ok(())
}

/// Add a member.
pub fn add<S: KeyValueStore + ?Sized>(store: &S, args: AddArgs) -> Result<(), CommandError> {
    require_session(store)?;
    let mut registry = MemberRegistry::load(store)?;
    let draft = MemberDraft {
        name: args.name,
        dob: args.dob,
        description: args.description,
    };
    let member = registry.save(None, &draft)?;

    writeln!(std::io::stdout().lock(), "Added {} ({})", member.name, member.id)?;
    Ok(())
}

/// Edit a member in place.
pub fn edit<S: KeyValueStore + ?Sized>(store: &S, args: EditArgs) -> Result<(), CommandError> {
    require_session(store)?;
    let mut registry = MemberRegistry::load(store)?;
    let position = args.target.resolve(registry.members())?;

    let mut draft = registry
        .members()
        .get(position)
        .map(MemberDraft::from)
        .ok_or(RecordError::InvalidIndex {
            position,
            len: registry.members().len(),
        })?;
    if let Some(name) = args.name {
        draft.name = name;
    }
    if let Some(dob) = args.dob {
        draft.dob = dob;
    }
    if let Some(description) = args.description {
        draft.description = description;
    }

    let member = registry.save(Some(position), &draft)?;
    writeln!(std::io::stdout().lock(), "Updated {} ({})", member.name, member.id)?;
    Ok(())
}

/// Remove a member.
pub fn remove<S: KeyValueStore + ?Sized>(store: &S, target: &Target) -> Result<(), CommandError> {
    require_session(store)?;
    let mut registry = MemberRegistry::load(store)?;
    let position = target.resolve(registry.members())?;
    let removed = registry.remove(position)?;

    writeln!(std::io::stdout().lock(), "Removed {}", removed.name)?;
    Ok(())
}

fn row(position: usize, member: &Member, today: chrono::NaiveDate) -> String {
    let age = member
        .age_on(today)
        .map_or_else(String::new, |age| format!(" (age {age})"));
    format!(
        "[{position}] {} | born {}{age} | {}",
        member.name, member.dob, member.description
    )
}
