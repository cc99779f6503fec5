//! Theme commands.

use std::io::Write;

use member_ledger::KeyValueStore;
use member_ledger::services::Preferences;
use member_ledger_core::Theme;

use super::{CommandError, require_session};

/// Print the saved theme.
pub fn show<S: KeyValueStore + ?Sized>(store: &S) -> Result<(), CommandError> {
    require_session(store)?;
    let theme = Preferences::new(store).theme()?;
    writeln!(std::io::stdout().lock(), "{theme}")?;
    Ok(())
}

/// Save `theme`.
pub fn set<S: KeyValueStore + ?Sized>(store: &S, theme: Theme) -> Result<(), CommandError> {
    require_session(store)?;
    Preferences::new(store).set_theme(theme)?;
    writeln!(std::io::stdout().lock(), "Theme set to {theme}")?;
    Ok(())
}

/// Switch between dark and light.
pub fn toggle<S: KeyValueStore + ?Sized>(store: &S) -> Result<(), CommandError> {
    require_session(store)?;
    let theme = Preferences::new(store).toggle_theme()?;
    writeln!(std::io::stdout().lock(), "Theme set to {theme}")?;
    Ok(())
}
