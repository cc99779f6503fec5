//! Display preferences.

use member_ledger_core::Theme;

use crate::store::{KeyValueStore, StoreError, StoreKey, read_json, write_json};

/// Reads and writes the theme preference.
pub struct Preferences<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> Preferences<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The saved theme; dark when nothing valid is stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn theme(&self) -> Result<Theme, StoreError> {
        Ok(read_json(self.store, StoreKey::Theme)?.unwrap_or_default())
    }

    /// Save `theme`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn set_theme(&self, theme: Theme) -> Result<(), StoreError> {
        write_json(self.store, StoreKey::Theme, &theme)?;
        tracing::debug!(%theme, "Theme updated");
        Ok(())
    }

    /// Switch to the other theme and return it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn toggle_theme(&self) -> Result<Theme, StoreError> {
        let theme = self.theme()?.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }
}
