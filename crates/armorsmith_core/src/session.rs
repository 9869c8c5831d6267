//! Single entry point for a designer working on one squad.
//!
//! A session owns one configuration, borrows the shared catalog and
//! optionally knows who will own the finished unit. All edits and commits
//! go through it, so the preview and the exported record always agree.

use crate::catalog::EquipmentCatalog;
use crate::collaborators::{PlayerId, PlayerRoster, UnitTransport};
use crate::config::{Configuration, Edit};
use crate::error::{ConstructionError, Result};
use crate::export::UnitRecord;
use crate::preview::{self, PreviewSnapshot};

/// One configuration being edited against a catalog.
#[derive(Debug, Clone)]
pub struct ConstructionSession<'a> {
    catalog: &'a EquipmentCatalog,
    config: Configuration,
    owner: Option<PlayerId>,
}

impl<'a> ConstructionSession<'a> {
    /// Start a session on a fresh default configuration.
    #[must_use]
    pub fn new(catalog: &'a EquipmentCatalog) -> Self {
        Self {
            catalog,
            config: Configuration::new(),
            owner: None,
        }
    }

    /// Start a session on an existing configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvariantViolation`] if the configuration
    /// references indices the tables do not have.
    pub fn from_config(catalog: &'a EquipmentCatalog, mut config: Configuration) -> Result<Self> {
        config.refresh(catalog)?;
        Ok(Self {
            catalog,
            config,
            owner: None,
        })
    }

    /// Resolve the owning player through a roster.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::NotFound`] if the roster has no such player.
    pub fn with_owner(mut self, roster: &dyn PlayerRoster, name: &str) -> Result<Self> {
        let owner = roster
            .lookup(name)
            .ok_or_else(|| ConstructionError::NotFound(format!("player '{name}'")))?;
        self.owner = Some(owner);
        Ok(self)
    }

    /// The catalog this session edits against.
    #[must_use]
    pub const fn catalog(&self) -> &'a EquipmentCatalog {
        self.catalog
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    /// Owning player, if resolved.
    #[must_use]
    pub const fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// Apply one edit and return the refreshed preview.
    ///
    /// # Errors
    ///
    /// See [`preview::on_edit`].
    pub fn edit(&mut self, edit: &Edit) -> Result<PreviewSnapshot> {
        preview::on_edit(&mut self.config, self.catalog, edit)
    }

    /// Apply several edits in order, stopping at the first error.
    ///
    /// Edits before the failing one stay applied, and derived state is
    /// refreshed either way.
    ///
    /// # Errors
    ///
    /// See [`preview::on_edit`].
    pub fn edit_all<'e>(&mut self, edits: impl IntoIterator<Item = &'e Edit>) -> Result<PreviewSnapshot> {
        let applied = edits
            .into_iter()
            .try_for_each(|edit| self.config.apply(self.catalog, edit));
        self.config.refresh(self.catalog)?;
        applied?;
        preview::preview(&self.config, self.catalog)
    }

    /// Preview without editing.
    ///
    /// # Errors
    ///
    /// See [`preview::preview`].
    pub fn preview(&self) -> Result<PreviewSnapshot> {
        preview::preview(&self.config, self.catalog)
    }

    /// Validate and export, attaching the owner when known.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::Validation`] if the configuration is not
    /// legal.
    pub fn commit(&self) -> Result<UnitRecord> {
        let record = preview::commit(&self.config, self.catalog)?;
        Ok(match self.owner {
            Some(owner) => record.with_owner(owner),
            None => record,
        })
    }

    /// Commit and hand the record to a transport.
    ///
    /// Returns a copy of the delivered record.
    ///
    /// # Errors
    ///
    /// Same as [`Self::commit`]. Nothing is delivered on error.
    pub fn commit_and_deliver(&self, transport: &dyn UnitTransport) -> Result<UnitRecord> {
        let record = self.commit()?;
        transport.deliver(record.clone());
        Ok(record)
    }

    /// End the session and keep the configuration.
    #[must_use]
    pub fn into_config(self) -> Configuration {
        self.config
    }
}
