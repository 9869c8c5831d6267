//! Narrow interfaces to the collaborators outside the rules engine:
//! player roster, unit persistence and unit transport.
//!
//! The engine never interprets collaborator failures; persistence errors
//! are returned unchanged through [`PersistenceError`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::export::{UnitRecord, RECORD_VERSION};

// ============================================================================
// Roster
// ============================================================================

/// Identity of a player who can own units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Resolves player names to identities.
pub trait PlayerRoster {
    /// Look up a player by name.
    fn lookup(&self, name: &str) -> Option<PlayerId>;
}

/// In-memory roster.
#[derive(Debug, Clone, Default)]
pub struct StaticRoster {
    players: HashMap<String, PlayerId>,
}

impl StaticRoster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player.
    #[must_use]
    pub fn with_player(mut self, name: impl Into<String>, id: PlayerId) -> Self {
        self.players.insert(name.into(), id);
        self
    }
}

impl PlayerRoster for StaticRoster {
    fn lookup(&self, name: &str) -> Option<PlayerId> {
        self.players.get(name).copied()
    }
}

// ============================================================================
// Persistence
// ============================================================================

/// Failures reported by persistence and transport encoding.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Failed to read or write a file.
    #[error("Failed to access '{path}': {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a RON file.
    #[error("Failed to parse RON file '{path}': {source}")]
    Parse {
        /// Path that failed.
        path: String,
        /// Underlying parse error.
        #[source]
        source: ron::error::SpannedError,
    },

    /// Failed to write RON.
    #[error("Failed to serialize unit record: {0}")]
    Serialize(#[from] ron::Error),

    /// Failed to encode or decode the binary payload.
    #[error("Failed to encode unit record: {0}")]
    Encode(#[from] bincode::Error),

    /// Record written by an incompatible version.
    #[error("Unit record version mismatch: expected {expected}, got {found}")]
    VersionMismatch {
        /// Version this build reads.
        expected: u32,
        /// Version found in the record.
        found: u32,
    },
}

/// Saves and loads unit records by name.
pub trait UnitStore {
    /// Save a record under a name, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the record cannot be written.
    fn save(&self, record: &UnitRecord, name: &str) -> Result<(), PersistenceError>;

    /// Load the record saved under a name.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the record is missing or unreadable.
    fn load(&self, name: &str) -> Result<UnitRecord, PersistenceError>;
}

/// Stores each record as a pretty-printed RON file in a directory.
#[derive(Debug, Clone)]
pub struct FileUnitStore {
    root: PathBuf,
}

impl FileUnitStore {
    /// Create a store rooted at a directory. The directory is created on
    /// first save.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the records.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File a record name maps to.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        let stem: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.root.join(format!("{stem}.ron"))
    }
}

impl UnitStore for FileUnitStore {
    fn save(&self, record: &UnitRecord, name: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(name);
        std::fs::create_dir_all(&self.root).map_err(|source| PersistenceError::Io {
            path: self.root.display().to_string(),
            source,
        })?;
        let text = ron::ser::to_string_pretty(record, PrettyConfig::default())?;
        std::fs::write(&path, text).map_err(|source| PersistenceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Saved unit record");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<UnitRecord, PersistenceError> {
        let path = self.path_for(name);
        let text = std::fs::read_to_string(&path).map_err(|source| PersistenceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let record: UnitRecord = ron::from_str(&text).map_err(|source| PersistenceError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        check_version(&record)?;
        tracing::debug!(path = %path.display(), "Loaded unit record");
        Ok(record)
    }
}

fn check_version(record: &UnitRecord) -> Result<(), PersistenceError> {
    if record.version != RECORD_VERSION {
        return Err(PersistenceError::VersionMismatch {
            expected: RECORD_VERSION,
            found: record.version,
        });
    }
    Ok(())
}

// ============================================================================
// Transport
// ============================================================================

impl UnitRecord {
    /// Encode as a compact binary payload.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Encode`] if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistenceError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a binary payload.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Encode`] for malformed bytes or
    /// [`PersistenceError::VersionMismatch`] for an incompatible record.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistenceError> {
        let record: Self = bincode::deserialize(bytes)?;
        check_version(&record)?;
        Ok(record)
    }
}

/// Hands finished units to the rest of the running system.
pub trait UnitTransport {
    /// Deliver a record. Fire and forget.
    fn deliver(&self, record: UnitRecord);
}

/// Transport backed by an unbounded tokio channel.
///
/// Sending never blocks and needs no runtime; the receiving side may be
/// polled from async code or drained with `try_recv`.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    sender: UnboundedSender<UnitRecord>,
}

impl ChannelTransport {
    /// Create a transport and the receiver it feeds.
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiver<UnitRecord>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl UnitTransport for ChannelTransport {
    fn deliver(&self, record: UnitRecord) {
        let name = record.name.clone();
        if self.sender.send(record).is_err() {
            tracing::warn!(unit = %name, "Unit transport closed, record dropped");
        }
    }
}
