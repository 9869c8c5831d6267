//! Error types for the construction rules engine.

use thiserror::Error;

/// Result type alias using [`ConstructionError`].
pub type Result<T> = std::result::Result<T, ConstructionError>;

/// Top-level error type for the construction rules engine.
///
/// Persistence and transport failures are reported separately through
/// [`crate::collaborators::PersistenceError`] and never pass through here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// Lookup by name failed: catalog entry, mount identifier, table row
    /// or player.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A caller supplied an index outside a fixed table, or asked for
    /// a mount the rules never allow. Indicates a caller bug.
    #[error("Invariant violated in {table}: {index}")]
    InvariantViolation {
        /// Table or rule that was indexed.
        table: &'static str,
        /// Offending index or description.
        index: String,
    },

    /// The configuration failed a legality check. Carries the first
    /// failing rule's reason, meant to be shown to the player verbatim.
    #[error("{0}")]
    Validation(String),
}

impl ConstructionError {
    /// Build an [`ConstructionError::InvariantViolation`] for an out-of-range index.
    pub fn out_of_range(table: &'static str, index: impl std::fmt::Display) -> Self {
        Self::InvariantViolation {
            table,
            index: index.to_string(),
        }
    }

    /// The user-facing reason if this is a validation failure.
    #[must_use]
    pub fn validation_reason(&self) -> Option<&str> {
        match self {
            Self::Validation(reason) => Some(reason),
            _ => None,
        }
    }
}
