//! Error types for the designer tools.

use armorsmith_core::collaborators::PersistenceError;
use armorsmith_core::error::ConstructionError;
use thiserror::Error;

/// Errors raised by the designer tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Failed to read a file or directory.
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a design sheet.
    #[error("Failed to parse design sheet '{path}': {source}")]
    Parse {
        /// Path to the sheet.
        path: String,
        /// Underlying parse error.
        #[source]
        source: ron::error::SpannedError,
    },

    /// The rules engine rejected the design.
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// Saving or loading a unit record failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// One or more sheets in a directory failed.
    #[error("{failed} of {total} design sheets failed validation")]
    SheetsFailed {
        /// Number of failing sheets.
        failed: usize,
        /// Number of sheets checked.
        total: usize,
    },
}

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;
