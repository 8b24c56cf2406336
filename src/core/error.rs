//! Error types for the analytics core

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Errors surfaced by the analytics core and its snapshot store
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// A referenced entity does not exist where the operation requires it
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind (e.g. "specialization", "minor")
        entity: &'static str,
        /// Identifier that failed to resolve
        id: String,
    },

    /// Snapshot data violates a reference-data invariant
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// A minor status transition is not allowed from the current state
    #[error("Invalid minor transition: {0}")]
    InvalidTransition(String),

    /// The selection ledger could not guarantee an atomic update
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalyticsError {
    /// Build a not-found error for an entity kind and identifier
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether this error is a client-visible "not found" outcome
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
