//! Error types for the persistence boundary and the text interchange.
//!
//! Backends report every failure as a [`StoreError`]; the [`crate::store`]
//! façade decides which of them degrade to an empty or `false` result.
//! [`InterchangeError`] covers reading and writing the delimited text format.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a [`crate::backend::PersistenceBackend`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored roster blob could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The relational store rejected a statement or could not be opened.
    #[error("database error: {0}")]
    Database(String),

    /// The backend is unreachable (used by test doubles to simulate outages).
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// An internal lock was poisoned by a panicking writer.
    #[error("lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

/// Errors raised while exporting or importing the text format.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// The file could not be opened, read or written.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A numeric column could not be parsed and the import runs under
    /// [`crate::interchange::NumericPolicy::Strict`].
    #[error("line {line}: invalid {field} value '{value}'")]
    MalformedNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
}

impl InterchangeError {
    /// Returns `true` for failures the façade absorbs (missing or unreadable
    /// files), `false` for data errors that must reach the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, InterchangeError::Io { .. })
    }
}
