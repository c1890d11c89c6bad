//! Error types for oplog2sql.

use thiserror::Error;

/// The main error type for oplog translation.
#[derive(Debug, Error)]
pub enum OplogError {
    /// Input is neither a single entry nor an array of entries.
    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// Update entry without a usable `diff.u` or `diff.d` mapping.
    #[error("Invalid update oplog: {0}")]
    InvalidUpdate(String),

    /// A field required by the entry's operation is missing.
    #[error("Malformed {op} oplog: {reason}")]
    MalformedEntry { op: &'static str, reason: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OplogError {
    /// Create a malformed entry error for the given operation.
    pub fn malformed(op: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            op,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for OplogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        }
    }
}

/// Result type alias for oplog translation.
pub type OplogResult<T> = Result<T, OplogError>;
