//! Error types for the directory services
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Directory Error Enum ==
/// Unified error type for the gateway and backend services.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Record file line with too few fields; fatal at startup
    #[error("record line {line}: expected at least 4 fields, found {found}")]
    Parse { line: usize, found: usize },

    /// Malformed request line or too few path segments
    #[error("malformed request: {0}")]
    Request(String),

    /// Outbound proxy connection failed
    #[error("backend {address} unavailable: {source}")]
    BackendUnavailable {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// File or socket failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the directory services.
pub type Result<T> = std::result::Result<T, DirectoryError>;
