//! Error types for the Tidepool simulation.
//!
//! All crates return `TidepoolResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for Tidepool.
#[derive(Debug, Error)]
pub enum TidepoolError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is outside its valid domain.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Text input (OBJ, TOML) could not be parsed.
    #[error("Parse error at line {line}: {message}")]
    Parse {
        line: usize,
        message: String,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A simulation invariant was violated (e.g., penetration detected).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl TidepoolError {
    /// Shorthand for building a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Shorthand for building a mesh error.
    pub fn mesh(message: impl Into<String>) -> Self {
        Self::InvalidMesh(message.into())
    }
}

/// Convenience alias for `Result<T, TidepoolError>`.
pub type TidepoolResult<T> = Result<T, TidepoolError>;
