//! Unified error types for Stratum.
//!
//! All fallible operations in the crate return [`Result`]. The pure
//! computation functions in [`crate::core`] are total over their inputs and
//! never construct these errors; they exist for configuration loading,
//! validation of user-supplied text, and database access.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration or input validation failure.
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable description of what was wrong
        message: String,
    },

    /// An entity referenced by id does not exist (or belongs to another user).
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. `"habit"`
        entity: &'static str,
        /// The id that failed to resolve
        id: String,
    },

    /// A date string did not parse as `YYYY-MM-DD`.
    #[error("invalid date: {value}")]
    InvalidDate {
        /// The offending input
        value: String,
    },

    /// Underlying SeaORM / sqlx failure.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (config file reads).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable.
    #[error("environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
