//! Unified error type for the ledger.
//!
//! Every fallible operation in the crate returns [`Result`]. Storage, serialization,
//! and configuration failures are converted into [`Error`] with `?`.

use thiserror::Error;

/// All errors produced by the ledger, its configuration, and its stores.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Database error raised by `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A persisted blob could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error (configuration files, data directory)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Donation amounts must be finite and greater than zero
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A required donation field was left empty
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// No campaign with this id exists
    #[error("Campaign not found: {id}")]
    CampaignNotFound {
        /// The id that was looked up
        id: u32,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
