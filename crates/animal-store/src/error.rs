use common::{AnimalId, ParseStatusError};
use thiserror::Error;

/// Errors that can occur when interacting with the animal store.
#[derive(Debug, Error)]
pub enum AnimalStoreError {
    /// No animal exists with the given id.
    #[error("Animal not found: {0}")]
    AnimalNotFound(AnimalId),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored row holds a status value outside the known set.
    #[error("Corrupt animal row: {0}")]
    InvalidStatus(#[from] ParseStatusError),

    /// The store refused the operation (used by the in-memory store).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for animal store operations.
pub type Result<T> = std::result::Result<T, AnimalStoreError>;
