use common::AnimalId;
use thiserror::Error;

/// Errors that can occur when interacting with the adoption store.
#[derive(Debug, Error)]
pub enum AdoptionStoreError {
    /// An application for this animal is already stored.
    #[error("An adoption application already exists for animal {0}")]
    AlreadyExists(AnimalId),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored creation timestamp could not be parsed.
    #[error("Invalid stored timestamp: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),

    /// The store refused the operation (used by the in-memory store).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for adoption store operations.
pub type Result<T> = std::result::Result<T, AdoptionStoreError>;
