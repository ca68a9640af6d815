//! Film store error types.

use thiserror::Error;

/// Errors that can occur during film store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: i64,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema setup failed.
    #[error("Migration error: {0}")]
    Migration(String),

    /// Stored data that cannot be mapped back to an entity.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl StoreError {
    /// Creates a not found error.
    pub fn not_found(entity_type: &'static str, id: i64) -> Self {
        Self::NotFound { entity_type, id }
    }
}

/// Result type for film store operations.
pub type StoreResult<T> = Result<T, StoreError>;
