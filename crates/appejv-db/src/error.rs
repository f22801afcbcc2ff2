//! Database-specific error types and conversions.

use appejv_core::error::AppejvError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Failed to decode row: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Concurrent modification of {entity} with id {id}")]
    Conflict { entity: String, id: String },
}

impl From<DbError> for AppejvError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppejvError::NotFound { entity, id },
            DbError::Conflict { entity, id } => AppejvError::Conflict { entity, id },
            other => AppejvError::Database(other.to_string()),
        }
    }
}
