use thiserror::Error;
use uuid::Uuid;

/// Errors for storage stuff.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Training with ID {0} not found")]
    TrainingNotFound(Uuid),

    #[error("Training with ID {0} already exists")]
    TrainingAlreadyExists(Uuid),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}
