use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Errors for domain logic (business rules).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("There is a training scheduled on hour {0}")]
    TrainingScheduled(DateTime<Utc>),

    #[error("Hour {0} is not available")]
    HourNotAvailable(DateTime<Utc>),

    #[error("Hour {0} already has a training scheduled")]
    TrainingAlreadyScheduled(DateTime<Utc>),

    #[error("No training scheduled on hour {0}")]
    NoTrainingScheduled(DateTime<Utc>),

    #[error("Training {0} is already cancelled")]
    TrainingAlreadyCancelled(Uuid),

    #[error("User '{user_id}' can't see training of user '{owner_id}'")]
    ForbiddenToSeeTraining { user_id: String, owner_id: String },

    #[error("Training {0} can't be rescheduled less than 24h before it starts")]
    TooLateToReschedule(Uuid),

    #[error("Invalid user role '{0}'")]
    InvalidRole(String),
}
