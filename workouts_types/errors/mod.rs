use thiserror::Error;

mod db_error;
mod domain_error;
mod validation_error;

pub use db_error::DbError;
pub use domain_error::DomainError;
pub use validation_error::ValidationError;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Db(#[from] DbError),

    /// A collaborator port call failed.
    #[error("{service} service error: {message}")]
    Service {
        service: &'static str,
        message: String,
    },

    /// The aggregate write was committed, a dependent side effect was not.
    /// Nothing is rolled back.
    #[error("{step} failed after the change was committed: {source}")]
    PartialFailure {
        step: &'static str,
        #[source]
        source: Box<ApplicationError>,
    },

    #[error("Deadline exceeded")]
    Timeout,

    /// An unexpected fault (panic) isolated at the handler boundary.
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

/// Coarse classification used by transport adapters to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Domain,
    Forbidden,
    NotFound,
    Conflict,
    Collaborator,
    Timeout,
    Internal,
}

impl ApplicationError {
    pub fn partial_failure(step: &'static str, source: ApplicationError) -> Self {
        ApplicationError::PartialFailure {
            step,
            source: Box::new(source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::Validation(_) => ErrorKind::Validation,
            ApplicationError::Domain(DomainError::ForbiddenToSeeTraining { .. }) => {
                ErrorKind::Forbidden
            }
            ApplicationError::Domain(_) => ErrorKind::Domain,
            ApplicationError::Db(DbError::TrainingNotFound(_)) => ErrorKind::NotFound,
            ApplicationError::Db(DbError::TrainingAlreadyExists(_)) => ErrorKind::Conflict,
            ApplicationError::Service { .. } | ApplicationError::PartialFailure { .. } => {
                ErrorKind::Collaborator
            }
            ApplicationError::Timeout => ErrorKind::Timeout,
            ApplicationError::Db(_)
            | ApplicationError::Internal(_)
            | ApplicationError::Infrastructure(_) => ErrorKind::Internal,
        }
    }

    /// Stable machine-readable identifier of the error.
    pub fn slug(&self) -> &'static str {
        match self {
            ApplicationError::Validation(e) => match e {
                ValidationError::EmptyUserId => "empty-user-id",
                ValidationError::EmptyUserName => "empty-user-name",
                ValidationError::InvalidTrainingId => "invalid-training-id",
                ValidationError::TrainingTimeInPast(_) => "training-time-in-past",
                ValidationError::NoteTooLong { .. } => "note-too-long",
                ValidationError::NotFullHour(_) => "not-full-hour",
                ValidationError::PastHour(_) => "past-hour",
                ValidationError::TooDistantDate { .. } => "too-distant-date",
                ValidationError::OutsideWorkingHours { .. } => "outside-working-hours",
                ValidationError::DateFromAfterDateTo { .. } => "date-from-after-date-to",
                ValidationError::DateRangeTooLong { .. } => "date-range-too-long",
                ValidationError::InvalidFactoryConfig(_) => "invalid-factory-config",
            },
            ApplicationError::Domain(e) => match e {
                DomainError::TrainingScheduled(_) => "training-scheduled",
                DomainError::HourNotAvailable(_) => "hour-not-available",
                DomainError::TrainingAlreadyScheduled(_) => "training-already-scheduled",
                DomainError::NoTrainingScheduled(_) => "no-training-scheduled",
                DomainError::TrainingAlreadyCancelled(_) => "training-already-cancelled",
                DomainError::ForbiddenToSeeTraining { .. } => "forbidden-to-see-training",
                DomainError::TooLateToReschedule(_) => "too-late-to-reschedule",
                DomainError::InvalidRole(_) => "invalid-role",
            },
            ApplicationError::Db(e) => match e {
                DbError::TrainingNotFound(_) => "training-not-found",
                DbError::TrainingAlreadyExists(_) => "training-already-exists",
                DbError::Database(_) | DbError::Migration(_) => "database-error",
            },
            ApplicationError::Service { .. } => "service-error",
            ApplicationError::PartialFailure { .. } => "partial-failure",
            ApplicationError::Timeout => "timeout",
            ApplicationError::Internal(_) => "internal-error",
            ApplicationError::Infrastructure(_) => "infrastructure-error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_kind_classification() {
        let forbidden = ApplicationError::Domain(DomainError::ForbiddenToSeeTraining {
            user_id: "a".into(),
            owner_id: "b".into(),
        });
        assert_eq!(forbidden.kind(), ErrorKind::Forbidden);

        let not_found = ApplicationError::Db(DbError::TrainingNotFound(Uuid::new_v4()));
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert_eq!(not_found.slug(), "training-not-found");

        let domain = ApplicationError::Domain(DomainError::HourNotAvailable(Utc::now()));
        assert_eq!(domain.kind(), ErrorKind::Domain);
    }

    #[test]
    fn test_storage_errors_classification() {
        let duplicate = ApplicationError::Db(DbError::TrainingAlreadyExists(Uuid::new_v4()));
        assert_eq!(duplicate.kind(), ErrorKind::Conflict);
        assert_eq!(duplicate.slug(), "training-already-exists");

        let migration = ApplicationError::Db(DbError::Migration("checksum mismatch".into()));
        assert_eq!(migration.kind(), ErrorKind::Internal);
        assert_eq!(migration.slug(), "database-error");

        let infra = ApplicationError::Infrastructure("bind failed".into());
        assert_eq!(infra.kind(), ErrorKind::Internal);
        assert_eq!(infra.slug(), "infrastructure-error");
    }

    #[test]
    fn test_partial_failure_keeps_source() {
        let err = ApplicationError::partial_failure(
            "trainer schedule",
            ApplicationError::Service {
                service: "trainer",
                message: "unreachable".into(),
            },
        );

        assert_eq!(err.kind(), ErrorKind::Collaborator);
        assert_eq!(err.slug(), "partial-failure");
        assert!(err.to_string().contains("unreachable"));
    }
}
