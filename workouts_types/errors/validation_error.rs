use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors for malformed input, detected before any state is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Empty user id")]
    EmptyUserId,

    #[error("Empty user name")]
    EmptyUserName,

    #[error("Invalid training id")]
    InvalidTrainingId,

    #[error("Training time {0} must be in the future")]
    TrainingTimeInPast(DateTime<Utc>),

    #[error("Note too long: {len} characters, max {max}")]
    NoteTooLong { len: usize, max: usize },

    #[error("Hour {0} should be a full hour")]
    NotFullHour(DateTime<Utc>),

    #[error("Hour {0} is in the past")]
    PastHour(DateTime<Utc>),

    #[error("Hour {time} is too far in the future, max {max_weeks} weeks ahead")]
    TooDistantDate {
        time: DateTime<Utc>,
        max_weeks: u32,
    },

    #[error("Hour {time} is outside of working hours ({min}:00-{max}:00 UTC)")]
    OutsideWorkingHours {
        time: DateTime<Utc>,
        min: u32,
        max: u32,
    },

    #[error("Date from {from} is after date to {to}")]
    DateFromAfterDateTo {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },

    #[error("Date range of {days} days is too long, max {max}")]
    DateRangeTooLong { days: i64, max: i64 },

    #[error("Invalid hour factory config: {0}")]
    InvalidFactoryConfig(String),
}
