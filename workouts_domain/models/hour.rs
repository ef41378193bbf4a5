use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use workouts_types::errors::{DomainError, ValidationError};

/// A one-hour slot of the trainer's calendar.
///
/// Availability and scheduling are coupled: once a training is scheduled the
/// slot can't be opened or closed until the training is cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hour {
    time: DateTime<Utc>,
    available: bool,
    has_training_scheduled: bool,
}

impl Hour {
    /// Rebuilds an hour from storage, without validating the time.
    pub fn from_database(time: DateTime<Utc>, available: bool, has_training_scheduled: bool) -> Self {
        Self {
            time,
            available,
            has_training_scheduled,
        }
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Whether a training can be booked on this hour.
    pub fn is_available(&self) -> bool {
        self.available && !self.has_training_scheduled
    }

    /// Raw availability flag, regardless of scheduled trainings.
    pub fn is_open(&self) -> bool {
        self.available
    }

    pub fn has_training_scheduled(&self) -> bool {
        self.has_training_scheduled
    }

    pub fn mark_available(&mut self) -> Result<(), DomainError> {
        if self.has_training_scheduled {
            return Err(DomainError::TrainingScheduled(self.time));
        }

        self.available = true;
        Ok(())
    }

    pub fn mark_unavailable(&mut self) -> Result<(), DomainError> {
        if self.has_training_scheduled {
            return Err(DomainError::TrainingScheduled(self.time));
        }

        self.available = false;
        Ok(())
    }

    pub fn schedule_training(&mut self) -> Result<(), DomainError> {
        if self.has_training_scheduled {
            return Err(DomainError::TrainingAlreadyScheduled(self.time));
        }
        if !self.available {
            return Err(DomainError::HourNotAvailable(self.time));
        }

        self.has_training_scheduled = true;
        Ok(())
    }

    /// Frees the slot. `available` is left as it was before the booking.
    pub fn cancel_training(&mut self) -> Result<(), DomainError> {
        if !self.has_training_scheduled {
            return Err(DomainError::NoTrainingScheduled(self.time));
        }

        self.has_training_scheduled = false;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourFactoryConfig {
    pub max_weeks_in_the_future: u32,
    pub min_utc_hour: u32,
    pub max_utc_hour: u32,
}

impl Default for HourFactoryConfig {
    fn default() -> Self {
        Self {
            max_weeks_in_the_future: 6,
            min_utc_hour: 12,
            max_utc_hour: 20,
        }
    }
}

impl HourFactoryConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_weeks_in_the_future < 1 {
            return Err(ValidationError::InvalidFactoryConfig(format!(
                "max_weeks_in_the_future must be at least 1, got {}",
                self.max_weeks_in_the_future
            )));
        }
        if self.max_utc_hour > 24 {
            return Err(ValidationError::InvalidFactoryConfig(format!(
                "max_utc_hour must be at most 24, got {}",
                self.max_utc_hour
            )));
        }
        if self.min_utc_hour >= self.max_utc_hour {
            return Err(ValidationError::InvalidFactoryConfig(format!(
                "min_utc_hour ({}) must be lower than max_utc_hour ({})",
                self.min_utc_hour, self.max_utc_hour
            )));
        }

        Ok(())
    }
}

/// Creates hours whose time is a valid slot of the calendar.
#[derive(Debug, Clone, Copy)]
pub struct HourFactory {
    config: HourFactoryConfig,
}

impl HourFactory {
    pub fn new(config: HourFactoryConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> HourFactoryConfig {
        self.config
    }

    pub fn new_available_hour(&self, time: DateTime<Utc>) -> Result<Hour, ValidationError> {
        self.validate_time(time)?;
        Ok(Hour::from_database(time, true, false))
    }

    pub fn new_not_available_hour(&self, time: DateTime<Utc>) -> Result<Hour, ValidationError> {
        self.validate_time(time)?;
        Ok(Hour::from_database(time, false, false))
    }

    pub fn validate_time(&self, time: DateTime<Utc>) -> Result<(), ValidationError> {
        self.validate_time_at(time, Utc::now())
    }

    pub fn validate_time_at(
        &self,
        time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        if time.minute() != 0 || time.second() != 0 || time.nanosecond() != 0 {
            return Err(ValidationError::NotFullHour(time));
        }

        if time < now {
            return Err(ValidationError::PastHour(time));
        }

        let max_weeks = self.config.max_weeks_in_the_future;
        if time > now + Duration::weeks(i64::from(max_weeks)) {
            return Err(ValidationError::TooDistantDate { time, max_weeks });
        }

        let hour = time.hour();
        if hour < self.config.min_utc_hour || hour > self.config.max_utc_hour {
            return Err(ValidationError::OutsideWorkingHours {
                time,
                min: self.config.min_utc_hour,
                max: self.config.max_utc_hour,
            });
        }

        Ok(())
    }
}
