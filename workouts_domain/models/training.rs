use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use workouts_types::{
    Result,
    common::{User, UserRole},
    errors::{ApplicationError, DomainError, ValidationError},
};

pub const MAX_NOTES_LENGTH: usize = 1000;

/// Cancelling at least this long before the training is free of charge.
pub fn free_cancellation_window() -> Duration {
    Duration::hours(24)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingStatus {
    Scheduled,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Training {
    id: Uuid,
    user_id: String,
    user_name: String,
    time: DateTime<Utc>,
    notes: String,
    status: TrainingStatus,
}

impl Training {
    pub fn new(
        id: Uuid,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        time: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Self::new_at(id, user_id, user_name, time, Utc::now())
    }

    pub fn new_at(
        id: Uuid,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let user_id = user_id.into();
        let user_name = user_name.into();

        if id.is_nil() {
            return Err(ValidationError::InvalidTrainingId);
        }
        if user_id.is_empty() {
            return Err(ValidationError::EmptyUserId);
        }
        if user_name.is_empty() {
            return Err(ValidationError::EmptyUserName);
        }
        if time <= now {
            return Err(ValidationError::TrainingTimeInPast(time));
        }

        Ok(Self {
            id,
            user_id,
            user_name,
            time,
            notes: String::new(),
            status: TrainingStatus::Scheduled,
        })
    }

    /// Rebuilds a training from storage, skipping validation.
    pub fn from_database(
        id: Uuid,
        user_id: String,
        user_name: String,
        time: DateTime<Utc>,
        notes: String,
        cancelled: bool,
    ) -> Self {
        let status = if cancelled {
            TrainingStatus::Cancelled
        } else {
            TrainingStatus::Scheduled
        };

        Self {
            id,
            user_id,
            user_name,
            time,
            notes,
            status,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn status(&self) -> TrainingStatus {
        self.status
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == TrainingStatus::Cancelled
    }

    pub fn update_notes(&mut self, notes: impl Into<String>) -> Result<(), ValidationError> {
        let notes = notes.into();
        let len = notes.chars().count();
        if len > MAX_NOTES_LENGTH {
            return Err(ValidationError::NoteTooLong {
                len,
                max: MAX_NOTES_LENGTH,
            });
        }

        self.notes = notes;
        Ok(())
    }

    /// Only the owner and trainers may see or change a training.
    pub fn can_user_see(&self, user: &User) -> Result<(), DomainError> {
        if user.role == UserRole::Trainer || user.id == self.user_id {
            return Ok(());
        }

        Err(DomainError::ForbiddenToSeeTraining {
            user_id: user.id.clone(),
            owner_id: self.user_id.clone(),
        })
    }

    pub fn can_be_cancelled_for_free(&self) -> bool {
        self.can_be_cancelled_for_free_at(Utc::now())
    }

    pub fn can_be_cancelled_for_free_at(&self, now: DateTime<Utc>) -> bool {
        self.time - now >= free_cancellation_window()
    }

    /// Cancels the training and returns the balance change owed to its owner.
    pub fn cancel(&mut self, actor: &User) -> Result<i32, DomainError> {
        self.cancel_at(actor, Utc::now())
    }

    pub fn cancel_at(&mut self, actor: &User, now: DateTime<Utc>) -> Result<i32, DomainError> {
        self.can_user_see(actor)?;

        if self.is_cancelled() {
            return Err(DomainError::TrainingAlreadyCancelled(self.id));
        }

        let balance_delta = if self.can_be_cancelled_for_free_at(now) {
            1
        } else {
            match actor.role {
                // late cancellation by the trainer is compensated with an extra credit
                UserRole::Trainer => 2,
                UserRole::Attendee => 0,
            }
        };

        self.status = TrainingStatus::Cancelled;
        Ok(balance_delta)
    }

    pub fn reschedule(&mut self, actor: &User, new_time: DateTime<Utc>) -> Result<()> {
        self.reschedule_at(actor, new_time, Utc::now())
    }

    pub fn reschedule_at(
        &mut self,
        actor: &User,
        new_time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.can_user_see(actor)?;

        if self.is_cancelled() {
            return Err(DomainError::TrainingAlreadyCancelled(self.id).into());
        }
        if !self.can_be_cancelled_for_free_at(now) {
            return Err(DomainError::TooLateToReschedule(self.id).into());
        }
        if new_time <= now {
            return Err(ApplicationError::Validation(
                ValidationError::TrainingTimeInPast(new_time),
            ));
        }

        self.time = new_time;
        Ok(())
    }
}
