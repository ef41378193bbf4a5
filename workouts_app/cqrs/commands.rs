use chrono::{DateTime, Utc};
use uuid::Uuid;

use workouts_types::common::User;

use crate::cqrs::Command;

// Trainer calendar

#[derive(Debug, Clone)]
pub struct MakeHoursAvailable {
    pub hours: Vec<DateTime<Utc>>,
}

impl Command for MakeHoursAvailable {}

#[derive(Debug, Clone)]
pub struct MakeHoursUnavailable {
    pub hours: Vec<DateTime<Utc>>,
}

impl Command for MakeHoursUnavailable {}

/// Books the slot for a training scheduled in the trainings context.
#[derive(Debug, Clone)]
pub struct ScheduleTrainingOnHour {
    pub hour: DateTime<Utc>,
}

impl Command for ScheduleTrainingOnHour {}

/// Frees the slot of a cancelled training.
#[derive(Debug, Clone)]
pub struct CancelTrainingOnHour {
    pub hour: DateTime<Utc>,
}

impl Command for CancelTrainingOnHour {}

// Trainings

#[derive(Debug, Clone)]
pub struct ScheduleTraining {
    pub training_id: Uuid,
    pub user: User,
    pub time: DateTime<Utc>,
    pub notes: String,
}

impl Command for ScheduleTraining {}

#[derive(Debug, Clone)]
pub struct CancelTraining {
    pub training_id: Uuid,
    pub user: User,
}

impl Command for CancelTraining {}

#[derive(Debug, Clone)]
pub struct RescheduleTraining {
    pub training_id: Uuid,
    pub user: User,
    pub new_time: DateTime<Utc>,
}

impl Command for RescheduleTraining {}
