use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use workouts_domain::models::{hour::Hour, training::Training};
use workouts_types::common::User;

use crate::cqrs::Query;

/// Whether a single slot can be booked.
#[derive(Debug, Clone)]
pub struct HourAvailability {
    pub hour: DateTime<Utc>,
}

impl Query for HourAvailability {
    type Output = bool;
}

/// The trainer calendar between two dates, day by day.
#[derive(Debug, Clone)]
pub struct AvailableHours {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Query for AvailableHours {
    type Output = Vec<Date>;
}

/// Upcoming trainings owned by a user.
#[derive(Debug, Clone)]
pub struct TrainingsForUser {
    pub user: User,
}

impl Query for TrainingsForUser {
    type Output = Vec<TrainingView>;
}

/// Every upcoming training, for trainers.
#[derive(Debug, Clone)]
pub struct AllTrainings;

impl Query for AllTrainings {
    type Output = Vec<TrainingView>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Date {
    pub date: NaiveDate,
    pub has_free_hours: bool,
    pub hours: Vec<HourView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourView {
    pub hour: DateTime<Utc>,
    pub available: bool,
    pub has_training_scheduled: bool,
}

impl From<&Hour> for HourView {
    fn from(hour: &Hour) -> Self {
        Self {
            hour: hour.time(),
            available: hour.is_available(),
            has_training_scheduled: hour.has_training_scheduled(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingView {
    pub id: Uuid,
    pub user_id: String,
    pub user_name: String,
    pub time: DateTime<Utc>,
    pub notes: String,
    pub can_be_cancelled_for_free: bool,
}

impl From<&Training> for TrainingView {
    fn from(training: &Training) -> Self {
        Self {
            id: training.id(),
            user_id: training.user_id().to_string(),
            user_name: training.user_name().to_string(),
            time: training.time(),
            notes: training.notes().to_string(),
            can_be_cancelled_for_free: training.can_be_cancelled_for_free(),
        }
    }
}
