use chrono::{DateTime, Duration, NaiveTime, Utc};
use uuid::Uuid;

use workouts_types::common::{User, UserRole};

use crate::models::{hour::Hour, training::Training};

#[derive(Default, Clone)]
pub struct HourFactoryOptions {
    pub time: Option<DateTime<Utc>>,
    pub available: Option<bool>,
    pub has_training_scheduled: Option<bool>,
}

#[derive(Default, Clone)]
pub struct TrainingFactoryOptions {
    pub id: Option<Uuid>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub cancelled: Option<bool>,
}

/// Full hour `days` days from today, at `hour` UTC.
pub fn relative_date(days: i64, hour: u32) -> DateTime<Utc> {
    let date = (Utc::now() + Duration::days(days)).date_naive();
    let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
    date.and_time(time).and_utc()
}

pub fn hour_factory(options: HourFactoryOptions) -> Hour {
    Hour::from_database(
        options.time.unwrap_or_else(|| relative_date(1, 13)),
        options.available.unwrap_or(false),
        options.has_training_scheduled.unwrap_or(false),
    )
}

pub fn training_factory(options: TrainingFactoryOptions) -> Training {
    Training::from_database(
        options.id.unwrap_or_else(Uuid::new_v4),
        options.user_id.unwrap_or_else(|| "attendee-1".to_string()),
        options.user_name.unwrap_or_else(|| "Attendee".to_string()),
        options.time.unwrap_or_else(|| relative_date(3, 13)),
        options.notes.unwrap_or_default(),
        options.cancelled.unwrap_or(false),
    )
}

pub fn trainer(id: &str) -> User {
    User {
        id: id.to_string(),
        name: format!("Trainer {id}"),
        role: UserRole::Trainer,
    }
}

pub fn attendee(id: &str) -> User {
    User {
        id: id.to_string(),
        name: format!("Attendee {id}"),
        role: UserRole::Attendee,
    }
}
