use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Clone)]
pub struct Hour {
    pub hour: DateTime<Utc>,
    pub available: bool,
    pub has_training_scheduled: bool,
}

#[derive(Debug, FromRow, Clone)]
pub struct Training {
    pub id: Uuid,
    pub user_id: String,
    pub user_name: String,
    pub time: DateTime<Utc>,
    pub notes: String,
    pub cancelled: bool,
}
