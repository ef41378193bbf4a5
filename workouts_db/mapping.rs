use workouts_domain::models as domain_models;

use crate::models as db_models;

impl From<db_models::Hour> for domain_models::hour::Hour {
    fn from(row: db_models::Hour) -> Self {
        domain_models::hour::Hour::from_database(row.hour, row.available, row.has_training_scheduled)
    }
}

impl From<db_models::Training> for domain_models::training::Training {
    fn from(row: db_models::Training) -> Self {
        domain_models::training::Training::from_database(
            row.id,
            row.user_id,
            row.user_name,
            row.time,
            row.notes,
            row.cancelled,
        )
    }
}
