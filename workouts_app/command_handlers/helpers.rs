use chrono::{DateTime, Utc};

use workouts_domain::models::hour::Hour;
use workouts_types::errors::{ApplicationError, DomainError};

use crate::repository::HourRepository;

/// Applies a domain operation to one hour inside an update-by-function call.
pub async fn update_hour_with(
    repo: &dyn HourRepository,
    time: DateTime<Utc>,
    operation: fn(&mut Hour) -> Result<(), DomainError>,
) -> Result<(), ApplicationError> {
    repo.update_hour(
        time,
        Box::new(move |mut hour: Hour| -> Result<Hour, ApplicationError> {
            operation(&mut hour)?;
            Ok(hour)
        }),
    )
    .await
}
