use chrono::{DateTime, Utc};

use workouts_domain::models::hour::Hour;
use workouts_types::errors::ApplicationError;

use super::UpdateFn;

#[async_trait::async_trait]
pub trait HourRepository: Send + Sync {
    /// Gets the hour at `time`. Hours never stored are returned as
    /// not available.
    async fn get_hour(&self, time: DateTime<Utc>) -> Result<Hour, ApplicationError>;

    /// Applies `update_fn` to the current hour (or the not available default)
    /// and stores the result. Nothing is stored if `update_fn` fails.
    async fn update_hour<'a>(
        &self,
        time: DateTime<Utc>,
        update_fn: UpdateFn<'a, Hour>,
    ) -> Result<(), ApplicationError>;

    /// Lists stored hours in `[from, to]`, ordered by time.
    async fn find_hours(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Hour>, ApplicationError>;
}
