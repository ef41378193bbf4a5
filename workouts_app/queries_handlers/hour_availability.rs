use async_trait::async_trait;
use std::sync::Arc;

use workouts_types::errors::ApplicationError;

use crate::{
    context::Context,
    cqrs::{Query, QueryHandler, queries::HourAvailability},
    repository::HourRepository,
};

pub struct HourAvailabilityHandler {
    hour_repo: Arc<dyn HourRepository>,
}

impl HourAvailabilityHandler {
    pub fn new(hour_repo: Arc<dyn HourRepository>) -> Self {
        Self { hour_repo }
    }
}

#[async_trait]
impl QueryHandler<HourAvailability> for HourAvailabilityHandler {
    async fn handle(
        &self,
        _ctx: &Context,
        query: HourAvailability,
    ) -> Result<<HourAvailability as Query>::Output, ApplicationError> {
        let hour = self.hour_repo.get_hour(query.hour).await?;
        Ok(hour.is_available())
    }
}
