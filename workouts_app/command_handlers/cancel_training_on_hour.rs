use std::sync::Arc;

use workouts_domain::models::hour::Hour;
use workouts_types::Result;

use crate::{
    command_handlers::helpers::update_hour_with,
    context::Context,
    cqrs::{CommandHandler, commands::CancelTrainingOnHour},
    repository::HourRepository,
};

pub struct CancelTrainingOnHourCommandHandler {
    hour_repo: Arc<dyn HourRepository>,
}

impl CancelTrainingOnHourCommandHandler {
    pub fn new(hour_repo: Arc<dyn HourRepository>) -> Self {
        Self { hour_repo }
    }
}

#[async_trait::async_trait]
impl CommandHandler<CancelTrainingOnHour> for CancelTrainingOnHourCommandHandler {
    async fn handle(&self, _ctx: &Context, command: CancelTrainingOnHour) -> Result<()> {
        update_hour_with(self.hour_repo.as_ref(), command.hour, Hour::cancel_training).await
    }
}
