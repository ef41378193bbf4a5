use std::sync::Arc;

use workouts_domain::models::hour::Hour;
use workouts_types::Result;

use crate::{
    command_handlers::helpers::update_hour_with,
    context::Context,
    cqrs::{CommandHandler, commands::ScheduleTrainingOnHour},
    repository::HourRepository,
};

pub struct ScheduleTrainingOnHourCommandHandler {
    hour_repo: Arc<dyn HourRepository>,
}

impl ScheduleTrainingOnHourCommandHandler {
    pub fn new(hour_repo: Arc<dyn HourRepository>) -> Self {
        Self { hour_repo }
    }
}

#[async_trait::async_trait]
impl CommandHandler<ScheduleTrainingOnHour> for ScheduleTrainingOnHourCommandHandler {
    async fn handle(&self, _ctx: &Context, command: ScheduleTrainingOnHour) -> Result<()> {
        update_hour_with(
            self.hour_repo.as_ref(),
            command.hour,
            Hour::schedule_training,
        )
        .await
    }
}
