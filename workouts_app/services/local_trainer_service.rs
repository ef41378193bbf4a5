use chrono::{DateTime, Utc};
use std::sync::Arc;

use workouts_types::errors::ApplicationError;

use crate::{
    app::TrainerCommands,
    context::Context,
    cqrs::{
        CommandHandler,
        commands::{CancelTrainingOnHour, ScheduleTrainingOnHour},
    },
    services::TrainerService,
};

/// [`TrainerService`] backed by the trainer context running in the same
/// process. Calls go through the decorated trainer handlers.
pub struct LocalTrainerService {
    schedule_handler: Arc<dyn CommandHandler<ScheduleTrainingOnHour>>,
    cancel_handler: Arc<dyn CommandHandler<CancelTrainingOnHour>>,
}

impl LocalTrainerService {
    pub fn new(commands: &TrainerCommands) -> Self {
        Self {
            schedule_handler: commands.schedule_training.clone(),
            cancel_handler: commands.cancel_training.clone(),
        }
    }
}

#[async_trait::async_trait]
impl TrainerService for LocalTrainerService {
    async fn schedule_training(
        &self,
        ctx: &Context,
        training_time: DateTime<Utc>,
    ) -> Result<(), ApplicationError> {
        self.schedule_handler
            .handle(
                ctx,
                ScheduleTrainingOnHour {
                    hour: training_time,
                },
            )
            .await
    }

    async fn cancel_training(
        &self,
        ctx: &Context,
        training_time: DateTime<Utc>,
    ) -> Result<(), ApplicationError> {
        self.cancel_handler
            .handle(
                ctx,
                CancelTrainingOnHour {
                    hour: training_time,
                },
            )
            .await
    }

    async fn move_training(
        &self,
        ctx: &Context,
        new_time: DateTime<Utc>,
        original_training_time: DateTime<Utc>,
    ) -> Result<(), ApplicationError> {
        // book the new slot first so a failure leaves the original booking intact
        self.schedule_training(ctx, new_time).await?;
        self.cancel_training(ctx, original_training_time).await
    }
}
