use std::sync::Arc;

use workouts_domain::models::training::Training;
use workouts_types::{Result, errors::ApplicationError};

use crate::{
    context::Context,
    cqrs::{CommandHandler, commands::ScheduleTraining},
    repository::TrainingRepository,
    services::{TrainerService, UserService},
};

pub struct ScheduleTrainingCommandHandler {
    training_repo: Arc<dyn TrainingRepository>,
    user_service: Arc<dyn UserService>,
    trainer_service: Arc<dyn TrainerService>,
}

impl ScheduleTrainingCommandHandler {
    pub fn new(
        training_repo: Arc<dyn TrainingRepository>,
        user_service: Arc<dyn UserService>,
        trainer_service: Arc<dyn TrainerService>,
    ) -> Self {
        Self {
            training_repo,
            user_service,
            trainer_service,
        }
    }
}

#[async_trait::async_trait]
impl CommandHandler<ScheduleTraining> for ScheduleTrainingCommandHandler {
    async fn handle(&self, ctx: &Context, command: ScheduleTraining) -> Result<()> {
        let mut training = Training::new(
            command.training_id,
            command.user.id.clone(),
            command.user.name.clone(),
            command.time,
        )?;
        training.update_notes(command.notes)?;

        self.training_repo.add_training(&training).await?;

        // the training is stored from here on: failures below are not rolled back
        self.user_service
            .update_training_balance(ctx, training.user_id(), -1)
            .await
            .map_err(|e| ApplicationError::partial_failure("training balance update", e))?;

        self.trainer_service
            .schedule_training(ctx, training.time())
            .await
            .map_err(|e| ApplicationError::partial_failure("trainer schedule", e))?;

        Ok(())
    }
}
