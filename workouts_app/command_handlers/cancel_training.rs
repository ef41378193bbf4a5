use std::sync::Arc;

use workouts_domain::models::training::Training;
use workouts_types::{Result, errors::ApplicationError};

use crate::{
    context::Context,
    cqrs::{CommandHandler, commands::CancelTraining},
    repository::TrainingRepository,
    services::{TrainerService, UserService},
};

pub struct CancelTrainingCommandHandler {
    training_repo: Arc<dyn TrainingRepository>,
    user_service: Arc<dyn UserService>,
    trainer_service: Arc<dyn TrainerService>,
}

impl CancelTrainingCommandHandler {
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
impl CommandHandler<CancelTraining> for CancelTrainingCommandHandler {
    async fn handle(&self, ctx: &Context, command: CancelTraining) -> Result<()> {
        let user = &command.user;
        self.training_repo
            .get_training(command.training_id, user)
            .await?;

        let mut balance_delta = 0;
        let mut owner_id = String::new();
        let mut training_time = None;

        self.training_repo
            .update_training(
                command.training_id,
                user,
                Box::new(|mut training: Training| -> Result<Training> {
                    balance_delta = training.cancel(user)?;
                    owner_id = training.user_id().to_string();
                    training_time = Some(training.time());
                    Ok(training)
                }),
            )
            .await?;

        let Some(training_time) = training_time else {
            return Err(ApplicationError::Internal(format!(
                "training {} was not updated",
                command.training_id
            )));
        };

        if balance_delta != 0 {
            self.user_service
                .update_training_balance(ctx, &owner_id, balance_delta)
                .await
                .map_err(|e| ApplicationError::partial_failure("training balance update", e))?;
        }

        self.trainer_service
            .cancel_training(ctx, training_time)
            .await
            .map_err(|e| ApplicationError::partial_failure("trainer cancel", e))?;

        Ok(())
    }
}
