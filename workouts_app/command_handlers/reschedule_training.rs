use std::sync::Arc;

use workouts_domain::models::training::Training;
use workouts_types::{Result, errors::ApplicationError};

use crate::{
    context::Context,
    cqrs::{CommandHandler, commands::RescheduleTraining},
    repository::TrainingRepository,
    services::TrainerService,
};

pub struct RescheduleTrainingCommandHandler {
    training_repo: Arc<dyn TrainingRepository>,
    trainer_service: Arc<dyn TrainerService>,
}

impl RescheduleTrainingCommandHandler {
    pub fn new(
        training_repo: Arc<dyn TrainingRepository>,
        trainer_service: Arc<dyn TrainerService>,
    ) -> Self {
        Self {
            training_repo,
            trainer_service,
        }
    }
}

#[async_trait::async_trait]
impl CommandHandler<RescheduleTraining> for RescheduleTrainingCommandHandler {
    async fn handle(&self, ctx: &Context, command: RescheduleTraining) -> Result<()> {
        let user = &command.user;
        let new_time = command.new_time;
        let mut original_time = None;

        self.training_repo
            .update_training(
                command.training_id,
                user,
                Box::new(|mut training: Training| -> Result<Training> {
                    original_time = Some(training.time());
                    training.reschedule(user, new_time)?;
                    Ok(training)
                }),
            )
            .await?;

        let Some(original_time) = original_time else {
            return Err(ApplicationError::Internal(format!(
                "training {} was not updated",
                command.training_id
            )));
        };

        self.trainer_service
            .move_training(ctx, new_time, original_time)
            .await
            .map_err(|e| ApplicationError::partial_failure("trainer move", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::tests::{MockTrainerService, MockTrainingRepository};
    use chrono::{Duration, Utc};
    use workouts_domain::test_utils::{
        TrainingFactoryOptions, attendee, relative_date, training_factory,
    };
    use workouts_types::errors::DomainError;

    fn setup(
        trainer: MockTrainerService,
        hours_from_now: i64,
    ) -> (
        Arc<MockTrainingRepository>,
        Arc<MockTrainerService>,
        RescheduleTrainingCommandHandler,
        Training,
    ) {
        let trainings = Arc::new(MockTrainingRepository::new());
        let trainer = Arc::new(trainer);
        let training = training_factory(TrainingFactoryOptions {
            user_id: Some("attendee-1".to_string()),
            time: Some(Utc::now() + Duration::hours(hours_from_now)),
            ..Default::default()
        });
        trainings.add(training.clone());
        let handler = RescheduleTrainingCommandHandler::new(trainings.clone(), trainer.clone());

        (trainings, trainer, handler, training)
    }

    #[tokio::test]
    async fn test_reschedule_training() -> Result<()> {
        let (trainings, trainer, handler, training) = setup(MockTrainerService::new(), 48);
        let new_time = relative_date(5, 15);

        handler
            .handle(
                &Context::new(),
                RescheduleTraining {
                    training_id: training.id(),
                    user: attendee("attendee-1"),
                    new_time,
                },
            )
            .await?;

        assert_eq!(
            trainings.stored_training(training.id()).unwrap().time(),
            new_time
        );
        assert_eq!(trainer.moved(), vec![(new_time, training.time())]);
        Ok(())
    }

    #[tokio::test]
    async fn test_reschedule_too_late() {
        let (trainings, trainer, handler, training) = setup(MockTrainerService::new(), 6);

        let result = handler
            .handle(
                &Context::new(),
                RescheduleTraining {
                    training_id: training.id(),
                    user: attendee("attendee-1"),
                    new_time: relative_date(5, 15),
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::TooLateToReschedule(_)))
        ));
        assert_eq!(
            trainings.stored_training(training.id()).unwrap().time(),
            training.time()
        );
        assert!(trainer.moved().is_empty());
    }

    #[tokio::test]
    async fn test_trainer_refuses_new_slot() {
        let (trainings, _, handler, training) = setup(MockTrainerService::failing(), 48);
        let new_time = relative_date(5, 15);

        let result = handler
            .handle(
                &Context::new(),
                RescheduleTraining {
                    training_id: training.id(),
                    user: attendee("attendee-1"),
                    new_time,
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::PartialFailure {
                step: "trainer move",
                ..
            })
        ));
        assert_eq!(
            trainings.stored_training(training.id()).unwrap().time(),
            new_time
        );
    }
}
