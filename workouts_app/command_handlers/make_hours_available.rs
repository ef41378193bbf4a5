use std::sync::Arc;

use workouts_domain::models::hour::Hour;
use workouts_types::Result;

use crate::{
    command_handlers::helpers::update_hour_with,
    context::Context,
    cqrs::{CommandHandler, commands::MakeHoursAvailable},
    repository::HourRepository,
};

pub struct MakeHoursAvailableCommandHandler {
    hour_repo: Arc<dyn HourRepository>,
}

impl MakeHoursAvailableCommandHandler {
    pub fn new(hour_repo: Arc<dyn HourRepository>) -> Self {
        Self { hour_repo }
    }
}

#[async_trait::async_trait]
impl CommandHandler<MakeHoursAvailable> for MakeHoursAvailableCommandHandler {
    async fn handle(&self, _ctx: &Context, command: MakeHoursAvailable) -> Result<()> {
        for hour in command.hours {
            update_hour_with(self.hour_repo.as_ref(), hour, Hour::mark_available).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::tests::MockHourRepository;
    use workouts_domain::test_utils::{HourFactoryOptions, hour_factory, relative_date};
    use workouts_types::errors::{ApplicationError, DomainError};

    #[tokio::test]
    async fn test_make_hours_available() -> Result<()> {
        let repo = Arc::new(MockHourRepository::new());
        let handler = MakeHoursAvailableCommandHandler::new(repo.clone());
        let hours = vec![relative_date(2, 13), relative_date(2, 14)];

        handler
            .handle(
                &Context::new(),
                MakeHoursAvailable {
                    hours: hours.clone(),
                },
            )
            .await?;

        for time in hours {
            assert!(repo.get_hour(time).await?.is_available());
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_make_hour_available_with_training_scheduled() -> Result<()> {
        let repo = Arc::new(MockHourRepository::new());
        let time = relative_date(2, 15);
        repo.add_hour(hour_factory(HourFactoryOptions {
            time: Some(time),
            available: Some(false),
            has_training_scheduled: Some(true),
        }));
        let handler = MakeHoursAvailableCommandHandler::new(repo.clone());

        let result = handler
            .handle(&Context::new(), MakeHoursAvailable { hours: vec![time] })
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::TrainingScheduled(t))) if t == time
        ));
        assert!(!repo.stored_hour(time).unwrap().is_open());

        Ok(())
    }
}
