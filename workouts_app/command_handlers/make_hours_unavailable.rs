use std::sync::Arc;

use workouts_domain::models::hour::Hour;
use workouts_types::Result;

use crate::{
    command_handlers::helpers::update_hour_with,
    context::Context,
    cqrs::{CommandHandler, commands::MakeHoursUnavailable},
    repository::HourRepository,
};

pub struct MakeHoursUnavailableCommandHandler {
    hour_repo: Arc<dyn HourRepository>,
}

impl MakeHoursUnavailableCommandHandler {
    pub fn new(hour_repo: Arc<dyn HourRepository>) -> Self {
        Self { hour_repo }
    }
}

#[async_trait::async_trait]
impl CommandHandler<MakeHoursUnavailable> for MakeHoursUnavailableCommandHandler {
    async fn handle(&self, _ctx: &Context, command: MakeHoursUnavailable) -> Result<()> {
        for hour in command.hours {
            update_hour_with(self.hour_repo.as_ref(), hour, Hour::mark_unavailable).await?;
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
    async fn test_make_hours_unavailable() -> Result<()> {
        let repo = Arc::new(MockHourRepository::new());
        let time = relative_date(2, 13);
        repo.add_hour(hour_factory(HourFactoryOptions {
            time: Some(time),
            available: Some(true),
            ..Default::default()
        }));
        let handler = MakeHoursUnavailableCommandHandler::new(repo.clone());

        handler
            .handle(&Context::new(), MakeHoursUnavailable { hours: vec![time] })
            .await?;

        assert!(!repo.get_hour(time).await?.is_available());
        Ok(())
    }

    #[tokio::test]
    async fn test_make_hour_unavailable_keeps_booking() -> Result<()> {
        let repo = Arc::new(MockHourRepository::new());
        let time = relative_date(2, 13);
        repo.add_hour(hour_factory(HourFactoryOptions {
            time: Some(time),
            available: Some(true),
            has_training_scheduled: Some(true),
        }));
        let handler = MakeHoursUnavailableCommandHandler::new(repo.clone());

        let result = handler
            .handle(&Context::new(), MakeHoursUnavailable { hours: vec![time] })
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::TrainingScheduled(_)))
        ));
        let hour = repo.stored_hour(time).unwrap();
        assert!(hour.is_open());
        assert!(hour.has_training_scheduled());

        Ok(())
    }
}
