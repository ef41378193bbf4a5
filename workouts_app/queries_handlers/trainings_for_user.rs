use async_trait::async_trait;
use std::sync::Arc;

use workouts_types::errors::ApplicationError;

use crate::{
    context::Context,
    cqrs::{
        Query, QueryHandler,
        queries::{TrainingView, TrainingsForUser},
    },
    repository::TrainingRepository,
};

pub struct TrainingsForUserHandler {
    training_repo: Arc<dyn TrainingRepository>,
}

impl TrainingsForUserHandler {
    pub fn new(training_repo: Arc<dyn TrainingRepository>) -> Self {
        Self { training_repo }
    }
}

#[async_trait]
impl QueryHandler<TrainingsForUser> for TrainingsForUserHandler {
    async fn handle(
        &self,
        _ctx: &Context,
        query: TrainingsForUser,
    ) -> Result<<TrainingsForUser as Query>::Output, ApplicationError> {
        let trainings = self
            .training_repo
            .find_trainings_for_user(&query.user.id)
            .await?;

        Ok(trainings.iter().map(TrainingView::from).collect())
    }
}
