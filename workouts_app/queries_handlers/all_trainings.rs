use async_trait::async_trait;
use std::sync::Arc;

use workouts_types::errors::ApplicationError;

use crate::{
    context::Context,
    cqrs::{
        Query, QueryHandler,
        queries::{AllTrainings, TrainingView},
    },
    repository::TrainingRepository,
};

pub struct AllTrainingsHandler {
    training_repo: Arc<dyn TrainingRepository>,
}

impl AllTrainingsHandler {
    pub fn new(training_repo: Arc<dyn TrainingRepository>) -> Self {
        Self { training_repo }
    }
}

#[async_trait]
impl QueryHandler<AllTrainings> for AllTrainingsHandler {
    async fn handle(
        &self,
        _ctx: &Context,
        _query: AllTrainings,
    ) -> Result<<AllTrainings as Query>::Output, ApplicationError> {
        let trainings = self.training_repo.all_trainings().await?;
        Ok(trainings.iter().map(TrainingView::from).collect())
    }
}
