use chrono::{DateTime, Utc};

use workouts_types::errors::ApplicationError;

use crate::context::Context;

/// The trainer calendar, as seen from the trainings context.
#[async_trait::async_trait]
pub trait TrainerService: Send + Sync {
    async fn schedule_training(
        &self,
        ctx: &Context,
        training_time: DateTime<Utc>,
    ) -> Result<(), ApplicationError>;

    async fn cancel_training(
        &self,
        ctx: &Context,
        training_time: DateTime<Utc>,
    ) -> Result<(), ApplicationError>;

    async fn move_training(
        &self,
        ctx: &Context,
        new_time: DateTime<Utc>,
        original_training_time: DateTime<Utc>,
    ) -> Result<(), ApplicationError>;
}
