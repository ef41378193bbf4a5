use uuid::Uuid;

use workouts_domain::models::training::Training;
use workouts_types::{common::User, errors::ApplicationError};

use super::UpdateFn;

#[async_trait::async_trait]
pub trait TrainingRepository: Send + Sync {
    /// Stores a new training. Fails if the id is already taken.
    async fn add_training(&self, training: &Training) -> Result<(), ApplicationError>;

    /// Gets a training visible to `user` (its owner or a trainer).
    async fn get_training(&self, id: Uuid, user: &User) -> Result<Training, ApplicationError>;

    /// Applies `update_fn` to the stored training and saves the result.
    /// A missing training fails without calling `update_fn`.
    async fn update_training<'a>(
        &self,
        id: Uuid,
        user: &User,
        update_fn: UpdateFn<'a, Training>,
    ) -> Result<(), ApplicationError>;

    /// Scheduled trainings of a user, ordered by time.
    async fn find_trainings_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Training>, ApplicationError>;

    /// Every scheduled training, ordered by time.
    async fn all_trainings(&self) -> Result<Vec<Training>, ApplicationError>;
}
