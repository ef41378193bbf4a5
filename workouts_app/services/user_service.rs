use workouts_types::errors::ApplicationError;

use crate::context::Context;

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Adds `amount_change` (possibly negative) to the user's trainings balance.
    async fn update_training_balance(
        &self,
        ctx: &Context,
        user_id: &str,
        amount_change: i32,
    ) -> Result<(), ApplicationError>;
}
