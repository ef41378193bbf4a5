use dashmap::DashMap;

use workouts_app::{context::Context, services::UserService};
use workouts_types::errors::ApplicationError;

/// Trainings balance ledger kept in memory.
#[derive(Default)]
pub struct InMemoryUserService {
    balances: DashMap<String, i64>,
}

impl InMemoryUserService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, user_id: &str) -> i64 {
        self.balances.get(user_id).map(|b| *b).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl UserService for InMemoryUserService {
    async fn update_training_balance(
        &self,
        ctx: &Context,
        user_id: &str,
        amount_change: i32,
    ) -> Result<(), ApplicationError> {
        let mut balance = self.balances.entry(user_id.to_string()).or_insert(0);
        *balance += i64::from(amount_change);

        tracing::debug!(
            request_id = %ctx.request_id(),
            user_id,
            amount_change,
            balance = *balance,
            "training balance updated"
        );
        Ok(())
    }
}
