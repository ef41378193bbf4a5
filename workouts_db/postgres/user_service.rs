use sqlx::PgPool;

use workouts_app::{context::Context, services::UserService};
use workouts_types::errors::ApplicationError;

use super::db_error;

/// Trainings balance ledger stored in the `user_balances` table.
#[derive(Clone)]
pub struct PostgresUserService {
    pool: PgPool,
}

impl PostgresUserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn balance(&self, user_id: &str) -> Result<i64, ApplicationError> {
        let balance: Option<i64> =
            sqlx::query_scalar("SELECT balance FROM user_balances WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(balance.unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl UserService for PostgresUserService {
    async fn update_training_balance(
        &self,
        ctx: &Context,
        user_id: &str,
        amount_change: i32,
    ) -> Result<(), ApplicationError> {
        sqlx::query(
            r#"
            INSERT INTO user_balances (user_id, balance)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE
            SET balance = user_balances.balance + EXCLUDED.balance
            "#,
        )
        .bind(user_id)
        .bind(i64::from(amount_change))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        tracing::debug!(
            request_id = %ctx.request_id(),
            user_id,
            amount_change,
            "training balance updated"
        );
        Ok(())
    }
}
