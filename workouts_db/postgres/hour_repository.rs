use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use workouts_app::repository::{HourRepository, UpdateFn};
use workouts_domain::models::hour::{Hour, HourFactory};
use workouts_types::errors::ApplicationError;

use super::db_error;
use crate::models as db_models;

#[derive(Clone)]
pub struct PostgresHourRepository {
    pool: PgPool,
    factory: HourFactory,
}

impl PostgresHourRepository {
    pub fn new(pool: PgPool, factory: HourFactory) -> Self {
        Self { pool, factory }
    }

    async fn lock_hour(
        tx: &mut Transaction<'_, Postgres>,
        time: DateTime<Utc>,
    ) -> Result<Option<db_models::Hour>, ApplicationError> {
        sqlx::query_as::<_, db_models::Hour>(
            r#"
            SELECT hour, available, has_training_scheduled
            FROM hours
            WHERE hour = $1
            FOR UPDATE
            "#,
        )
        .bind(time)
        .fetch_optional(&mut **tx)
        .await
        .map_err(db_error)
    }
}

#[async_trait::async_trait]
impl HourRepository for PostgresHourRepository {
    async fn get_hour(&self, time: DateTime<Utc>) -> Result<Hour, ApplicationError> {
        let row = sqlx::query_as::<_, db_models::Hour>(
            r#"
            SELECT hour, available, has_training_scheduled
            FROM hours
            WHERE hour = $1
            "#,
        )
        .bind(time)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        match row {
            Some(row) => Ok(row.into()),
            None => Ok(self.factory.new_not_available_hour(time)?),
        }
    }

    async fn update_hour<'a>(
        &self,
        time: DateTime<Utc>,
        update_fn: UpdateFn<'a, Hour>,
    ) -> Result<(), ApplicationError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let current = match Self::lock_hour(&mut tx, time).await? {
            Some(row) => row,
            None => {
                let default = self.factory.new_not_available_hour(time)?;

                // concurrent writers of a new hour wait here on the inserted row
                sqlx::query(
                    r#"
                    INSERT INTO hours (hour, available, has_training_scheduled)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (hour) DO NOTHING
                    "#,
                )
                .bind(default.time())
                .bind(default.is_open())
                .bind(default.has_training_scheduled())
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;

                Self::lock_hour(&mut tx, time).await?.ok_or_else(|| {
                    ApplicationError::Infrastructure(format!("hour {time} vanished during update"))
                })?
            }
        };

        // an error here drops `tx`, rolling it back
        let updated = update_fn(current.into())?;

        sqlx::query(
            r#"
            UPDATE hours
            SET available = $2, has_training_scheduled = $3
            WHERE hour = $1
            "#,
        )
        .bind(time)
        .bind(updated.is_open())
        .bind(updated.has_training_scheduled())
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(())
    }

    async fn find_hours(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Hour>, ApplicationError> {
        let rows = sqlx::query_as::<_, db_models::Hour>(
            r#"
            SELECT hour, available, has_training_scheduled
            FROM hours
            WHERE hour BETWEEN $1 AND $2
            ORDER BY hour
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
