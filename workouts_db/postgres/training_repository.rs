use sqlx::PgPool;
use uuid::Uuid;

use workouts_app::repository::{TrainingRepository, UpdateFn};
use workouts_domain::models::training::Training;
use workouts_types::{
    common::User,
    errors::{ApplicationError, DbError},
};

use super::db_error;
use crate::models as db_models;

#[derive(Clone)]
pub struct PostgresTrainingRepository {
    pool: PgPool,
}

impl PostgresTrainingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl TrainingRepository for PostgresTrainingRepository {
    async fn add_training(&self, training: &Training) -> Result<(), ApplicationError> {
        sqlx::query(
            r#"
            INSERT INTO trainings (id, user_id, user_name, time, notes, cancelled)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(training.id())
        .bind(training.user_id())
        .bind(training.user_name())
        .bind(training.time())
        .bind(training.notes())
        .bind(training.is_cancelled())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                ApplicationError::Db(DbError::TrainingAlreadyExists(training.id()))
            }
            e => db_error(e),
        })?;

        Ok(())
    }

    async fn get_training(&self, id: Uuid, user: &User) -> Result<Training, ApplicationError> {
        let training: Training = sqlx::query_as::<_, db_models::Training>(
            r#"
            SELECT id, user_id, user_name, time, notes, cancelled
            FROM trainings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .ok_or(ApplicationError::Db(DbError::TrainingNotFound(id)))?
        .into();

        training.can_user_see(user)?;
        Ok(training)
    }

    async fn update_training<'a>(
        &self,
        id: Uuid,
        user: &User,
        update_fn: UpdateFn<'a, Training>,
    ) -> Result<(), ApplicationError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let current: Training = sqlx::query_as::<_, db_models::Training>(
            r#"
            SELECT id, user_id, user_name, time, notes, cancelled
            FROM trainings
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error)?
        .ok_or(ApplicationError::Db(DbError::TrainingNotFound(id)))?
        .into();

        current.can_user_see(user)?;
        let updated = update_fn(current)?;

        sqlx::query(
            r#"
            UPDATE trainings
            SET user_id = $2, user_name = $3, time = $4, notes = $5, cancelled = $6
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(updated.user_id())
        .bind(updated.user_name())
        .bind(updated.time())
        .bind(updated.notes())
        .bind(updated.is_cancelled())
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(())
    }

    async fn find_trainings_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Training>, ApplicationError> {
        let rows = sqlx::query_as::<_, db_models::Training>(
            r#"
            SELECT id, user_id, user_name, time, notes, cancelled
            FROM trainings
            WHERE user_id = $1 AND NOT cancelled
            ORDER BY time
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn all_trainings(&self) -> Result<Vec<Training>, ApplicationError> {
        let rows = sqlx::query_as::<_, db_models::Training>(
            r#"
            SELECT id, user_id, user_name, time, notes, cancelled
            FROM trainings
            WHERE NOT cancelled
            ORDER BY time
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::establish_test_connection_pool;
    use workouts_domain::test_utils::{
        TrainingFactoryOptions, attendee, relative_date, training_factory,
    };

    #[tokio::test]
    async fn test_training_lifecycle() -> Result<(), ApplicationError> {
        let Some(pool) = establish_test_connection_pool().await? else {
            return Ok(());
        };
        let repo = PostgresTrainingRepository::new(pool);
        let user = attendee(&Uuid::new_v4().to_string());
        let training = training_factory(TrainingFactoryOptions {
            user_id: Some(user.id.clone()),
            time: Some(relative_date(4, 14)),
            ..Default::default()
        });

        repo.add_training(&training).await?;
        assert!(matches!(
            repo.add_training(&training).await,
            Err(ApplicationError::Db(DbError::TrainingAlreadyExists(_)))
        ));
        assert_eq!(repo.get_training(training.id(), &user).await?, training);

        repo.update_training(
            training.id(),
            &user,
            Box::new(|mut t: Training| -> Result<Training, ApplicationError> {
                t.cancel(&user)?;
                Ok(t)
            }),
        )
        .await?;

        assert!(repo.get_training(training.id(), &user).await?.is_cancelled());
        assert!(repo.find_trainings_for_user(&user.id).await?.is_empty());
        Ok(())
    }
}
