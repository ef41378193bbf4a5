use sqlx::postgres::{PgPool, PgPoolOptions};
use std::env;

use workouts_types::errors::DbError;

pub type DbPool = PgPool;

pub async fn establish_connection_pool(database_url: &str) -> Result<DbPool, DbError> {
    Ok(PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?)
}

/// Pool for the database named by `TEST_DATABASE_URL`, with migrations
/// applied. `None` when the variable isn't set.
pub async fn establish_test_connection_pool() -> Result<Option<DbPool>, DbError> {
    dotenvy::dotenv().ok();

    let Ok(database_url) = env::var("TEST_DATABASE_URL") else {
        return Ok(None);
    };

    let pool = establish_connection_pool(&database_url).await?;
    run_migrations(&pool).await?;
    Ok(Some(pool))
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DbError::Migration(e.to_string()))
}
