mod hour_repository;
mod training_repository;
mod user_service;

pub use hour_repository::PostgresHourRepository;
pub use training_repository::PostgresTrainingRepository;
pub use user_service::PostgresUserService;

use workouts_types::errors::{ApplicationError, DbError};

fn db_error(e: sqlx::Error) -> ApplicationError {
    ApplicationError::Db(DbError::Database(e))
}
