//! Storage adapters for the workouts application: an in-process store backed
//! by concurrent maps, and PostgreSQL through `sqlx`.

mod connection;
mod mapping;
mod memory;
mod models;
mod postgres;

pub use connection::{
    DbPool, establish_connection_pool, establish_test_connection_pool, run_migrations,
};
pub use memory::{InMemoryHourRepository, InMemoryTrainingRepository, InMemoryUserService};
pub use postgres::{PostgresHourRepository, PostgresTrainingRepository, PostgresUserService};
