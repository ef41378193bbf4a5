mod hour_repository;
mod training_repository;
mod user_service;

pub use hour_repository::InMemoryHourRepository;
pub use training_repository::InMemoryTrainingRepository;
pub use user_service::InMemoryUserService;
