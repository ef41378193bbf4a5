mod hour_repository;
mod training_repository;

pub use hour_repository::HourRepository;
pub use training_repository::TrainingRepository;

use workouts_types::errors::ApplicationError;

/// Transformation applied by update-by-function accessors. It receives a
/// private copy of the current state and returns the state to persist.
pub type UpdateFn<'a, T> = Box<dyn FnOnce(T) -> Result<T, ApplicationError> + Send + 'a>;
