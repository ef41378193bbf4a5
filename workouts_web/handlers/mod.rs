mod trainer;
mod trainings;

pub use trainer::*;
pub use trainings::*;

use uuid::Uuid;

use workouts_types::errors::{ApplicationError, ValidationError};

fn parse_training_id(raw: &str) -> Result<Uuid, ApplicationError> {
    Uuid::parse_str(raw).map_err(|_| ValidationError::InvalidTrainingId.into())
}
