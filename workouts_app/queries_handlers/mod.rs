mod all_trainings;
mod available_hours;
mod hour_availability;
mod trainings_for_user;

pub use all_trainings::AllTrainingsHandler;
pub use available_hours::{AvailableHoursHandler, MAX_CALENDAR_DAYS};
pub use hour_availability::HourAvailabilityHandler;
pub use trainings_for_user::TrainingsForUserHandler;
