mod helpers;

pub mod cancel_training;
pub mod cancel_training_on_hour;
pub mod make_hours_available;
pub mod make_hours_unavailable;
pub mod reschedule_training;
pub mod schedule_training;
pub mod schedule_training_on_hour;

pub use cancel_training::CancelTrainingCommandHandler;
pub use cancel_training_on_hour::CancelTrainingOnHourCommandHandler;
pub use make_hours_available::MakeHoursAvailableCommandHandler;
pub use make_hours_unavailable::MakeHoursUnavailableCommandHandler;
pub use reschedule_training::RescheduleTrainingCommandHandler;
pub use schedule_training::ScheduleTrainingCommandHandler;
pub use schedule_training_on_hour::ScheduleTrainingOnHourCommandHandler;
