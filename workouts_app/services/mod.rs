//! Ports to collaborator services, called by command handlers after the
//! aggregate write.

mod local_trainer_service;
mod trainer_service;
mod user_service;

pub use local_trainer_service::LocalTrainerService;
pub use trainer_service::TrainerService;
pub use user_service::UserService;
