//! Application façade: every handler, decorated once and wired together.
//!
//! The façade is built at startup and shared as `Arc<Application>`; it holds no
//! mutable state.

use std::{sync::Arc, time::Duration};
use tracing::info_span;

use workouts_types::Result;

use crate::{
    command_handlers::{
        CancelTrainingCommandHandler, CancelTrainingOnHourCommandHandler,
        MakeHoursAvailableCommandHandler, MakeHoursUnavailableCommandHandler,
        RescheduleTrainingCommandHandler, ScheduleTrainingCommandHandler,
        ScheduleTrainingOnHourCommandHandler,
    },
    config::Config,
    context::Context,
    cqrs::{
        CommandHandler, QueryHandler,
        commands::{
            CancelTraining, CancelTrainingOnHour, MakeHoursAvailable, MakeHoursUnavailable,
            RescheduleTraining, ScheduleTraining, ScheduleTrainingOnHour,
        },
        queries::{AllTrainings, AvailableHours, HourAvailability, TrainingsForUser},
    },
    decorator::{apply_command_decorators, apply_query_decorators},
    metrics_client::MetricsClient,
    queries_handlers::{
        AllTrainingsHandler, AvailableHoursHandler, HourAvailabilityHandler,
        TrainingsForUserHandler,
    },
    repository::{HourRepository, TrainingRepository},
    services::{LocalTrainerService, TrainerService, UserService},
};

#[derive(Clone)]
pub struct TrainerCommands {
    pub make_hours_available: Arc<dyn CommandHandler<MakeHoursAvailable>>,
    pub make_hours_unavailable: Arc<dyn CommandHandler<MakeHoursUnavailable>>,
    pub schedule_training: Arc<dyn CommandHandler<ScheduleTrainingOnHour>>,
    pub cancel_training: Arc<dyn CommandHandler<CancelTrainingOnHour>>,
}

#[derive(Clone)]
pub struct TrainerQueries {
    pub hour_availability: Arc<dyn QueryHandler<HourAvailability>>,
    pub available_hours: Arc<dyn QueryHandler<AvailableHours>>,
}

/// The trainer's hour calendar.
#[derive(Clone)]
pub struct TrainerApplication {
    pub commands: TrainerCommands,
    pub queries: TrainerQueries,
}

impl TrainerApplication {
    pub fn new(
        hours: Arc<dyn HourRepository>,
        config: &Config,
        metrics: Arc<dyn MetricsClient>,
    ) -> Self {
        let logger = info_span!("trainer");

        let commands = TrainerCommands {
            make_hours_available: apply_command_decorators(
                MakeHoursAvailableCommandHandler::new(hours.clone()),
                logger.clone(),
                metrics.clone(),
            ),
            make_hours_unavailable: apply_command_decorators(
                MakeHoursUnavailableCommandHandler::new(hours.clone()),
                logger.clone(),
                metrics.clone(),
            ),
            schedule_training: apply_command_decorators(
                ScheduleTrainingOnHourCommandHandler::new(hours.clone()),
                logger.clone(),
                metrics.clone(),
            ),
            cancel_training: apply_command_decorators(
                CancelTrainingOnHourCommandHandler::new(hours.clone()),
                logger.clone(),
                metrics.clone(),
            ),
        };

        let queries = TrainerQueries {
            hour_availability: apply_query_decorators(
                HourAvailabilityHandler::new(hours.clone()),
                logger.clone(),
                metrics.clone(),
            ),
            available_hours: apply_query_decorators(
                AvailableHoursHandler::new(hours, config.hour_factory),
                logger,
                metrics,
            ),
        };

        Self { commands, queries }
    }
}

#[derive(Clone)]
pub struct TrainingsCommands {
    pub schedule_training: Arc<dyn CommandHandler<ScheduleTraining>>,
    pub cancel_training: Arc<dyn CommandHandler<CancelTraining>>,
    pub reschedule_training: Arc<dyn CommandHandler<RescheduleTraining>>,
}

#[derive(Clone)]
pub struct TrainingsQueries {
    pub trainings_for_user: Arc<dyn QueryHandler<TrainingsForUser>>,
    pub all_trainings: Arc<dyn QueryHandler<AllTrainings>>,
}

/// Attendee trainings, their balance and the bookings on the trainer side.
#[derive(Clone)]
pub struct TrainingsApplication {
    pub commands: TrainingsCommands,
    pub queries: TrainingsQueries,
}

impl TrainingsApplication {
    pub fn new(
        trainings: Arc<dyn TrainingRepository>,
        users: Arc<dyn UserService>,
        trainer: Arc<dyn TrainerService>,
        metrics: Arc<dyn MetricsClient>,
    ) -> Self {
        let logger = info_span!("trainings");

        let commands = TrainingsCommands {
            schedule_training: apply_command_decorators(
                ScheduleTrainingCommandHandler::new(
                    trainings.clone(),
                    users.clone(),
                    trainer.clone(),
                ),
                logger.clone(),
                metrics.clone(),
            ),
            cancel_training: apply_command_decorators(
                CancelTrainingCommandHandler::new(trainings.clone(), users, trainer.clone()),
                logger.clone(),
                metrics.clone(),
            ),
            reschedule_training: apply_command_decorators(
                RescheduleTrainingCommandHandler::new(trainings.clone(), trainer),
                logger.clone(),
                metrics.clone(),
            ),
        };

        let queries = TrainingsQueries {
            trainings_for_user: apply_query_decorators(
                TrainingsForUserHandler::new(trainings.clone()),
                logger.clone(),
                metrics.clone(),
            ),
            all_trainings: apply_query_decorators(
                AllTrainingsHandler::new(trainings),
                logger,
                metrics,
            ),
        };

        Self { commands, queries }
    }
}

/// Storage and collaborators the application is built on.
pub struct AppDependencies {
    pub hours: Arc<dyn HourRepository>,
    pub trainings: Arc<dyn TrainingRepository>,
    pub users: Arc<dyn UserService>,
    pub metrics: Arc<dyn MetricsClient>,
}

pub struct Application {
    pub trainer: TrainerApplication,
    pub trainings: TrainingsApplication,
    handler_timeout: Duration,
}

impl Application {
    /// Wires both contexts. The trainings side reaches the trainer calendar
    /// in process through [`LocalTrainerService`].
    pub fn new(deps: AppDependencies, config: &Config) -> Result<Self> {
        config.hour_factory.validate()?;

        let trainer = TrainerApplication::new(deps.hours, config, deps.metrics.clone());
        let trainer_service: Arc<dyn TrainerService> =
            Arc::new(LocalTrainerService::new(&trainer.commands));
        let trainings =
            TrainingsApplication::new(deps.trainings, deps.users, trainer_service, deps.metrics);

        Ok(Self {
            trainer,
            trainings,
            handler_timeout: config.handler_timeout,
        })
    }

    /// A fresh request context carrying the configured handler deadline.
    pub fn new_context(&self) -> Context {
        Context::with_timeout(self.handler_timeout)
    }
}
