use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use workouts_app::cqrs::{
    commands::{CancelTraining, RescheduleTraining, ScheduleTraining},
    queries::{AllTrainings, TrainingView, TrainingsForUser},
};
use workouts_types::common::UserRole;

use super::parse_training_id;
use crate::{auth::CurrentUser, error::ApiError, http::AppState};

#[derive(Debug, Deserialize)]
pub struct ScheduleTrainingRequest {
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Serialize)]
pub struct ScheduleTrainingResponse {
    pub training_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RescheduleTrainingRequest {
    pub time: DateTime<Utc>,
}

/// Trainers see every training, attendees only their own.
pub async fn list_trainings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<TrainingView>>, ApiError> {
    let ctx = state.app.new_context();
    let queries = &state.app.trainings.queries;

    let trainings = if user.is_trainer() {
        queries.all_trainings.handle(&ctx, AllTrainings).await?
    } else {
        queries
            .trainings_for_user
            .handle(&ctx, TrainingsForUser { user })
            .await?
    };

    Ok(Json(trainings))
}

pub async fn schedule_training(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<ScheduleTrainingRequest>,
) -> Result<(StatusCode, Json<ScheduleTrainingResponse>), ApiError> {
    let user = user.require_role(UserRole::Attendee)?.clone();
    let training_id = Uuid::new_v4();

    state
        .app
        .trainings
        .commands
        .schedule_training
        .handle(
            &state.app.new_context(),
            ScheduleTraining {
                training_id,
                user,
                time: request.time,
                notes: request.notes,
            },
        )
        .await
        .map_err(|err| ApiError::for_training(training_id, err))?;

    Ok((
        StatusCode::CREATED,
        Json(ScheduleTrainingResponse { training_id }),
    ))
}

pub async fn cancel_training(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(training_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let training_id = parse_training_id(&training_id)?;

    state
        .app
        .trainings
        .commands
        .cancel_training
        .handle(
            &state.app.new_context(),
            CancelTraining { training_id, user },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn reschedule_training(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(training_id): Path<String>,
    Json(request): Json<RescheduleTrainingRequest>,
) -> Result<StatusCode, ApiError> {
    let training_id = parse_training_id(&training_id)?;

    state
        .app
        .trainings
        .commands
        .reschedule_training
        .handle(
            &state.app.new_context(),
            RescheduleTraining {
                training_id,
                user,
                new_time: request.time,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
