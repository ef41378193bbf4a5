use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use workouts_app::cqrs::{
    commands::{MakeHoursAvailable, MakeHoursUnavailable},
    queries::{AvailableHours, Date, HourAvailability},
};
use workouts_types::common::UserRole;

use crate::{auth::CurrentUser, error::ApiError, http::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarParams {
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct HourParams {
    pub hour: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct HourAvailabilityResponse {
    pub available: bool,
}

#[derive(Debug, Deserialize)]
pub struct HoursRequest {
    pub hours: Vec<DateTime<Utc>>,
}

pub async fn get_trainer_calendar(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<CalendarParams>,
) -> Result<Json<Vec<Date>>, ApiError> {
    let dates = state
        .app
        .trainer
        .queries
        .available_hours
        .handle(
            &state.app.new_context(),
            AvailableHours {
                from: params.date_from,
                to: params.date_to,
            },
        )
        .await?;

    Ok(Json(dates))
}

pub async fn get_hour_availability(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<HourParams>,
) -> Result<Json<HourAvailabilityResponse>, ApiError> {
    let available = state
        .app
        .trainer
        .queries
        .hour_availability
        .handle(
            &state.app.new_context(),
            HourAvailability { hour: params.hour },
        )
        .await?;

    Ok(Json(HourAvailabilityResponse { available }))
}

pub async fn make_hours_available(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<HoursRequest>,
) -> Result<StatusCode, ApiError> {
    user.require_role(UserRole::Trainer)?;

    state
        .app
        .trainer
        .commands
        .make_hours_available
        .handle(
            &state.app.new_context(),
            MakeHoursAvailable {
                hours: request.hours,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn make_hours_unavailable(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<HoursRequest>,
) -> Result<StatusCode, ApiError> {
    user.require_role(UserRole::Trainer)?;

    state
        .app
        .trainer
        .commands
        .make_hours_unavailable
        .handle(
            &state.app.new_context(),
            MakeHoursUnavailable {
                hours: request.hours,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
