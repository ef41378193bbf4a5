use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use uuid::Uuid;

use workouts_types::errors::{ApplicationError, ErrorKind};

/// Error returned by every HTTP handler.
#[derive(Debug)]
pub enum ApiError {
    Application(ApplicationError),
    /// The training was stored, a follow-up step failed. The id is returned
    /// so the caller can still reach it.
    TrainingCommitted {
        training_id: Uuid,
        error: ApplicationError,
    },
    Unauthorized(String),
    Forbidden(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    slug: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    training_id: Option<Uuid>,
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl ApiError {
    /// Keeps the id of a training whose write succeeded before `err`.
    pub fn for_training(training_id: Uuid, err: ApplicationError) -> Self {
        match err {
            ApplicationError::PartialFailure { .. } => ApiError::TrainingCommitted {
                training_id,
                error: err,
            },
            err => ApiError::Application(err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Application(err) | ApiError::TrainingCommitted { error: err, .. } => {
                match err.kind() {
                    ErrorKind::Validation => StatusCode::BAD_REQUEST,
                    ErrorKind::Domain | ErrorKind::Conflict => StatusCode::CONFLICT,
                    ErrorKind::Forbidden => StatusCode::FORBIDDEN,
                    ErrorKind::NotFound => StatusCode::NOT_FOUND,
                    ErrorKind::Collaborator => StatusCode::BAD_GATEWAY,
                    ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
                    ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
                }
            }
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::Unauthorized(message) => ErrorBody {
                slug: "unauthorized",
                message: message.clone(),
                training_id: None,
            },
            ApiError::Forbidden(message) => ErrorBody {
                slug: "forbidden",
                message: message.clone(),
                training_id: None,
            },
            ApiError::Application(err) if err.kind() == ErrorKind::Internal => ErrorBody {
                slug: err.slug(),
                message: "Internal server error".to_string(),
                training_id: None,
            },
            ApiError::Application(err) => ErrorBody {
                slug: err.slug(),
                message: err.to_string(),
                training_id: None,
            },
            ApiError::TrainingCommitted { training_id, error } => ErrorBody {
                slug: error.slug(),
                message: error.to_string(),
                training_id: Some(*training_id),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = ?self, "request failed");
        }

        (status, Json(self.body())).into_response()
    }
}
