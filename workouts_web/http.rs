use axum::{
    Router,
    routing::{delete, get, put},
};
use std::{io::Error, net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;

use workouts_app::app::Application;
use workouts_types::errors::ApplicationError;

use crate::handlers::{
    cancel_training, get_hour_availability, get_trainer_calendar, list_trainings,
    make_hours_available, make_hours_unavailable, reschedule_training, schedule_training,
};

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
}

impl AppState {
    pub fn new(app: Arc<Application>) -> AppState {
        AppState { app }
    }
}

pub struct WebRouter {}

impl WebRouter {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/trainer/calendar", get(get_trainer_calendar))
            .route("/trainer/calendar/hour", get(get_hour_availability))
            .route(
                "/trainer/calendar/make-hour-available",
                put(make_hours_available),
            )
            .route(
                "/trainer/calendar/make-hour-unavailable",
                put(make_hours_unavailable),
            )
            .route("/trainings", get(list_trainings).post(schedule_training))
            .route("/trainings/{id}", delete(cancel_training))
            .route("/trainings/{id}/reschedule", put(reschedule_training))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(state: AppState, port: u16) -> Result<(), ApplicationError> {
        let router = Self::router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(infra_error)?;

        tracing::info!("HTTP Server started, listening on http://{}", addr);
        axum::serve(listener, router).await.map_err(infra_error)?;

        Ok(())
    }
}

fn infra_error(e: Error) -> ApplicationError {
    let err = format!("{:#?}", e);
    ApplicationError::Infrastructure(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use workouts_app::{
        app::AppDependencies,
        config::Config,
        test_utils::tests::{
            InMemoryMetrics, MockHourRepository, MockTrainingRepository, MockUserService,
        },
    };
    use workouts_domain::test_utils::{
        HourFactoryOptions, TrainingFactoryOptions, hour_factory, relative_date, training_factory,
    };

    struct Fixture {
        router: Router,
        hours: Arc<MockHourRepository>,
        trainings: Arc<MockTrainingRepository>,
    }

    fn fixture() -> Fixture {
        let hours = Arc::new(MockHourRepository::new());
        let trainings = Arc::new(MockTrainingRepository::new());
        let app = Application::new(
            AppDependencies {
                hours: hours.clone(),
                trainings: trainings.clone(),
                users: Arc::new(MockUserService::new()),
                metrics: Arc::new(InMemoryMetrics::default()),
            },
            &Config::default(),
        )
        .unwrap();

        Fixture {
            router: WebRouter::router(AppState::new(Arc::new(app))),
            hours,
            trainings,
        }
    }

    fn request(method: &str, uri: &str, user: Option<(&str, &str)>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some((id, role)) = user {
            builder = builder
                .header("x-user-id", id)
                .header("x-user-name", format!("User {id}"))
                .header("x-user-role", role);
        }

        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn rfc3339(time: chrono::DateTime<chrono::Utc>) -> String {
        time.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }

    #[tokio::test]
    async fn test_missing_user_is_unauthorized() {
        let f = fixture();

        let (status, body) = send(&f.router, request("GET", "/trainings", None, None)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["slug"], "unauthorized");
    }

    #[tokio::test]
    async fn test_attendee_cannot_open_hours() {
        let f = fixture();
        let time = relative_date(2, 13);

        let (status, _) = send(
            &f.router,
            request(
                "PUT",
                "/trainer/calendar/make-hour-available",
                Some(("attendee-1", "attendee")),
                Some(json!({ "hours": [rfc3339(time)] })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(f.hours.stored_hour(time).is_none());
    }

    #[tokio::test]
    async fn test_trainer_opens_hour() {
        let f = fixture();
        let time = relative_date(2, 13);

        let (status, _) = send(
            &f.router,
            request(
                "PUT",
                "/trainer/calendar/make-hour-available",
                Some(("trainer-1", "trainer")),
                Some(json!({ "hours": [rfc3339(time)] })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let uri = format!("/trainer/calendar/hour?hour={}", rfc3339(time));
        let (status, body) = send(
            &f.router,
            request("GET", &uri, Some(("attendee-1", "attendee")), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["available"], true);
    }

    #[tokio::test]
    async fn test_schedule_training_on_open_hour() {
        let f = fixture();
        let time = relative_date(3, 14);
        f.hours.add_hour(hour_factory(HourFactoryOptions {
            time: Some(time),
            available: Some(true),
            ..Default::default()
        }));

        let (status, body) = send(
            &f.router,
            request(
                "POST",
                "/trainings",
                Some(("attendee-1", "attendee")),
                Some(json!({ "time": rfc3339(time), "notes": "first time" })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        let id: uuid::Uuid = body["training_id"].as_str().unwrap().parse().unwrap();
        assert_eq!(f.trainings.stored_training(id).unwrap().notes(), "first time");
        assert!(f.hours.stored_hour(time).unwrap().has_training_scheduled());

        let (status, body) = send(
            &f.router,
            request("GET", "/trainings", Some(("attendee-1", "attendee")), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_someone_elses_training() {
        let f = fixture();
        let training = training_factory(TrainingFactoryOptions {
            user_id: Some("attendee-1".to_string()),
            ..Default::default()
        });
        f.trainings.add(training.clone());

        let (status, body) = send(
            &f.router,
            request(
                "DELETE",
                &format!("/trainings/{}", training.id()),
                Some(("attendee-2", "attendee")),
                None,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["slug"], "forbidden-to-see-training");
    }

    #[tokio::test]
    async fn test_cancel_unknown_and_malformed_ids() {
        let f = fixture();

        let (status, _) = send(
            &f.router,
            request(
                "DELETE",
                &format!("/trainings/{}", uuid::Uuid::new_v4()),
                Some(("trainer-1", "trainer")),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            &f.router,
            request(
                "DELETE",
                "/trainings/not-a-uuid",
                Some(("trainer-1", "trainer")),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["slug"], "invalid-training-id");
    }

    #[tokio::test]
    async fn test_calendar_rejects_inverted_range() {
        let f = fixture();
        let uri = format!(
            "/trainer/calendar?dateFrom={}&dateTo={}",
            rfc3339(relative_date(5, 0)),
            rfc3339(relative_date(1, 0)),
        );

        let (status, body) = send(
            &f.router,
            request("GET", &uri, Some(("trainer-1", "trainer")), None),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["slug"], "date-from-after-date-to");
    }
}
