use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;

use workouts_app::{
    app::{AppDependencies, Application},
    config::Config,
    metrics_client::{MetricsClient, NoOpMetrics, RecorderMetrics},
};
use workouts_db::{
    InMemoryHourRepository, InMemoryTrainingRepository, InMemoryUserService,
    PostgresHourRepository, PostgresTrainingRepository, PostgresUserService,
    establish_connection_pool, run_migrations,
};
use workouts_domain::models::hour::HourFactory;
use workouts_types::{Result, errors::ApplicationError};

/// In-process storage, handy for local runs and end-to-end tests.
pub struct InMemoryStorage {
    pub hours: Arc<InMemoryHourRepository>,
    pub trainings: Arc<InMemoryTrainingRepository>,
    pub users: Arc<InMemoryUserService>,
}

impl InMemoryStorage {
    pub fn new(factory: HourFactory) -> Self {
        Self {
            hours: Arc::new(InMemoryHourRepository::new(factory)),
            trainings: Arc::new(InMemoryTrainingRepository::new()),
            users: Arc::new(InMemoryUserService::new()),
        }
    }

    pub fn dependencies(&self, metrics: Arc<dyn MetricsClient>) -> AppDependencies {
        AppDependencies {
            hours: self.hours.clone(),
            trainings: self.trainings.clone(),
            users: self.users.clone(),
            metrics,
        }
    }
}

/// Installs the Prometheus exporter when an address is configured.
pub fn setup_metrics(config: &Config) -> Result<Arc<dyn MetricsClient>> {
    let Some(addr) = config.metrics_addr else {
        tracing::info!("Metrics exporter disabled");
        return Ok(Arc::new(NoOpMetrics));
    };

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| ApplicationError::Infrastructure(e.to_string()))?;

    tracing::info!("Prometheus metrics exposed on http://{}/metrics", addr);
    Ok(Arc::new(RecorderMetrics))
}

/// Builds the application on PostgreSQL when `DATABASE_URL` is set, on
/// in-memory storage otherwise.
pub async fn setup_app(
    config: &Config,
    metrics: Arc<dyn MetricsClient>,
) -> Result<Arc<Application>> {
    let factory = HourFactory::new(config.hour_factory)?;

    let deps = match &config.database_url {
        Some(database_url) => {
            let pool = establish_connection_pool(database_url).await?;
            run_migrations(&pool).await?;
            tracing::info!("Using PostgreSQL storage");

            AppDependencies {
                hours: Arc::new(PostgresHourRepository::new(pool.clone(), factory)),
                trainings: Arc::new(PostgresTrainingRepository::new(pool.clone())),
                users: Arc::new(PostgresUserService::new(pool)),
                metrics,
            }
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage");
            InMemoryStorage::new(factory).dependencies(metrics)
        }
    };

    Ok(Arc::new(Application::new(deps, config)?))
}
