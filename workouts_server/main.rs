use workouts_app::config::Config;
use workouts_server::{
    logs::setup_logging,
    setup::{setup_app, setup_metrics},
};
use workouts_types::{Result, errors::ApplicationError};
use workouts_web::{AppState, WebRouter};

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<(), ApplicationError> {
    let _log_guard = setup_logging();

    let config = Config::from_env();
    let metrics = setup_metrics(&config)?;
    let app = setup_app(&config, metrics).await?;

    WebRouter::serve(AppState::new(app), config.http_port).await
}
