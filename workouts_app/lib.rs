pub mod app;
pub mod command_handlers;
pub mod config;
pub mod context;
pub mod cqrs;
pub mod decorator;
pub mod metrics_client;
pub mod queries_handlers;
pub mod repository;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
