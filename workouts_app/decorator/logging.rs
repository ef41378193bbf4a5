use async_trait::async_trait;
use std::time::Instant;
use tracing::{Instrument, Span};

use workouts_types::errors::{ApplicationError, ErrorKind};

use crate::{
    context::Context,
    cqrs::{Command, CommandHandler, Query, QueryHandler, action_name},
};

pub struct CommandLoggingDecorator<H> {
    base: H,
    logger: Span,
}

impl<H> CommandLoggingDecorator<H> {
    pub fn new(base: H, logger: Span) -> Self {
        Self { base, logger }
    }
}

#[async_trait]
impl<C, H> CommandHandler<C> for CommandLoggingDecorator<H>
where
    C: Command,
    H: CommandHandler<C>,
{
    async fn handle(&self, ctx: &Context, cmd: C) -> Result<(), ApplicationError> {
        let span = tracing::info_span!(
            parent: &self.logger,
            "command",
            command = action_name::<C>(),
            request_id = %ctx.request_id(),
        );

        async move {
            tracing::debug!(command_body = ?cmd, "Executing command");
            let start = Instant::now();

            let result = self.base.handle(ctx, cmd).await;

            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "Command executed successfully"),
                Err(err) => log_failure(err, elapsed_ms, "Failed to execute command"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

pub struct QueryLoggingDecorator<H> {
    base: H,
    logger: Span,
}

impl<H> QueryLoggingDecorator<H> {
    pub fn new(base: H, logger: Span) -> Self {
        Self { base, logger }
    }
}

#[async_trait]
impl<Q, H> QueryHandler<Q> for QueryLoggingDecorator<H>
where
    Q: Query,
    H: QueryHandler<Q>,
{
    async fn handle(&self, ctx: &Context, query: Q) -> Result<Q::Output, ApplicationError> {
        let span = tracing::info_span!(
            parent: &self.logger,
            "query",
            query = action_name::<Q>(),
            request_id = %ctx.request_id(),
        );

        async move {
            tracing::debug!(query_body = ?query, "Executing query");
            let start = Instant::now();

            let result = self.base.handle(ctx, query).await;

            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(_) => tracing::debug!(elapsed_ms, "Query executed successfully"),
                Err(err) => log_failure(err, elapsed_ms, "Failed to execute query"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Expected failures (bad input, business rules) are warnings; anything the
/// caller can't fix is an error.
fn log_failure(err: &ApplicationError, elapsed_ms: u64, message: &str) {
    match err.kind() {
        ErrorKind::Collaborator | ErrorKind::Timeout | ErrorKind::Internal => {
            tracing::error!(elapsed_ms, error = %err, slug = err.slug(), "{message}")
        }
        _ => tracing::warn!(elapsed_ms, error = %err, slug = err.slug(), "{message}"),
    }
}
