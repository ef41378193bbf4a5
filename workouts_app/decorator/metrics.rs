use async_trait::async_trait;
use std::{sync::Arc, time::Duration, time::Instant};

use workouts_types::errors::ApplicationError;

use crate::{
    context::Context,
    cqrs::{Command, CommandHandler, Query, QueryHandler, action_name},
    metrics_client::MetricsClient,
};

pub struct CommandMetricsDecorator<H> {
    base: H,
    client: Arc<dyn MetricsClient>,
}

impl<H> CommandMetricsDecorator<H> {
    pub fn new(base: H, client: Arc<dyn MetricsClient>) -> Self {
        Self { base, client }
    }
}

#[async_trait]
impl<C, H> CommandHandler<C> for CommandMetricsDecorator<H>
where
    C: Command,
    H: CommandHandler<C>,
{
    async fn handle(&self, ctx: &Context, cmd: C) -> Result<(), ApplicationError> {
        let start = Instant::now();
        let result = self.base.handle(ctx, cmd).await;
        record(
            self.client.as_ref(),
            "commands",
            action_name::<C>(),
            start.elapsed(),
            result.is_ok(),
        );
        result
    }
}

pub struct QueryMetricsDecorator<H> {
    base: H,
    client: Arc<dyn MetricsClient>,
}

impl<H> QueryMetricsDecorator<H> {
    pub fn new(base: H, client: Arc<dyn MetricsClient>) -> Self {
        Self { base, client }
    }
}

#[async_trait]
impl<Q, H> QueryHandler<Q> for QueryMetricsDecorator<H>
where
    Q: Query,
    H: QueryHandler<Q>,
{
    async fn handle(&self, ctx: &Context, query: Q) -> Result<Q::Output, ApplicationError> {
        let start = Instant::now();
        let result = self.base.handle(ctx, query).await;
        record(
            self.client.as_ref(),
            "queries",
            action_name::<Q>(),
            start.elapsed(),
            result.is_ok(),
        );
        result
    }
}

fn record(
    client: &dyn MetricsClient,
    family: &str,
    action: &str,
    elapsed: Duration,
    success: bool,
) {
    let action = action.to_lowercase();
    let outcome = if success { "success" } else { "failure" };
    let tags = [("action", action.as_str()), ("outcome", outcome)];

    client.record_histogram(
        &format!("{family}.{action}.duration"),
        &tags,
        elapsed.as_secs_f64(),
    );
    client.increment_counter(&format!("{family}.{action}.{outcome}"), &tags, 1);
}
