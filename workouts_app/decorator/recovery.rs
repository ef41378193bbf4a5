use async_trait::async_trait;
use futures::FutureExt;
use std::{any::Any, future::Future, panic::AssertUnwindSafe};

use workouts_types::errors::ApplicationError;

use crate::{
    context::Context,
    cqrs::{Command, CommandHandler, Query, QueryHandler, action_name},
};

/// Innermost decorator: turns panics into [`ApplicationError::Internal`] and
/// enforces the context deadline.
pub struct CommandRecoveryDecorator<H> {
    base: H,
}

impl<H> CommandRecoveryDecorator<H> {
    pub fn new(base: H) -> Self {
        Self { base }
    }
}

#[async_trait]
impl<C, H> CommandHandler<C> for CommandRecoveryDecorator<H>
where
    C: Command,
    H: CommandHandler<C>,
{
    async fn handle(&self, ctx: &Context, cmd: C) -> Result<(), ApplicationError> {
        guard(ctx, action_name::<C>(), self.base.handle(ctx, cmd)).await
    }
}

pub struct QueryRecoveryDecorator<H> {
    base: H,
}

impl<H> QueryRecoveryDecorator<H> {
    pub fn new(base: H) -> Self {
        Self { base }
    }
}

#[async_trait]
impl<Q, H> QueryHandler<Q> for QueryRecoveryDecorator<H>
where
    Q: Query,
    H: QueryHandler<Q>,
{
    async fn handle(&self, ctx: &Context, query: Q) -> Result<Q::Output, ApplicationError> {
        guard(ctx, action_name::<Q>(), self.base.handle(ctx, query)).await
    }
}

async fn guard<T, F>(ctx: &Context, action: &'static str, fut: F) -> Result<T, ApplicationError>
where
    F: Future<Output = Result<T, ApplicationError>> + Send,
{
    let fut = AssertUnwindSafe(fut).catch_unwind();

    let outcome = match ctx.deadline() {
        Some(deadline) => match tokio::time::timeout_at(deadline, fut).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(action, "Deadline exceeded");
                return Err(ApplicationError::Timeout);
            }
        },
        None => fut.await,
    };

    outcome.unwrap_or_else(|panic| {
        tracing::error!(action, panic = %panic_message(panic.as_ref()), "Handler panicked");
        Err(ApplicationError::Internal(format!("{action} failed unexpectedly")))
    })
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
