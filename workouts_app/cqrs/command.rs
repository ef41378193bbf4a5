use async_trait::async_trait;
use std::fmt::Debug;

use workouts_types::errors::ApplicationError;

use crate::context::Context;

/// A marker trait for Command structs.
/// Commands are operations that change the state of the system.
pub trait Command: Debug + Send + Sync + 'static {}

/// A trait for handlers that execute Commands.
/// Handlers own their dependencies; cross-cutting concerns (logging, metrics,
/// fault isolation) are added by the decorators in [`crate::decorator`].
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, ctx: &Context, cmd: C) -> Result<(), ApplicationError>;
}
