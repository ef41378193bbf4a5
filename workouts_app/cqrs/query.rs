use async_trait::async_trait;
use std::fmt::Debug;

use workouts_types::errors::ApplicationError;

use crate::context::Context;

/// A marker trait for Query structs.
/// Queries are operations that read the state of the system.
pub trait Query: Debug + Send + Sync + 'static {
    /// The data type that this query will return.
    type Output: Send + 'static;
}

/// A trait for handlers that execute Queries.
/// It should *never* modify the state.
#[async_trait]
pub trait QueryHandler<Q: Query>: Send + Sync {
    async fn handle(&self, ctx: &Context, query: Q) -> Result<Q::Output, ApplicationError>;
}
