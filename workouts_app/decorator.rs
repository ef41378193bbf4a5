//! Cross-cutting behaviour shared by every handler.
//!
//! Handlers are wrapped once, at construction time, in a fixed order
//! (outermost first):
//!
//! 1. logging: entry/exit events with elapsed time and outcome;
//! 2. metrics: duration histogram and success/failure counters;
//! 3. recovery: panic isolation and deadline enforcement.
//!
//! The decorated handler exposes the same trait as the base one and returns
//! its result untouched.

mod logging;
mod metrics;
mod recovery;

use std::sync::Arc;
use tracing::Span;

pub use logging::{CommandLoggingDecorator, QueryLoggingDecorator};
pub use metrics::{CommandMetricsDecorator, QueryMetricsDecorator};
pub use recovery::{CommandRecoveryDecorator, QueryRecoveryDecorator};

use crate::{
    cqrs::{Command, CommandHandler, Query, QueryHandler},
    metrics_client::MetricsClient,
};

pub fn apply_command_decorators<C, H>(
    handler: H,
    logger: Span,
    metrics_client: Arc<dyn MetricsClient>,
) -> Arc<dyn CommandHandler<C>>
where
    C: Command,
    H: CommandHandler<C> + 'static,
{
    Arc::new(CommandLoggingDecorator::new(
        CommandMetricsDecorator::new(CommandRecoveryDecorator::new(handler), metrics_client),
        logger,
    ))
}

pub fn apply_query_decorators<Q, H>(
    handler: H,
    logger: Span,
    metrics_client: Arc<dyn MetricsClient>,
) -> Arc<dyn QueryHandler<Q>>
where
    Q: Query,
    H: QueryHandler<Q> + 'static,
{
    Arc::new(QueryLoggingDecorator::new(
        QueryMetricsDecorator::new(QueryRecoveryDecorator::new(handler), metrics_client),
        logger,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;

    use workouts_types::errors::{ApplicationError, DomainError};

    use crate::{context::Context, test_utils::tests::InMemoryMetrics};

    #[derive(Debug)]
    struct Ping {
        value: u32,
    }

    impl Command for Ping {}

    impl Query for Ping {
        type Output = Vec<u32>;
    }

    enum Behaviour {
        Succeed,
        Fail,
        Panic,
        Sleep(Duration),
    }

    struct TestHandler {
        behaviour: Behaviour,
    }

    impl TestHandler {
        async fn run(&self, value: u32) -> Result<Vec<u32>, ApplicationError> {
            match self.behaviour {
                Behaviour::Succeed => Ok(vec![value, value + 1]),
                Behaviour::Fail => Err(DomainError::TooLateToReschedule(uuid::Uuid::nil()).into()),
                Behaviour::Panic => panic!("boom"),
                Behaviour::Sleep(duration) => {
                    tokio::time::sleep(duration).await;
                    Ok(vec![value])
                }
            }
        }
    }

    #[async_trait]
    impl CommandHandler<Ping> for TestHandler {
        async fn handle(&self, _ctx: &Context, cmd: Ping) -> Result<(), ApplicationError> {
            self.run(cmd.value).await.map(|_| ())
        }
    }

    #[async_trait]
    impl QueryHandler<Ping> for TestHandler {
        async fn handle(&self, _ctx: &Context, query: Ping) -> Result<Vec<u32>, ApplicationError> {
            self.run(query.value).await
        }
    }

    fn decorated_query(behaviour: Behaviour) -> (Arc<dyn QueryHandler<Ping>>, Arc<InMemoryMetrics>) {
        let metrics = Arc::new(InMemoryMetrics::default());
        let handler = apply_query_decorators(
            TestHandler { behaviour },
            tracing::info_span!("test"),
            metrics.clone(),
        );
        (handler, metrics)
    }

    fn decorated_command(
        behaviour: Behaviour,
    ) -> (Arc<dyn CommandHandler<Ping>>, Arc<InMemoryMetrics>) {
        let metrics = Arc::new(InMemoryMetrics::default());
        let handler = apply_command_decorators(
            TestHandler { behaviour },
            tracing::info_span!("test"),
            metrics.clone(),
        );
        (handler, metrics)
    }

    #[tokio::test]
    async fn test_decorated_query_returns_base_result() {
        let ctx = Context::new();
        let base = TestHandler {
            behaviour: Behaviour::Succeed,
        };
        let expected = QueryHandler::handle(&base, &ctx, Ping { value: 7 })
            .await
            .unwrap();

        let (handler, _) = decorated_query(Behaviour::Succeed);
        let result = handler.handle(&ctx, Ping { value: 7 }).await.unwrap();

        assert_eq!(result, expected);
    }

    #[tokio::test]
    async fn test_domain_errors_pass_through() {
        let (handler, _) = decorated_command(Behaviour::Fail);

        let result = handler.handle(&Context::new(), Ping { value: 1 }).await;

        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::TooLateToReschedule(_)))
        ));
    }

    #[tokio::test]
    async fn test_panic_is_isolated() {
        let (handler, metrics) = decorated_command(Behaviour::Panic);

        let result = handler.handle(&Context::new(), Ping { value: 1 }).await;

        assert!(matches!(result, Err(ApplicationError::Internal(_))));
        assert_eq!(metrics.counter("commands.ping.failure"), 1);

        // the handler stays usable after a fault
        let result = handler.handle(&Context::new(), Ping { value: 2 }).await;
        assert!(matches!(result, Err(ApplicationError::Internal(_))));
    }

    #[tokio::test]
    async fn test_query_panic_is_isolated() {
        let (handler, _) = decorated_query(Behaviour::Panic);

        let result = handler.handle(&Context::new(), Ping { value: 1 }).await;

        assert!(matches!(result, Err(ApplicationError::Internal(_))));
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let (handler, metrics) = decorated_query(Behaviour::Sleep(Duration::from_secs(5)));
        let ctx = Context::with_timeout(Duration::from_millis(10));

        let result = handler.handle(&ctx, Ping { value: 1 }).await;

        assert!(matches!(result, Err(ApplicationError::Timeout)));
        assert_eq!(metrics.counter("queries.ping.failure"), 1);
    }

    #[tokio::test]
    async fn test_deadline_not_reached() {
        let (handler, _) = decorated_query(Behaviour::Sleep(Duration::from_millis(1)));
        let ctx = Context::with_timeout(Duration::from_secs(5));

        let result = handler.handle(&ctx, Ping { value: 3 }).await.unwrap();

        assert_eq!(result, vec![3]);
    }

    #[tokio::test]
    async fn test_metrics_recorded_per_outcome() {
        let (handler, metrics) = decorated_command(Behaviour::Succeed);

        handler.handle(&Context::new(), Ping { value: 1 }).await.unwrap();
        handler.handle(&Context::new(), Ping { value: 2 }).await.unwrap();

        assert_eq!(metrics.counter("commands.ping.success"), 2);
        assert_eq!(metrics.counter("commands.ping.failure"), 0);
        assert_eq!(metrics.histogram_samples("commands.ping.duration"), 2);

        let (handler, metrics) = decorated_command(Behaviour::Fail);
        let _ = handler.handle(&Context::new(), Ping { value: 1 }).await;

        assert_eq!(metrics.counter("commands.ping.success"), 0);
        assert_eq!(metrics.counter("commands.ping.failure"), 1);
    }
}
