use metrics::Label;

/// Sink for handler metrics.
///
/// Calls are fire-and-forget: implementations must not block and must swallow
/// their own failures.
pub trait MetricsClient: Send + Sync {
    fn increment_counter(&self, name: &str, tags: &[(&str, &str)], delta: u64);
    fn record_histogram(&self, name: &str, tags: &[(&str, &str)], value: f64);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpMetrics;

impl MetricsClient for NoOpMetrics {
    fn increment_counter(&self, _name: &str, _tags: &[(&str, &str)], _delta: u64) {}

    fn record_histogram(&self, _name: &str, _tags: &[(&str, &str)], _value: f64) {}
}

/// Forwards to the global `metrics` recorder. Without an installed recorder
/// every call is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecorderMetrics;

impl RecorderMetrics {
    fn labels(tags: &[(&str, &str)]) -> Vec<Label> {
        tags.iter()
            .map(|(key, value)| Label::new(key.to_string(), value.to_string()))
            .collect()
    }
}

impl MetricsClient for RecorderMetrics {
    fn increment_counter(&self, name: &str, tags: &[(&str, &str)], delta: u64) {
        metrics::counter!(name.to_string(), Self::labels(tags)).increment(delta);
    }

    fn record_histogram(&self, name: &str, tags: &[(&str, &str)], value: f64) {
        metrics::histogram!(name.to_string(), Self::labels(tags)).record(value);
    }
}
