use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

/// Per-request context handed to every handler and port.
///
/// Cancellation is carried by the future itself: dropping a handler future
/// aborts whatever it is awaiting. The optional deadline is enforced at the
/// handler boundary.
#[derive(Debug, Clone)]
pub struct Context {
    request_id: Uuid,
    deadline: Option<Instant>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            deadline: None,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().deadline_at(Instant::now() + timeout)
    }

    pub fn deadline_at(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
