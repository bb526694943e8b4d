//! Per-request deadline checked before and raced against storage calls.

use crate::error::AppError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Clone, Copy, Debug)]
pub struct RequestContext {
    deadline: Option<Instant>,
}

impl RequestContext {
    /// No deadline.
    pub fn background() -> Self {
        RequestContext { deadline: None }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        RequestContext {
            deadline: Some(Instant::now() + timeout),
        }
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        RequestContext {
            deadline: Some(deadline),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Run `fut` unless the deadline already passed; drop it if the deadline passes first.
    /// Dropping an in-flight store future rolls back any uncommitted transaction it holds.
    pub async fn run<T, F>(&self, op: &'static str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        if self.is_expired() {
            tracing::warn!(op, "deadline passed before storage call");
            return Err(AppError::Timeout);
        }
        match self.deadline {
            None => fut.await,
            Some(deadline) => match tokio::time::timeout_at(deadline, fut).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(op, "deadline exceeded, abandoning storage call");
                    Err(AppError::Timeout)
                }
            },
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}
