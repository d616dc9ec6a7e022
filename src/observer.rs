use std::time::Duration;

/// Details of a failed attempt that is about to be retried.
#[derive(Debug)]
pub struct RetryAttempt<'a> {
    /// 1-based index of the attempt that just failed.
    pub attempt: u32,
    /// Retries left after this one, not counting the upcoming attempt.
    pub remaining: u32,
    /// Pause applied before the next attempt.
    pub delay: Duration,
    /// Error reported by the transport.
    pub error: &'a (dyn std::error::Error + 'static),
}

/// Receives a notification for every failure that will be retried.
///
/// Never called for the final failure, and never under
/// [`Execution::Single`](crate::Execution::Single).
pub trait RetryObserver: Send + Sync {
    fn on_retry(&self, attempt: &RetryAttempt<'_>);
}

impl<F> RetryObserver for F
where
    F: Fn(&RetryAttempt<'_>) + Send + Sync,
{
    fn on_retry(&self, attempt: &RetryAttempt<'_>) {
        self(attempt)
    }
}

/// Default observer: one `info` event per retried failure.
///
/// Does nothing when the `tracing` feature is disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl RetryObserver for LogObserver {
    fn on_retry(&self, attempt: &RetryAttempt<'_>) {
        #[cfg(feature = "tracing")]
        tracing::info!(
            attempt = attempt.attempt,
            remaining = attempt.remaining,
            delay = ?attempt.delay,
            "failed to execute request: {}. Retrying",
            attempt.error
        );

        #[cfg(not(feature = "tracing"))]
        let _ = attempt;
    }
}
