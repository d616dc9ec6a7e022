use std::time::Duration;

use tokio::time::sleep;

use crate::{HttpClientError, Request, Result, RetryAttempt, RetryObserver, Transport};

/// Computes the pause between two attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Backoff {
    /// Same delay after every failed attempt.
    Constant(Duration),
}

impl Backoff {
    /// Delay to apply after the failed attempt with the given 1-based index.
    pub fn delay(&self, _attempt: u32) -> Duration {
        match self {
            Self::Constant(delay) => *delay,
        }
    }
}

/// Bounded retries with a delay between attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    retries: u32,
    backoff: Backoff,
}

impl RetryPolicy {
    /// `retries` additional attempts after the first, `delay` apart.
    pub fn fixed(retries: u32, delay: Duration) -> Self {
        Self {
            retries,
            backoff: Backoff::Constant(delay),
        }
    }

    /// Like [`RetryPolicy::fixed`], from a signed millisecond delay.
    ///
    /// Fails with [`HttpClientError::InvalidArgument`] when `delay_ms` is negative.
    pub fn from_millis(retries: u32, delay_ms: i64) -> Result<Self> {
        let delay_ms = u64::try_from(delay_ms)
            .map_err(|_| HttpClientError::invalid(format!("negative delay: {delay_ms}ms")))?;
        Ok(Self::fixed(retries, Duration::from_millis(delay_ms)))
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Upper bound on transport calls for one request.
    pub fn max_attempts(&self) -> u64 {
        u64::from(self.retries) + 1
    }

    async fn run<T: Transport>(
        &self,
        transport: &T,
        request: &Request,
        observer: &dyn RetryObserver,
    ) -> std::result::Result<T::Response, T::Error> {
        let mut remaining = self.retries;
        let mut attempt = 0u32;
        loop {
            attempt = attempt.saturating_add(1);
            match transport.execute(request).await {
                Ok(response) => return Ok(response),
                Err(err) if remaining > 0 => {
                    remaining -= 1;
                    let delay = self.backoff.delay(attempt);
                    observer.on_retry(&RetryAttempt {
                        attempt,
                        remaining,
                        delay,
                        error: &err,
                    });
                    sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// How a request is driven against the transport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Execution {
    /// Exactly one attempt; the transport result is returned as is.
    #[default]
    Single,
    /// Retry transport failures according to the policy.
    ///
    /// Any transport error is retried. A response is returned as soon as one
    /// arrives, whatever its status code.
    Retry(RetryPolicy),
}

impl Execution {
    /// Runs `request` against `transport` and returns the final outcome.
    ///
    /// Under [`Execution::Retry`] the result is either the first response or
    /// the error of the last attempt; earlier errors only reach `observer`.
    pub async fn execute<T: Transport>(
        &self,
        transport: &T,
        request: &Request,
        observer: &dyn RetryObserver,
    ) -> std::result::Result<T::Response, T::Error> {
        match self {
            Self::Single => transport.execute(request).await,
            Self::Retry(policy) => policy.run(transport, request, observer).await,
        }
    }
}
