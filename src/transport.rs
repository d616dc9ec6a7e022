use std::future::Future;
use std::time::Duration;

use crate::Request;

/// Sends one attempt of a [`Request`] and yields the response or the failure.
///
/// Implementations are shared between concurrent calls, so they must be
/// `Send + Sync`. Any `Err` is treated as a transport-level failure; HTTP
/// error statuses belong in `Ok`.
pub trait Transport: Send + Sync {
    type Response: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    fn execute(
        &self,
        request: &Request,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send;
}

impl Transport for reqwest::Client {
    type Response = reqwest::Response;
    type Error = reqwest::Error;

    fn execute(
        &self,
        request: &Request,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send {
        self.request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone())
            .send()
    }
}

/// Builds the default transport: a `reqwest::Client` that keeps no idle
/// connections, so every attempt opens a fresh one.
pub fn default_transport(timeout: Option<Duration>) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder().pool_max_idle_per_host(0);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}
