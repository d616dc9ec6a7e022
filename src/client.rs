use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;

use crate::{
    default_transport, ClientOptions, Execution, HttpClientError, LogObserver, Request, Result,
    RetryObserver, RetryPolicy, Transport,
};

/// HTTP GET client that runs every request through an [`Execution`] strategy.
pub struct HttpClient<T: Transport = reqwest::Client> {
    transport: Arc<T>,
    execution: Execution,
    observer: Arc<dyn RetryObserver>,
}

impl<T: Transport> Clone for HttpClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            execution: self.execution,
            observer: Arc::clone(&self.observer),
        }
    }
}

impl<T: Transport> fmt::Debug for HttpClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("transport", &std::any::type_name::<T>())
            .field("execution", &self.execution)
            .finish()
    }
}

impl HttpClient {
    /// Creates a single-attempt client over the default transport.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Starts a builder preloaded with the default transport
    /// (see [`default_transport`]).
    pub fn builder() -> ClientBuilder {
        let mut builder = ClientBuilder::new();
        match default_transport(None) {
            Ok(transport) => builder.transport = Some(Arc::new(transport)),
            Err(err) => builder.error = Some(HttpClientError::transport(err)),
        }
        builder
    }

    /// Creates a client over the default transport from [`ClientOptions`].
    pub fn from_options(opts: &ClientOptions) -> Result<Self> {
        let execution = opts.execution()?;
        let transport = default_transport(opts.timeout_ms.map(Duration::from_millis))
            .map_err(HttpClientError::transport)?;
        ClientBuilder::new()
            .with_transport(Arc::new(transport))
            .with_execution(execution)
            .build()
    }

    /// Creates a client from `HTTP_CLIENT_*` environment variables.
    ///
    /// See [`ClientOptions::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::from_options(&ClientOptions::from_env()?)
    }
}

impl<T: Transport> HttpClient<T> {
    /// Sends a GET request for `url`.
    ///
    /// The request carries `Cache-Control: no-cache` and
    /// `Accept-Charset: utf-8`. Responses with HTTP error statuses are
    /// returned as `Ok`; only transport failures become
    /// [`HttpClientError::Transport`]. Passing `None` fails with
    /// [`HttpClientError::InvalidArgument`] without touching the transport.
    pub async fn get(&self, url: impl Into<Option<Url>>) -> Result<T::Response> {
        let url = url
            .into()
            .ok_or_else(|| HttpClientError::invalid("url cannot be empty"))?;
        let request = Request::get(url);
        self.execution
            .execute(self.transport.as_ref(), &request, self.observer.as_ref())
            .await
            .map_err(HttpClientError::transport)
    }

    /// Strategy every request runs through.
    pub fn execution(&self) -> &Execution {
        &self.execution
    }

    /// Shared handle to the underlying transport.
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }
}

/// Builds an [`HttpClient`], applying options in call order.
///
/// The first failing option is kept and every later one is ignored;
/// [`ClientBuilder::build`] then returns that error.
pub struct ClientBuilder<T: Transport = reqwest::Client> {
    transport: Option<Arc<T>>,
    execution: Execution,
    observer: Arc<dyn RetryObserver>,
    error: Option<HttpClientError>,
}

impl<T: Transport> Default for ClientBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> ClientBuilder<T> {
    /// Empty builder with no transport; one must be set with
    /// [`ClientBuilder::with_transport`].
    pub fn new() -> Self {
        Self {
            transport: None,
            execution: Execution::Single,
            observer: Arc::new(LogObserver),
            error: None,
        }
    }

    /// Retries failed attempts `retries` times, `delay` apart.
    pub fn with_retry(self, retries: u32, delay: Duration) -> Self {
        self.with_execution(Execution::Retry(RetryPolicy::fixed(retries, delay)))
    }

    /// Like [`ClientBuilder::with_retry`], from a signed millisecond delay.
    /// A negative delay fails the build.
    pub fn with_retry_millis(self, retries: u32, delay_ms: i64) -> Self {
        self.apply(|builder| {
            let policy = RetryPolicy::from_millis(retries, delay_ms)?;
            builder.execution = Execution::Retry(policy);
            Ok(())
        })
    }

    /// Replaces the strategy with `execution`.
    pub fn with_execution(self, execution: Execution) -> Self {
        self.apply(|builder| {
            builder.execution = execution;
            Ok(())
        })
    }

    /// Replaces the transport. `None` fails the build.
    pub fn with_transport(self, transport: impl Into<Option<Arc<T>>>) -> Self {
        let transport = transport.into();
        self.apply(|builder| {
            let transport =
                transport.ok_or_else(|| HttpClientError::invalid("transport is required"))?;
            builder.transport = Some(transport);
            Ok(())
        })
    }

    /// Replaces the observer notified before each retry
    /// (default: [`LogObserver`]).
    pub fn with_observer(self, observer: impl RetryObserver + 'static) -> Self {
        let observer: Arc<dyn RetryObserver> = Arc::new(observer);
        self.apply(|builder| {
            builder.observer = observer;
            Ok(())
        })
    }

    /// Returns the first recorded option error, or fails when no transport was set.
    pub fn build(self) -> Result<HttpClient<T>> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let transport = self
            .transport
            .ok_or_else(|| HttpClientError::invalid("transport is required"))?;
        Ok(HttpClient {
            transport,
            execution: self.execution,
            observer: self.observer,
        })
    }

    fn apply(mut self, option: impl FnOnce(&mut Self) -> Result<()>) -> Self {
        if self.error.is_none() {
            if let Err(err) = option(&mut self) {
                self.error = Some(err);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::HttpClient;
    use crate::{ClientOptions, Execution, RetryPolicy};

    #[test]
    fn builder_with_retry_installs_retry_execution() {
        let client = HttpClient::builder()
            .with_retry(2, Duration::from_millis(10))
            .build()
            .expect("valid client");
        assert_eq!(
            client.execution(),
            &Execution::Retry(RetryPolicy::fixed(2, Duration::from_millis(10)))
        );
    }

    #[test]
    fn negative_delay_fails_build() {
        let err = HttpClient::builder()
            .with_retry_millis(2, -10)
            .build()
            .expect_err("negative delay must fail");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn first_failing_option_wins() {
        let err = HttpClient::builder()
            .with_retry_millis(1, -1)
            .with_transport(None)
            .build()
            .expect_err("must fail");
        assert!(err.to_string().contains("negative delay"));
    }

    #[test]
    fn later_options_do_not_clear_an_earlier_failure() {
        let err = HttpClient::builder()
            .with_retry_millis(1, -1)
            .with_retry(1, Duration::from_millis(1))
            .build()
            .expect_err("must fail");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn from_options_selects_strategy() {
        let client = HttpClient::from_options(&ClientOptions {
            timeout_ms: Some(500),
            retries: 4,
            retry_delay_ms: 25,
        })
        .expect("valid options");
        assert_eq!(
            client.execution(),
            &Execution::Retry(RetryPolicy::fixed(4, Duration::from_millis(25)))
        );

        let single = HttpClient::from_options(&ClientOptions::default()).expect("valid options");
        assert_eq!(single.execution(), &Execution::Single);
    }

    #[test]
    fn debug_shows_execution() {
        let client = HttpClient::new().expect("default client");
        let debug = format!("{client:?}");
        assert!(debug.contains("Single"));
        assert!(debug.contains("reqwest"));
    }
}
