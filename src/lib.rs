//! `http-retry-client` is a small async HTTP GET client with a pluggable
//! execution strategy.
//!
//! Every request goes through an [`Execution`]:
//! - [`Execution::Single`] makes one attempt.
//! - [`Execution::Retry`] retries transport failures with a fixed delay.
//!
//! The transport is anything implementing [`Transport`]; by default a
//! `reqwest::Client` that does not keep idle connections.

mod client;
mod error;
mod execution;
mod observer;
mod options;
mod request;
mod transport;

pub use client::{ClientBuilder, HttpClient};
pub use error::{BoxError, HttpClientError};
pub use execution::{Backoff, Execution, RetryPolicy};
pub use observer::{LogObserver, RetryAttempt, RetryObserver};
pub use options::ClientOptions;
pub use request::Request;
pub use transport::{default_transport, Transport};

pub use reqwest::Url;

pub type Result<T> = std::result::Result<T, HttpClientError>;
