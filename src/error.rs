/// Boxed error produced by a [`Transport`](crate::Transport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    /// A caller-supplied value was rejected before any request was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The last error reported by the transport, passed through unchanged.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
}

impl HttpClientError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(err))
    }

    /// Returns the concrete transport error, if this is a transport failure of type `E`.
    ///
    /// ```
    /// # use http_retry_client::HttpClientError;
    /// let err = HttpClientError::InvalidArgument("url cannot be empty".to_owned());
    /// assert!(err.transport_error::<std::io::Error>().is_none());
    /// ```
    pub fn transport_error<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Self::Transport(inner) => inner.downcast_ref::<E>(),
            Self::InvalidArgument(_) => None,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
