use std::str::FromStr;

use serde::Deserialize;

use crate::{Execution, HttpClientError, Result, RetryPolicy};

/// Configures the default transport and the retry behavior.
///
/// Deserializes with every field optional, so it can sit inside a larger
/// application config file.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ClientOptions {
    /// Overall per-attempt timeout in milliseconds. `None` leaves it to the transport.
    pub timeout_ms: Option<u64>,
    /// Additional attempts after the first. `0` means a single attempt.
    pub retries: u32,
    /// Delay between attempts in milliseconds. Must not be negative.
    pub retry_delay_ms: i64,
}

impl ClientOptions {
    /// Reads options from environment variables.
    ///
    /// Reads:
    /// - `HTTP_CLIENT_TIMEOUT_MS`
    /// - `HTTP_CLIENT_RETRIES`
    /// - `HTTP_CLIENT_RETRY_DELAY_MS`
    ///
    /// Unset variables keep their defaults; unparsable ones are rejected.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            timeout_ms: match lookup("HTTP_CLIENT_TIMEOUT_MS") {
                Some(raw) => Some(parse_var("HTTP_CLIENT_TIMEOUT_MS", &raw)?),
                None => defaults.timeout_ms,
            },
            retries: match lookup("HTTP_CLIENT_RETRIES") {
                Some(raw) => parse_var("HTTP_CLIENT_RETRIES", &raw)?,
                None => defaults.retries,
            },
            retry_delay_ms: match lookup("HTTP_CLIENT_RETRY_DELAY_MS") {
                Some(raw) => parse_var("HTTP_CLIENT_RETRY_DELAY_MS", &raw)?,
                None => defaults.retry_delay_ms,
            },
        })
    }

    /// Strategy selected by these options: [`Execution::Single`] for zero
    /// retries, [`Execution::Retry`] otherwise.
    ///
    /// A negative delay is rejected even when `retries` is zero.
    pub fn execution(&self) -> Result<Execution> {
        let policy = RetryPolicy::from_millis(self.retries, self.retry_delay_ms)?;
        if policy.retries() == 0 {
            Ok(Execution::Single)
        } else {
            Ok(Execution::Retry(policy))
        }
    }
}

fn parse_var<V: FromStr>(key: &str, raw: &str) -> Result<V>
where
    V::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|err| HttpClientError::invalid(format!("{key}={raw:?}: {err}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::ClientOptions;
    use crate::{Execution, RetryPolicy};

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_are_single_attempt_without_timeout() {
        let opts = ClientOptions::default();
        assert_eq!(opts.timeout_ms, None);
        assert_eq!(opts.execution().expect("valid"), Execution::Single);
    }

    #[test]
    fn lookup_reads_all_variables() {
        let opts = ClientOptions::from_lookup(lookup(&[
            ("HTTP_CLIENT_TIMEOUT_MS", "2500"),
            ("HTTP_CLIENT_RETRIES", " 3 "),
            ("HTTP_CLIENT_RETRY_DELAY_MS", "10"),
        ]))
        .expect("valid env");

        assert_eq!(
            opts,
            ClientOptions {
                timeout_ms: Some(2_500),
                retries: 3,
                retry_delay_ms: 10,
            }
        );
        assert_eq!(
            opts.execution().expect("valid"),
            Execution::Retry(RetryPolicy::fixed(3, Duration::from_millis(10)))
        );
    }

    #[test]
    fn lookup_missing_variables_keep_defaults() {
        let opts = ClientOptions::from_lookup(lookup(&[])).expect("empty env is valid");
        assert_eq!(opts, ClientOptions::default());
    }

    #[test]
    fn lookup_rejects_unparsable_value() {
        let err = ClientOptions::from_lookup(lookup(&[("HTTP_CLIENT_RETRIES", "many")]))
            .expect_err("must reject non-numeric retries");
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("HTTP_CLIENT_RETRIES"));
    }

    #[test]
    fn negative_delay_is_rejected_even_without_retries() {
        let opts = ClientOptions {
            retry_delay_ms: -5,
            ..ClientOptions::default()
        };
        assert!(opts.execution().expect_err("negative delay").is_invalid_argument());
    }

    #[test]
    fn deserializes_partial_json() {
        let opts: ClientOptions =
            serde_json::from_str(r#"{ "retries": 2, "retry_delay_ms": 50 }"#).expect("valid json");
        assert_eq!(opts.timeout_ms, None);
        assert_eq!(opts.retries, 2);
        assert_eq!(opts.retry_delay_ms, 50);
    }
}
