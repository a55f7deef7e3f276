use std::time::Duration;

use crate::{DormHttpError, RetryPolicy};

/// Configures HTTP timeout and retry behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Total attempts including the first.
    pub max_attempts: u32,
    /// Base retry backoff in milliseconds (linear strategy).
    pub retry_backoff_ms: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_attempts: 3,
            retry_backoff_ms: 1_000,
        }
    }
}

impl ClientOptions {
    /// Reads overrides from the environment, falling back to defaults.
    ///
    /// Reads (all optional):
    /// - `DORM_HTTP_TIMEOUT_MS`
    /// - `DORM_HTTP_MAX_ATTEMPTS`
    /// - `DORM_HTTP_RETRY_BACKOFF_MS`
    pub fn from_env() -> Result<Self, DormHttpError> {
        let defaults = Self::default();
        Ok(Self {
            timeout_ms: env_or("DORM_HTTP_TIMEOUT_MS", defaults.timeout_ms)?,
            max_attempts: env_or("DORM_HTTP_MAX_ATTEMPTS", defaults.max_attempts)?,
            retry_backoff_ms: env_or("DORM_HTTP_RETRY_BACKOFF_MS", defaults.retry_backoff_ms)?,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.retry_backoff_ms),
        )
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T, DormHttpError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(default),
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|err| DormHttpError::Config(format!("{name}={raw:?} is invalid: {err}"))),
        Err(_) => Ok(default),
    }
}
