//! Bounded retry with linear backoff.

use std::{fmt, sync::Arc, time::Duration};

use crate::{
    diagnostics::{default_sink, AttemptDecision, AttemptEvent, AttemptOutcome, DiagnosticSink},
    transport::{ReqwestTransport, Request, Response, Sleeper, TokioSleeper, Transport},
    TransportError,
};

/// Attempt budget and delay growth for one invocation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first. Values below 1 are treated as 1.
    pub max_attempts: u32,
    /// Delay before the second attempt; later delays are multiples of it.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1_000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Policy that issues exactly one attempt.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn effective_max_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay after the failed attempt `attempt` (1-based): `base_delay * attempt`.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

/// Retry classification of an HTTP status.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StatusClass {
    Success,
    /// Server failure (5xx) or the sentinel `0`.
    Retryable,
    /// Any other status; returned without retrying.
    Terminal,
}

pub fn classify_status(status: u16) -> StatusClass {
    match status {
        200..=299 => StatusClass::Success,
        0 | 500..=u16::MAX => StatusClass::Retryable,
        _ => StatusClass::Terminal,
    }
}

/// Issues a request, retrying transport failures and retryable statuses.
///
/// Attempts run strictly one after another. Invocations share no mutable
/// state, so one executor can serve concurrent callers.
#[derive(Clone)]
pub struct RetryExecutor {
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
    sink: Arc<dyn DiagnosticSink>,
}

impl fmt::Debug for RetryExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryExecutor").finish_non_exhaustive()
    }
}

impl Default for RetryExecutor {
    fn default() -> Self {
        Self::new(ReqwestTransport::default())
    }
}

impl RetryExecutor {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            sleeper: Arc::new(TokioSleeper),
            sink: default_sink(),
        }
    }

    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Runs `request` under `policy` and returns its single outcome.
    ///
    /// - 2xx and non-retryable statuses return immediately.
    /// - 5xx and `0` are retried; the last such response is returned as `Ok`.
    /// - Transport errors are retried; the last one is returned as `Err`.
    pub async fn execute(
        &self,
        request: &Request,
        policy: &RetryPolicy,
    ) -> Result<Response, TransportError> {
        let max_attempts = policy.effective_max_attempts();
        let mut attempt = 1u32;

        loop {
            let last = attempt >= max_attempts;

            let delay = match self.transport.send(request).await {
                Ok(response) => {
                    let decision = match classify_status(response.status) {
                        StatusClass::Success | StatusClass::Terminal => AttemptDecision::Accept,
                        StatusClass::Retryable if last => AttemptDecision::Exhausted,
                        StatusClass::Retryable => AttemptDecision::Retry {
                            delay: policy.backoff_for(attempt),
                        },
                    };
                    self.record(
                        request,
                        attempt,
                        max_attempts,
                        AttemptOutcome::Response {
                            status: response.status,
                        },
                        decision,
                    );
                    match decision {
                        AttemptDecision::Retry { delay } => delay,
                        _ => return Ok(response),
                    }
                }
                Err(err) => {
                    let outcome = AttemptOutcome::TransportError {
                        message: err.to_string(),
                    };
                    if last {
                        self.record(
                            request,
                            attempt,
                            max_attempts,
                            outcome,
                            AttemptDecision::Exhausted,
                        );
                        return Err(err);
                    }
                    let delay = policy.backoff_for(attempt);
                    self.record(
                        request,
                        attempt,
                        max_attempts,
                        outcome,
                        AttemptDecision::Retry { delay },
                    );
                    delay
                }
            };

            self.sleeper.sleep(delay).await;
            attempt += 1;
        }
    }

    fn record(
        &self,
        request: &Request,
        attempt: u32,
        max_attempts: u32,
        outcome: AttemptOutcome,
        decision: AttemptDecision,
    ) {
        self.sink.record(&AttemptEvent {
            attempt,
            max_attempts,
            method: request.method.clone(),
            url: request.url.clone(),
            outcome,
            decision,
        });
    }
}
