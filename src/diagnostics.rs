//! Per-attempt diagnostic events and the sinks that receive them.

use std::time::Duration;

use reqwest::Method;

/// What a single attempt observed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// An HTTP reply was received.
    Response { status: u16 },
    /// The exchange failed before a reply arrived.
    TransportError { message: String },
}

/// What the executor decided after an attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptDecision {
    /// The reply is final; no further attempts.
    Accept,
    /// Another attempt follows after `delay`.
    Retry { delay: Duration },
    /// Retryable failure on the last permitted attempt.
    Exhausted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptEvent {
    /// 1-based attempt ordinal.
    pub attempt: u32,
    pub max_attempts: u32,
    pub method: Method,
    pub url: String,
    pub outcome: AttemptOutcome,
    pub decision: AttemptDecision,
}

/// Receives one event per attempt. Purely observational.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, event: &AttemptEvent);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn record(&self, _event: &AttemptEvent) {}
}

/// Emits events through `tracing`.
#[cfg(feature = "tracing")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

#[cfg(feature = "tracing")]
impl DiagnosticSink for TracingSink {
    fn record(&self, event: &AttemptEvent) {
        let AttemptEvent {
            attempt,
            max_attempts,
            method,
            url,
            outcome,
            decision,
        } = event;

        match (outcome, decision) {
            (AttemptOutcome::Response { status }, AttemptDecision::Accept) => {
                tracing::debug!(%method, %url, attempt, max_attempts, status, "request completed");
            }
            (AttemptOutcome::Response { status }, AttemptDecision::Retry { delay }) => {
                tracing::warn!(
                    %method,
                    %url,
                    attempt,
                    max_attempts,
                    status,
                    delay_ms = saturating_millis(*delay),
                    "retryable status, retrying"
                );
            }
            (AttemptOutcome::Response { status }, AttemptDecision::Exhausted) => {
                tracing::warn!(%method, %url, attempt, max_attempts, status, "retries exhausted");
            }
            (AttemptOutcome::TransportError { message }, AttemptDecision::Retry { delay }) => {
                tracing::warn!(
                    %method,
                    %url,
                    attempt,
                    max_attempts,
                    error = %message,
                    delay_ms = saturating_millis(*delay),
                    "transport error, retrying"
                );
            }
            (AttemptOutcome::TransportError { message }, _) => {
                tracing::warn!(
                    %method,
                    %url,
                    attempt,
                    max_attempts,
                    error = %message,
                    "transport error, giving up"
                );
            }
        }
    }
}

#[cfg(feature = "tracing")]
fn saturating_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

/// Sink used when none is supplied.
pub(crate) fn default_sink() -> std::sync::Arc<dyn DiagnosticSink> {
    #[cfg(feature = "tracing")]
    {
        std::sync::Arc::new(TracingSink)
    }
    #[cfg(not(feature = "tracing"))]
    {
        std::sync::Arc::new(NoopSink)
    }
}

#[cfg(all(test, feature = "tracing"))]
mod tests {
    use std::time::Duration;

    use super::saturating_millis;

    #[test]
    fn delay_millis_saturate_instead_of_truncating() {
        assert_eq!(saturating_millis(Duration::from_millis(1_500)), 1_500);
        assert_eq!(saturating_millis(Duration::MAX), u64::MAX);
    }
}
