//! `dorm-http` is an async HTTP client for the dormitory-management backend.
//!
//! The core is [`RetryExecutor::execute`], which issues a request through a
//! pluggable [`Transport`] and retries with linear backoff:
//! - transport failures are retried, then returned as [`TransportError`];
//! - 5xx (and the sentinel status `0`) are retried, then returned as a
//!   normal [`Response`];
//! - every other status is returned on first sight.
//!
//! [`AuthClient::sign_in`] builds on it for the backend's sign-in endpoint.

mod client;
mod diagnostics;
mod error;
mod options;
mod retry;
mod transport;
mod types;
mod wire;

pub use client::{sign_in_url, AuthClient, SIGN_IN_PATH};
#[cfg(feature = "tracing")]
pub use diagnostics::TracingSink;
pub use diagnostics::{AttemptDecision, AttemptEvent, AttemptOutcome, DiagnosticSink, NoopSink};
pub use error::{DormHttpError, TransportError};
pub use options::ClientOptions;
pub use retry::{classify_status, RetryExecutor, RetryPolicy, StatusClass};
pub use transport::{ReqwestTransport, Request, Response, Sleeper, TokioSleeper, Transport};
pub use types::{Role, Session};
pub use reqwest::{header, Method};

pub type Result<T> = std::result::Result<T, DormHttpError>;
