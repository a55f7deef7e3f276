/// Failure to complete the network exchange at all.
///
/// A [`Transport`](crate::Transport) returns this only when no HTTP reply was
/// received. Replies with failure status codes are ordinary
/// [`Response`](crate::Response) values.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Connection could not be established (refused, reset, DNS failure).
    #[error("connection failed: {0}")]
    Connect(String),
    /// The attempt did not complete within its timeout.
    #[error("request timed out")]
    Timeout,
    /// Any other channel failure reported by a custom transport.
    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Reqwest(err) => err.is_timeout(),
            Self::Timeout => true,
            _ => false,
        }
    }

    pub fn is_connect(&self) -> bool {
        match self {
            Self::Reqwest(err) => err.is_connect(),
            Self::Connect(_) => true,
            _ => false,
        }
    }
}

/// Error type returned by the high-level clients in this crate.
#[derive(Debug, thiserror::Error)]
pub enum DormHttpError {
    /// Every attempt failed at the transport level; carries the last failure.
    #[error(transparent)]
    Transport(TransportError),
    /// Final response carried a non-success HTTP status.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// Response body did not match the expected JSON shape.
    #[error("decode error: {0}")]
    Decode(String),
    /// Caller-supplied input was rejected before any request was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl From<TransportError> for DormHttpError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}
