use std::{error::Error as StdError, fmt};

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The server could not be reached on the final attempt.
    #[error("transport error: {0}")]
    Transport(TransportError),
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// Retry configuration failed validation. No request was sent.
    #[error("invalid retry config: {0}")]
    InvalidConfig(String),
    /// The cancellation token fired before or between attempts.
    #[error("fetch cancelled")]
    Cancelled,
    /// Response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
    /// Request body could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),
    /// A required credential was absent or blank.
    #[error("missing credential: {0}")]
    MissingCredential(String),
    /// Caller-supplied input was rejected before sending.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<TransportError> for FetchError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

/// Broad category of a connection-level failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransportErrorKind {
    /// Connection refused, DNS failure, TLS handshake failure.
    Connect,
    Timeout,
    /// The request could not be built or sent.
    Request,
    /// The response body could not be read.
    Body,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::Request => "request",
            Self::Body => "body",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// Failure raised by a [`Transport`](crate::Transport) when no HTTP response was obtained.
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the underlying error.
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == TransportErrorKind::Timeout
    }

    pub fn is_connect(&self) -> bool {
        self.kind == TransportErrorKind::Connect
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_body() || err.is_decode() {
            TransportErrorKind::Body
        } else if err.is_request() || err.is_builder() {
            TransportErrorKind::Request
        } else {
            TransportErrorKind::Other
        };
        Self::new(kind, err.to_string()).with_source(err)
    }
}
