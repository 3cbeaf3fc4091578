//! `fetch-retry` sends HTTP requests and retries transient failures with
//! capped exponential backoff.
//!
//! - [`fetch_with_retry`] returns the first non-5xx response, or the last
//!   5xx once retries run out, and fails only when the server was unreachable.
//! - [`fetch_outcome`] reports the same thing as a tagged [`FetchOutcome`].
//! - [`RetryingFetcher`] bundles a [`Transport`] with a default [`RetryConfig`].
//!
//! The [`services`] module holds ready-made Telegram and GitHub callers.

mod backoff;
mod credentials;
mod error;
mod fetcher;
mod options;
mod outcome;
mod request;
mod retry;
mod transport;
mod types;

pub mod services;

pub use backoff::Backoff;
pub use credentials::{CredentialProvider, EnvCredentials, StaticCredentials};
pub use error::{FetchError, TransportError, TransportErrorKind};
pub use fetcher::RetryingFetcher;
pub use options::RetryConfig;
pub use outcome::{FetchOutcome, LastFailure};
pub use request::RequestSpec;
pub use retry::{fetch_cancellable, fetch_outcome, fetch_with_retry};
pub use transport::{ReqwestTransport, Transport};
pub use types::{Response, StatusClass};

pub use reqwest::Method;
pub use tokio_util::sync::CancellationToken;

pub type Result<T> = std::result::Result<T, FetchError>;
