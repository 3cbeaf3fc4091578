use tokio_util::sync::CancellationToken;

use crate::{
    retry, FetchOutcome, ReqwestTransport, RequestSpec, Response, Result, RetryConfig, Transport,
};

/// Bundles a [`Transport`] with a default [`RetryConfig`].
///
/// Holds no per-call state, so one fetcher can serve many concurrent calls.
#[derive(Clone, Debug)]
pub struct RetryingFetcher<T = ReqwestTransport> {
    transport: T,
    config: RetryConfig,
}

impl RetryingFetcher<ReqwestTransport> {
    /// Creates a fetcher over a fresh `reqwest` client with the default config.
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new())
    }
}

impl Default for RetryingFetcher<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> RetryingFetcher<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            config: RetryConfig::default(),
        }
    }

    /// Replaces the config used by [`fetch`](Self::fetch).
    pub fn with_config(mut self, config: RetryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `request` with the fetcher's config. See [`retry::fetch_with_retry`].
    pub async fn fetch(&self, request: &RequestSpec) -> Result<Response> {
        retry::fetch_with_retry(&self.transport, request, &self.config).await
    }

    /// Sends `request` with a one-off config.
    pub async fn fetch_with_config(
        &self,
        request: &RequestSpec,
        config: &RetryConfig,
    ) -> Result<Response> {
        retry::fetch_with_retry(&self.transport, request, config).await
    }

    pub async fn fetch_outcome(&self, request: &RequestSpec) -> Result<FetchOutcome> {
        retry::fetch_outcome(&self.transport, request, &self.config).await
    }

    pub async fn fetch_cancellable(
        &self,
        request: &RequestSpec,
        cancel: &CancellationToken,
    ) -> Result<FetchOutcome> {
        retry::fetch_cancellable(&self.transport, request, &self.config, cancel).await
    }
}
