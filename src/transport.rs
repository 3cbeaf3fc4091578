use std::{sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::{RequestSpec, Response, TransportError};

/// Sends a single HTTP request. Implementations must not retry.
///
/// Any obtained response, including 4xx and 5xx, is `Ok`. `Err` means no
/// response was received at all.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RequestSpec) -> Result<Response, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: &RequestSpec) -> Result<Response, TransportError> {
        (**self).send(request).await
    }
}

/// [`Transport`] backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    timeout_ms: u64,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestTransport {
    pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Reuses an existing client and its connection pool.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self {
            http,
            timeout_ms: Self::DEFAULT_TIMEOUT_MS,
        }
    }

    /// Timeout applied to requests that do not set their own.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestSpec) -> Result<Response, TransportError> {
        let timeout = request.timeout_ms.unwrap_or(self.timeout_ms);
        let mut builder = self
            .http
            .request(request.method.clone(), request.url.as_str())
            .timeout(Duration::from_millis(timeout));

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
