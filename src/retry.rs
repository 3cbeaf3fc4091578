//! Sequential retry with capped exponential backoff.
//!
//! Any response outside 500..=599 ends the call immediately. Server errors
//! and transport failures are retried up to `max_retries` times, waiting
//! between attempts on the tokio timer.

use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::{
    backoff::Backoff, FetchError, FetchOutcome, LastFailure, RequestSpec, Response, Result,
    RetryConfig, Transport,
};

/// Sends `request`, retrying transient failures.
///
/// Returns the first non-5xx response, or the last 5xx response once retries
/// run out. Fails with [`FetchError::Transport`] only when the final attempt
/// could not reach the server.
pub async fn fetch_with_retry<T>(
    transport: &T,
    request: &RequestSpec,
    config: &RetryConfig,
) -> Result<Response>
where
    T: Transport + ?Sized,
{
    fetch_outcome(transport, request, config).await?.into_result()
}

/// Like [`fetch_with_retry`], but reports exhaustion as a tagged outcome.
///
/// `Err` is reserved for an invalid `config`.
pub async fn fetch_outcome<T>(
    transport: &T,
    request: &RequestSpec,
    config: &RetryConfig,
) -> Result<FetchOutcome>
where
    T: Transport + ?Sized,
{
    run(transport, request, config, None).await
}

/// Like [`fetch_outcome`], but stops with [`FetchError::Cancelled`] when
/// `cancel` fires before an attempt or during a backoff wait.
///
/// An attempt already in flight runs to completion.
pub async fn fetch_cancellable<T>(
    transport: &T,
    request: &RequestSpec,
    config: &RetryConfig,
    cancel: &CancellationToken,
) -> Result<FetchOutcome>
where
    T: Transport + ?Sized,
{
    run(transport, request, config, Some(cancel)).await
}

async fn run<T>(
    transport: &T,
    request: &RequestSpec,
    config: &RetryConfig,
    cancel: Option<&CancellationToken>,
) -> Result<FetchOutcome>
where
    T: Transport + ?Sized,
{
    config.validate()?;

    let mut backoff = Backoff::new(config);
    let mut attempt: u32 = 0;
    loop {
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            return Err(FetchError::Cancelled);
        }

        let failure = match transport.send(request).await {
            Ok(response) if !response.class().is_retriable() => {
                #[cfg(feature = "tracing")]
                {
                    if attempt > 0 {
                        tracing::debug!(
                            "{} {} answered {} after {} retries",
                            request.method,
                            request.url,
                            response.status,
                            attempt
                        );
                    }
                }
                return Ok(FetchOutcome::Completed {
                    response,
                    attempts: attempt + 1,
                });
            }
            Ok(response) => LastFailure::Response(response),
            Err(err) => LastFailure::Transport(err),
        };

        if attempt >= config.max_retries {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "{} {} failed after {} attempts: {}",
                request.method,
                request.url,
                attempt + 1,
                describe(&failure)
            );
            return Ok(FetchOutcome::RetriesExhausted {
                attempts: attempt + 1,
                last: failure,
            });
        }

        let delay = backoff.next_delay();

        #[cfg(feature = "tracing")]
        tracing::warn!(
            "{} {} attempt {}/{} failed ({}), retrying in {} ms",
            request.method,
            request.url,
            attempt + 1,
            config.max_retries + 1,
            describe(&failure),
            delay.as_millis()
        );

        wait(delay, cancel).await?;
        attempt += 1;
    }
}

async fn wait(delay: Duration, cancel: Option<&CancellationToken>) -> Result<()> {
    match cancel {
        Some(token) => tokio::select! {
            _ = token.cancelled() => Err(FetchError::Cancelled),
            _ = sleep(delay) => Ok(()),
        },
        None => {
            sleep(delay).await;
            Ok(())
        }
    }
}

#[cfg(feature = "tracing")]
fn describe(failure: &LastFailure) -> String {
    match failure {
        LastFailure::Response(response) => format!("status {}", response.status),
        LastFailure::Transport(err) => err.to_string(),
    }
}
