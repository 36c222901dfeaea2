//! The single-request runner.
//!
//! [`RequestRunner`] wires a [`FixedResolver`] into a [`Dialer`], the dialer
//! into an [`HttpClient`], and executes one GET under a deadline while the
//! trace hook observes the connection lifecycle.

use crate::base::neterror::NetError;
use crate::client::HttpClient;
use crate::config::{ResolverProtocol, RunnerConfig};
use crate::dns::{FixedResolver, Resolve};
use crate::socket::Dialer;
use crate::trace::{ClientTrace, LogTrace};
use bytes::Bytes;
use http::header::CONTENT_LENGTH;
use http::StatusCode;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Executes exactly one outbound GET with custom DNS and lifecycle tracing.
///
/// # Example
///
/// ```rust,ignore
/// use dialtrace::{RequestRunner, RunnerConfig};
///
/// let runner = RequestRunner::new(RunnerConfig::default());
/// let body = runner.run().await?;
/// ```
#[derive(Clone)]
pub struct RequestRunner {
    config: RunnerConfig,
    trace: Arc<dyn ClientTrace>,
}

impl RequestRunner {
    /// Runner that logs trace events at debug level.
    pub fn new(config: RunnerConfig) -> Self {
        Self::with_trace(config, Arc::new(LogTrace))
    }

    /// Runner reporting trace events to `trace`.
    pub fn with_trace(config: RunnerConfig, trace: Arc<dyn ClientTrace>) -> Self {
        Self { config, trace }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Resolver that sends every name query to `resolver_addr` over
    /// `protocol`, each query bounded by `resolver_timeout`.
    pub fn configure_resolver(
        resolver_addr: SocketAddr,
        protocol: ResolverProtocol,
        resolver_timeout: Duration,
    ) -> FixedResolver {
        FixedResolver::new(resolver_addr, protocol, resolver_timeout)
    }

    /// Dialer bounded by `dial_timeout` whose name resolution is delegated
    /// entirely to `resolver`.
    pub fn configure_dialer<R>(dial_timeout: Duration, resolver: R) -> Dialer
    where
        R: Resolve + 'static,
    {
        Dialer::new(dial_timeout, Arc::new(resolver))
    }

    /// Client whose connect step is `dialer`. TLS verification and the
    /// rest of the transport keep their defaults.
    pub fn build_client(dialer: Dialer) -> HttpClient {
        HttpClient::new(dialer)
    }

    /// Issue a GET for `url` under a deadline of `overall_timeout`.
    ///
    /// Fails with `UnexpectedStatus` before reading the body when the
    /// status is not 200. The response body is released on every path.
    pub async fn execute(
        &self,
        client: &HttpClient,
        url: &str,
        overall_timeout: Duration,
    ) -> Result<(StatusCode, Bytes), NetError> {
        let url = Url::parse(url).map_err(|e| NetError::InvalidUrl(format!("{url}: {e}")))?;
        let trace: &dyn ClientTrace = &*self.trace;

        let exchange = async {
            let resp = client.get(&url, trace).await?;
            let status = resp.status();
            tracing::debug!(
                status = %status,
                version = ?resp.version(),
                content_length = ?resp.headers().get(CONTENT_LENGTH),
                "got response"
            );
            if status != StatusCode::OK {
                return Err(NetError::UnexpectedStatus(status));
            }
            let body = resp.bytes().await?;
            Ok::<_, NetError>((status, body))
        };

        match tokio::time::timeout(overall_timeout, exchange).await {
            Ok(result) => result,
            Err(_) => {
                tracing::debug!(
                    url = %url,
                    timeout = ?overall_timeout,
                    "request deadline exceeded"
                );
                Err(NetError::TimedOut(overall_timeout))
            }
        }
    }

    /// Build resolver, dialer and client from the config, run the request
    /// and log the body.
    pub async fn run(&self) -> Result<Bytes, NetError> {
        let config = &self.config;
        let resolver = Self::configure_resolver(
            config.resolver_addr,
            config.resolver_protocol,
            config.resolver_timeout,
        );
        let dialer = Self::configure_dialer(config.dial_timeout, resolver);
        let client = Self::build_client(dialer);

        let (_, body) = self
            .execute(&client, &config.url, config.request_timeout)
            .await?;

        tracing::debug!(data = %String::from_utf8_lossy(&body), "get response body");
        Ok(body)
    }
}

impl std::fmt::Debug for RequestRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestRunner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
