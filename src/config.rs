//! Runner configuration.
//!
//! The defaults are compiled in; [`RunnerConfig`] carries them into the
//! runner so nothing is read from process-wide state.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Address of the DNS resolver every lookup is sent to.
pub const DEFAULT_RESOLVER_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(Ipv4Addr::LOCALHOST), 5300);

/// Transport used to reach the resolver.
pub const DEFAULT_RESOLVER_PROTOCOL: ResolverProtocol = ResolverProtocol::Udp;

/// Per-query resolver timeout (ms).
pub const DEFAULT_RESOLVER_TIMEOUT_MS: u64 = 2000;

/// Dial timeout (ms), covering resolution and TCP connect.
pub const DEFAULT_DIAL_TIMEOUT_MS: u64 = 5000;

/// Overall request deadline (s).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Target of the single GET request.
pub const DEFAULT_TARGET_URL: &str = "https://example.org/";

/// Transport protocol used to talk to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolverProtocol {
    /// Datagram transport.
    #[default]
    Udp,
    /// Stream transport.
    Tcp,
}

impl ResolverProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolverProtocol::Udp => "udp",
            ResolverProtocol::Tcp => "tcp",
        }
    }
}

impl std::fmt::Display for ResolverProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable settings for one [`RequestRunner`](crate::runner::RequestRunner).
///
/// # Example
///
/// ```rust,ignore
/// use dialtrace::config::RunnerConfig;
/// use std::time::Duration;
///
/// let config = RunnerConfig::default()
///     .with_resolver_addr("127.0.0.1:5353".parse()?)
///     .with_request_timeout(Duration::from_secs(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub resolver_addr: SocketAddr,
    pub resolver_protocol: ResolverProtocol,
    pub resolver_timeout: Duration,
    pub dial_timeout: Duration,
    pub request_timeout: Duration,
    pub url: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            resolver_addr: DEFAULT_RESOLVER_ADDR,
            resolver_protocol: DEFAULT_RESOLVER_PROTOCOL,
            resolver_timeout: Duration::from_millis(DEFAULT_RESOLVER_TIMEOUT_MS),
            dial_timeout: Duration::from_millis(DEFAULT_DIAL_TIMEOUT_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            url: DEFAULT_TARGET_URL.to_string(),
        }
    }
}

impl RunnerConfig {
    /// Set the resolver address.
    pub fn with_resolver_addr(mut self, addr: SocketAddr) -> Self {
        self.resolver_addr = addr;
        self
    }

    /// Set the resolver transport.
    pub fn with_resolver_protocol(mut self, protocol: ResolverProtocol) -> Self {
        self.resolver_protocol = protocol;
        self
    }

    /// Set the per-query resolver timeout.
    pub fn with_resolver_timeout(mut self, timeout: Duration) -> Self {
        self.resolver_timeout = timeout;
        self
    }

    /// Set the dial timeout.
    pub fn with_dial_timeout(mut self, timeout: Duration) -> Self {
        self.dial_timeout = timeout;
        self
    }

    /// Set the overall request deadline.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the target URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}
