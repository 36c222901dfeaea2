use http::StatusCode;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Coarse error classes surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The request could not be built (bad URL, unsupported scheme).
    RequestConstruction,
    /// DNS, TCP, TLS, HTTP exchange or deadline failure.
    Network,
    /// The server answered with something other than 200.
    UnexpectedStatus,
    /// The response body could not be drained.
    BodyRead,
}

#[derive(Debug, Error, Clone)]
pub enum NetError {
    // Request construction
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Unknown URL scheme: {0}")]
    UnknownUrlScheme(String),

    // Connection errors
    #[error("Name not resolved: {domain}: {message}")]
    NameNotResolved { domain: String, message: String },
    #[error("Connection to {addr} failed: {source}")]
    ConnectionFailed {
        addr: SocketAddr,
        #[source]
        source: Arc<std::io::Error>,
    },
    #[error("Dial to {host}:{port} timed out after {timeout:?}")]
    ConnectionTimedOut {
        host: String,
        port: u16,
        timeout: Duration,
    },
    #[error("SSL protocol error with {host}: {message}")]
    SslProtocolError { host: String, message: String },
    #[error("HTTP exchange failed: {0}")]
    Http(String),
    #[error("Request deadline of {0:?} exceeded")]
    TimedOut(Duration),

    // Response errors
    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(StatusCode),
    #[error("Failed to read response body: {0}")]
    BodyRead(String),
}

impl NetError {
    /// Create a DNS failure for `domain`.
    pub fn dns_failed(domain: &str, err: impl std::fmt::Display) -> Self {
        NetError::NameNotResolved {
            domain: domain.to_string(),
            message: err.to_string(),
        }
    }

    /// Create a TCP connect failure for `addr`.
    pub fn connection_failed_to(addr: SocketAddr, err: std::io::Error) -> Self {
        NetError::ConnectionFailed {
            addr,
            source: Arc::new(err),
        }
    }

    /// Create a TLS handshake failure for `host`.
    pub fn ssl_failed(host: &str, err: impl std::fmt::Display) -> Self {
        NetError::SslProtocolError {
            host: host.to_string(),
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            NetError::InvalidUrl(_) | NetError::UnknownUrlScheme(_) => {
                ErrorCategory::RequestConstruction
            }
            NetError::NameNotResolved { .. }
            | NetError::ConnectionFailed { .. }
            | NetError::ConnectionTimedOut { .. }
            | NetError::SslProtocolError { .. }
            | NetError::Http(_)
            | NetError::TimedOut(_) => ErrorCategory::Network,
            NetError::UnexpectedStatus(_) => ErrorCategory::UnexpectedStatus,
            NetError::BodyRead(_) => ErrorCategory::BodyRead,
        }
    }

    /// True when the failure happened while resolving a name.
    pub fn is_dns(&self) -> bool {
        matches!(self, NetError::NameNotResolved { .. })
    }

    /// True for both the dial timeout and the overall request deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            NetError::TimedOut(_) | NetError::ConnectionTimedOut { .. }
        )
    }
}
