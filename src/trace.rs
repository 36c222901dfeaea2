//! Request lifecycle tracing.
//!
//! A [`ClientTrace`] receives a callback at each checkpoint of a request:
//! name resolution finished, a TCP connect attempt finished, and a usable
//! connection was handed to the HTTP layer. For a fresh connection the
//! callbacks fire in that order.

use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};

/// Result of resolving the request host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsDoneInfo {
    pub host: String,
    pub addrs: Vec<IpAddr>,
    pub error: Option<String>,
}

/// Result of one TCP connect attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectDoneInfo {
    pub network: &'static str,
    pub addr: SocketAddr,
    pub error: Option<String>,
}

/// Negotiated TLS parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsInfo {
    pub version: String,
    pub alpn: Option<String>,
}

/// The connection the request is about to be written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GotConnInfo {
    pub remote_addr: SocketAddr,
    pub local_addr: Option<SocketAddr>,
    pub reused: bool,
    pub was_idle: bool,
    pub tls: Option<TlsInfo>,
}

/// A lifecycle checkpoint, as stored by [`RecordingTrace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    DnsResolutionCompleted(DnsDoneInfo),
    ConnectionEstablished(ConnectDoneInfo),
    ConnectionObtained(GotConnInfo),
}

/// Lifecycle callbacks. Implementations must be thread-safe; the resolver
/// may run while other work for the same request is in flight.
pub trait ClientTrace: Send + Sync {
    fn on_dns_done(&self, info: &DnsDoneInfo);

    fn on_conn_done(&self, info: &ConnectDoneInfo);

    fn on_conn_got(&self, info: &GotConnInfo);
}

impl<T: ClientTrace + ?Sized> ClientTrace for Arc<T> {
    fn on_dns_done(&self, info: &DnsDoneInfo) {
        (**self).on_dns_done(info)
    }

    fn on_conn_done(&self, info: &ConnectDoneInfo) {
        (**self).on_conn_done(info)
    }

    fn on_conn_got(&self, info: &GotConnInfo) {
        (**self).on_conn_got(info)
    }
}

/// Writes one debug line per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl ClientTrace for LogTrace {
    fn on_dns_done(&self, info: &DnsDoneInfo) {
        tracing::debug!(
            host = %info.host,
            addrs = ?info.addrs,
            err = ?info.error,
            "[trace] DNS done"
        );
    }

    fn on_conn_done(&self, info: &ConnectDoneInfo) {
        tracing::debug!(
            network = info.network,
            addr = %info.addr,
            err = ?info.error,
            "[trace] Conn done"
        );
    }

    fn on_conn_got(&self, info: &GotConnInfo) {
        tracing::debug!(
            remote_addr = %info.remote_addr,
            local_addr = ?info.local_addr,
            reused = info.reused,
            was_idle = info.was_idle,
            tls = ?info.tls,
            "[trace] Got Conn"
        );
    }
}

/// Keeps every event in arrival order.
#[derive(Debug, Default)]
pub struct RecordingTrace {
    events: Mutex<Vec<TraceEvent>>,
}

impl RecordingTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events seen so far.
    pub fn events(&self) -> Vec<TraceEvent> {
        self.lock().clone()
    }

    fn push(&self, event: TraceEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<TraceEvent>> {
        // A poisoned log is still a valid log.
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ClientTrace for RecordingTrace {
    fn on_dns_done(&self, info: &DnsDoneInfo) {
        self.push(TraceEvent::DnsResolutionCompleted(info.clone()));
    }

    fn on_conn_done(&self, info: &ConnectDoneInfo) {
        self.push(TraceEvent::ConnectionEstablished(info.clone()));
    }

    fn on_conn_got(&self, info: &GotConnInfo) {
        self.push(TraceEvent::ConnectionObtained(info.clone()));
    }
}
