use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use crate::dns::{Name, Resolve};
use crate::trace::{ClientTrace, ConnectDoneInfo, DnsDoneInfo};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::Instant;

/// Lower bound for one connect attempt when several addresses share the
/// remaining dial budget.
const MIN_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(2);

/// Opens TCP connections: DNS -> TCP.
///
/// The timeout is one budget shared by name resolution and every connect
/// attempt. Resolution that runs out of budget is reported as a DNS
/// failure; each connect attempt gets a fair share of what is left.
#[derive(Clone)]
pub struct Dialer {
    timeout: Duration,
    resolver: Arc<dyn Resolve>,
}

impl Dialer {
    pub fn new(timeout: Duration, resolver: Arc<dyn Resolve>) -> Self {
        Self { timeout, resolver }
    }

    /// Connect to `host:port`. `host` is a bare name or IP literal (no
    /// brackets). IP literals skip resolution.
    pub async fn dial(
        &self,
        host: &str,
        port: u16,
        trace: &dyn ClientTrace,
    ) -> Result<TcpStream, NetError> {
        let deadline = Instant::now() + self.timeout;

        // 1. DNS Resolution
        let addrs = match host.parse::<IpAddr>() {
            Ok(ip) => vec![SocketAddr::new(ip, port)],
            Err(_) => self.resolve(host, port, deadline, trace).await?,
        };

        // 2. TCP Connect, first address that answers wins
        self.connect_any(host, port, addrs, deadline, trace).await
    }

    async fn resolve(
        &self,
        host: &str,
        port: u16,
        deadline: Instant,
        trace: &dyn ClientTrace,
    ) -> Result<Vec<SocketAddr>, NetError> {
        let lookup = tokio::time::timeout_at(deadline, self.resolver.resolve(Name::new(host)));
        let result = match lookup.await {
            Ok(Ok(addrs)) => {
                let addrs: Vec<SocketAddr> =
                    addrs.map(|a| SocketAddr::new(a.ip(), port)).collect();
                if addrs.is_empty() {
                    Err(NetError::dns_failed(host, "no addresses returned"))
                } else {
                    Ok(addrs)
                }
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                tracing::debug!(
                    host = %host,
                    timeout = ?self.timeout,
                    "lookup ran out of dial budget"
                );
                Err(NetError::dns_failed(
                    host,
                    format_args!("lookup timed out after {:?}", self.timeout),
                ))
            }
        };

        match &result {
            Ok(addrs) => trace.on_dns_done(&DnsDoneInfo {
                host: host.to_string(),
                addrs: addrs.iter().map(|a| a.ip()).collect(),
                error: None,
            }),
            Err(e) => trace.on_dns_done(&DnsDoneInfo {
                host: host.to_string(),
                addrs: Vec::new(),
                error: Some(e.to_string()),
            }),
        }
        result
    }

    async fn connect_any(
        &self,
        host: &str,
        port: u16,
        addrs: Vec<SocketAddr>,
        deadline: Instant,
        trace: &dyn ClientTrace,
    ) -> Result<TcpStream, NetError> {
        let total = addrs.len();
        let mut last_err = None;

        for (i, addr) in addrs.into_iter().enumerate() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            let budget = attempt_timeout(remaining, total - i);

            let result = match tokio::time::timeout(budget, TcpStream::connect(addr)).await {
                Ok(connected) => connected.connection_context(addr),
                Err(_) => Err(NetError::ConnectionTimedOut {
                    host: host.to_string(),
                    port,
                    timeout: budget,
                }),
            };

            match result {
                Ok(stream) => {
                    trace.on_conn_done(&ConnectDoneInfo {
                        network: "tcp",
                        addr,
                        error: None,
                    });
                    let _ = stream.set_nodelay(true);
                    return Ok(stream);
                }
                Err(e) => {
                    tracing::debug!(addr = %addr, error = %e, "connect attempt failed");
                    trace.on_conn_done(&ConnectDoneInfo {
                        network: "tcp",
                        addr,
                        error: Some(e.to_string()),
                    });
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| {
            tracing::debug!(host = %host, port, timeout = ?self.timeout, "dial timed out");
            NetError::ConnectionTimedOut {
                host: host.to_string(),
                port,
                timeout: self.timeout,
            }
        }))
    }
}

/// Share of `remaining` for the next attempt with `addrs_left` addresses
/// still to try, never below `MIN_ATTEMPT_TIMEOUT` unless less remains.
fn attempt_timeout(remaining: Duration, addrs_left: usize) -> Duration {
    let share = remaining / u32::try_from(addrs_left.max(1)).unwrap_or(u32::MAX);
    if share < MIN_ATTEMPT_TIMEOUT {
        remaining.min(MIN_ATTEMPT_TIMEOUT)
    } else {
        share
    }
}

impl std::fmt::Debug for Dialer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dialer")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
