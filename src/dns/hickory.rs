//! Resolver pinned to a single upstream nameserver.
//!
//! Every lookup goes to the configured address over the configured
//! transport. The system DNS configuration (`/etc/resolv.conf`, search
//! domains) is never consulted.

use super::{Addrs, Name, Resolve, Resolving};
use crate::base::neterror::NetError;
use crate::config::ResolverProtocol;
use hickory_resolver::{
    config::{LookupIpStrategy, NameServerConfig, ResolveHosts, ResolverConfig},
    name_server::TokioConnectionProvider,
    proto::xfer::Protocol,
    TokioResolver,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};

/// Async DNS resolver backed by hickory-dns, sending all queries to one
/// nameserver.
///
/// # Example
///
/// ```rust,ignore
/// use dialtrace::config::ResolverProtocol;
/// use dialtrace::dns::{FixedResolver, Name, Resolve};
/// use std::time::Duration;
///
/// let resolver = FixedResolver::new(
///     "127.0.0.1:5300".parse()?,
///     ResolverProtocol::Udp,
///     Duration::from_millis(2000),
/// );
/// let addrs = resolver.resolve(Name::new("example.org")).await?;
/// ```
#[derive(Clone)]
pub struct FixedResolver {
    resolver: Arc<TokioResolver>,
    nameserver: SocketAddr,
    protocol: ResolverProtocol,
    timeout: Duration,
}

impl FixedResolver {
    /// Creates a resolver that sends every query to `nameserver` over
    /// `protocol`. Each query is bounded by `timeout` and sent once.
    pub fn new(nameserver: SocketAddr, protocol: ResolverProtocol, timeout: Duration) -> Self {
        let mut config = ResolverConfig::new();
        config.add_name_server(NameServerConfig::new(nameserver, to_hickory(protocol)));

        let mut builder =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default());
        let opts = builder.options_mut();
        opts.timeout = timeout;
        opts.attempts = 1;
        // No search-domain expansion.
        opts.ndots = 0;
        opts.use_hosts_file = ResolveHosts::Never;
        opts.ip_strategy = LookupIpStrategy::Ipv4thenIpv6;

        tracing::debug!(
            nameserver = %nameserver,
            protocol = %protocol,
            timeout_ms = timeout.as_millis() as u64,
            "configured fixed DNS resolver"
        );

        Self {
            resolver: Arc::new(builder.build()),
            nameserver,
            protocol,
            timeout,
        }
    }

    /// Address every query is sent to.
    pub fn nameserver(&self) -> SocketAddr {
        self.nameserver
    }

    pub fn protocol(&self) -> ResolverProtocol {
        self.protocol
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn to_hickory(protocol: ResolverProtocol) -> Protocol {
    match protocol {
        ResolverProtocol::Udp => Protocol::Udp,
        ResolverProtocol::Tcp => Protocol::Tcp,
    }
}

impl std::fmt::Debug for FixedResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedResolver")
            .field("nameserver", &self.nameserver)
            .field("protocol", &self.protocol)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Resolve for FixedResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let resolver = self.resolver.clone();
        let nameserver = self.nameserver;
        Box::pin(async move {
            let domain = name.as_str();
            tracing::trace!(
                domain = %domain,
                nameserver = %nameserver,
                "resolving via fixed nameserver"
            );

            let lookup = resolver.lookup_ip(domain).await.map_err(|e| {
                tracing::debug!(domain = %domain, error = %e, "lookup failed");
                NetError::dns_failed(domain, e)
            })?;

            let addrs: Vec<SocketAddr> = lookup.iter().map(|ip| SocketAddr::new(ip, 0)).collect();

            if addrs.is_empty() {
                return Err(NetError::dns_failed(domain, "no addresses returned"));
            }

            Ok(Box::new(addrs.into_iter()) as Addrs)
        })
    }
}
