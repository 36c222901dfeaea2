//! HTTP client whose connect step is a [`Dialer`].
//!
//! Each request dials a fresh connection (DNS → TCP → TLS for `https`),
//! reports it to the trace hook, then speaks HTTP/1.1 over it.
//!
//! # Example
//!
//! ```rust,ignore
//! use dialtrace::client::HttpClient;
//! use dialtrace::trace::LogTrace;
//!
//! let client = HttpClient::new(dialer);
//! let url = url::Url::parse("https://example.org/")?;
//! let resp = client.get(&url, &LogTrace).await?;
//! ```

use crate::base::neterror::NetError;
use crate::http::HttpResponse;
use crate::socket::{tls, Dialer, SocketType};
use crate::trace::{ClientTrace, GotConnInfo};
use bytes::Bytes;
use http::header::{HeaderValue, HOST, USER_AGENT};
use http::Request;
use http_body_util::Empty;
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use url::{Host, Position, Url};

const DEFAULT_USER_AGENT: &str = concat!("dialtrace/", env!("CARGO_PKG_VERSION"));

/// Where a URL points to on the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Target {
    /// Bare host: domain or IP literal without brackets.
    pub host: String,
    pub port: u16,
    pub https: bool,
}

impl Target {
    pub(crate) fn from_url(url: &Url) -> Result<Self, NetError> {
        let https = match url.scheme() {
            "https" => true,
            "http" => false,
            other => return Err(NetError::UnknownUrlScheme(other.to_string())),
        };
        let host = match url.host() {
            Some(Host::Domain(d)) => d.to_string(),
            Some(Host::Ipv4(ip)) => ip.to_string(),
            Some(Host::Ipv6(ip)) => ip.to_string(),
            None => return Err(NetError::InvalidUrl(format!("{url}: missing host"))),
        };
        let port = url
            .port_or_known_default()
            .ok_or_else(|| NetError::InvalidUrl(format!("{url}: missing port")))?;
        Ok(Self { host, port, https })
    }
}

/// HTTP client for single requests over freshly dialed connections.
#[derive(Debug, Clone)]
pub struct HttpClient {
    dialer: Dialer,
    user_agent: HeaderValue,
}

impl HttpClient {
    pub fn new(dialer: Dialer) -> Self {
        Self {
            dialer,
            user_agent: HeaderValue::from_static(DEFAULT_USER_AGENT),
        }
    }

    /// Send a GET for `url` and return once the response head arrives.
    pub async fn get(
        &self,
        url: &Url,
        trace: &dyn ClientTrace,
    ) -> Result<HttpResponse, NetError> {
        let target = Target::from_url(url)?;
        let req = self.build_request(url)?;

        // 1. Dial (DNS + TCP)
        let tcp = self.dialer.dial(&target.host, target.port, trace).await?;

        // 2. TLS
        let socket = if target.https {
            SocketType::Ssl(tls::connect(&target.host, tcp).await?)
        } else {
            SocketType::Tcp(tcp)
        };

        let remote_addr = socket
            .peer_addr()
            .map_err(|e| NetError::Http(format!("connection lost before use: {e}")))?;
        trace.on_conn_got(&GotConnInfo {
            remote_addr,
            local_addr: socket.local_addr().ok(),
            reused: false,
            was_idle: false,
            tls: socket.tls_info(),
        });

        // 3. HTTP/1.1 handshake, then drive the connection in the background
        let (mut sender, conn) = http1::handshake::<_, Empty<Bytes>>(TokioIo::new(socket))
            .await
            .map_err(|e| NetError::Http(e.to_string()))?;
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::debug!(error = %e, "connection closed with error");
            }
        });

        sender
            .ready()
            .await
            .map_err(|e| NetError::Http(e.to_string()))?;
        let resp = sender
            .send_request(req)
            .await
            .map_err(|e| NetError::Http(e.to_string()))?;

        Ok(HttpResponse::from_hyper(resp))
    }

    fn build_request(&self, url: &Url) -> Result<Request<Empty<Bytes>>, NetError> {
        let host = url
            .host_str()
            .ok_or_else(|| NetError::InvalidUrl(format!("{url}: missing host")))?;
        // url drops default ports, so a port here is always explicit
        let host_header = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Request::get(&url[Position::BeforePath..Position::AfterQuery])
            .header(HOST, host_header)
            .header(USER_AGENT, self.user_agent.clone())
            .body(Empty::new())
            .map_err(|e| NetError::InvalidUrl(e.to_string()))
    }
}
