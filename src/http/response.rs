//! HTTP Response with body access.

use crate::base::neterror::NetError;
use crate::http::ResponseBody;
use http::{HeaderMap, StatusCode, Version};
use hyper::body::Incoming;

/// HTTP Response with accessible body.
/// Dropping it before the body is read tears the connection down.
pub struct HttpResponse {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    body: ResponseBody,
}

impl HttpResponse {
    /// Create from hyper Response<Incoming>.
    pub fn from_hyper(resp: http::Response<Incoming>) -> Self {
        let (parts, body) = resp.into_parts();
        Self {
            status: parts.status,
            version: parts.version,
            headers: parts.headers,
            body: ResponseBody::new(body),
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the HTTP version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Consume the response, draining the body into memory.
    pub async fn bytes(self) -> Result<bytes::Bytes, NetError> {
        self.body.bytes().await
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("version", &self.version)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
