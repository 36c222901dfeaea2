//! Response body draining.

use crate::base::neterror::NetError;
use bytes::Bytes;
use hyper::body::Incoming;

/// Response body wrapper.
pub struct ResponseBody {
    inner: Incoming,
}

impl ResponseBody {
    pub fn new(inner: Incoming) -> Self {
        Self { inner }
    }

    /// Read entire body as bytes.
    pub async fn bytes(self) -> Result<Bytes, NetError> {
        use http_body_util::BodyExt;
        let collected = self
            .inner
            .collect()
            .await
            .map_err(|e| NetError::BodyRead(e.to_string()))?;
        Ok(collected.to_bytes())
    }
}
