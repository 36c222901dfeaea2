//! Ergonomic error context helpers.
//!
//! Provides extension traits for adding context to `Result` types,
//! converting IO errors into context-rich `NetError` variants.

use crate::base::neterror::NetError;
use std::io;
use std::net::SocketAddr;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Add connection context to an IO error.
    ///
    /// # Example
    /// ```ignore
    /// use dialtrace::base::context::IoResultExt;
    ///
    /// let stream = TcpStream::connect(addr).await.connection_context(addr)?;
    /// // Error: "Connection to 93.184.216.34:443 failed: connection refused"
    /// ```
    fn connection_context(self, addr: SocketAddr) -> Result<T, NetError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn connection_context(self, addr: SocketAddr) -> Result<T, NetError> {
        self.map_err(|e| NetError::connection_failed_to(addr, e))
    }
}
