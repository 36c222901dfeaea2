//! Socket and connection establishment.
//!
//! - [`dialer`]: DNS → TCP connection flow, bounded by a dial timeout
//! - [`tls`]: TLS upgrade with BoringSSL
//! - [`stream`]: the connected socket handed to the HTTP layer

pub mod dialer;
pub mod stream;
pub mod tls;

#[cfg(test)]
mod testcert;

pub use dialer::Dialer;
pub use stream::SocketType;
