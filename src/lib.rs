//! # dialtrace
//!
//! Issue one HTTP(S) GET through a fixed DNS resolver and watch the
//! connection come up.
//!
//! All name resolution for the request goes to a single configured
//! nameserver instead of the system resolver. A [`ClientTrace`] hook
//! observes each lifecycle checkpoint: DNS done, TCP connect done,
//! connection obtained.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dialtrace::{RequestRunner, RunnerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let runner = RequestRunner::new(RunnerConfig::default());
//!     let body = runner.run().await.unwrap();
//!     println!("{} bytes", body.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error taxonomy
//! - [`config`] - Runner configuration and compiled-in defaults
//! - [`dns`] - Resolver trait and the fixed-nameserver resolver
//! - [`socket`] - Dialer, TLS upgrade, connected sockets
//! - [`http`] - Response types
//! - [`client`] - HTTP client on top of the dialer
//! - [`trace`] - Lifecycle trace hook
//! - [`runner`] - The single-request runner
//! - [`logging`] - Subscriber setup

pub mod base;
pub mod client;
pub mod config;
pub mod dns;
pub mod http;
pub mod logging;
pub mod runner;
pub mod socket;
pub mod trace;

pub use base::{ErrorCategory, NetError};
pub use client::HttpClient;
pub use config::{ResolverProtocol, RunnerConfig};
pub use runner::RequestRunner;
pub use trace::{ClientTrace, LogTrace, RecordingTrace, TraceEvent};
