//! Base types and error handling.
//!
//! - [`NetError`]: every failure a request can end with
//! - [`ErrorCategory`]: coarse classification of a [`NetError`]

pub mod context;
pub mod neterror;

pub use neterror::{ErrorCategory, NetError};
