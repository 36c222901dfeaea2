//! DNS Resolution Module
//!
//! Name resolution for the dialer. The [`Resolve`] trait is the seam the
//! dialer delegates to; [`FixedResolver`] is the implementation that sends
//! every query to one configured nameserver.
//!
//! # Example
//!
//! ```rust,ignore
//! use dialtrace::dns::{FixedResolver, Name, Resolve};
//!
//! let addrs = resolver.resolve(Name::new("example.org")).await?;
//! for addr in addrs {
//!     println!("Resolved: {}", addr);
//! }
//! ```

mod hickory;
mod resolve;

pub use hickory::FixedResolver;
pub use resolve::{Addrs, Name, Resolve, Resolving};
