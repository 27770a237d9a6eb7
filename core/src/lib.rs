//! Pure IPv4 address and subnet arithmetic.
//!
//! Everything in this crate is a synchronous function of its inputs: no I/O,
//! no ambient configuration, no shared state. The CLI crate layers argument
//! parsing and rendering on top of it.

pub mod addr;
pub mod error;
pub mod math;
pub mod subnet;

pub use error::IpError;
pub use subnet::Network;
pub use subnet::split::SplitSpec;
