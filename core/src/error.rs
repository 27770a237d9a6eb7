use thiserror::Error;

/// Errors produced by the IPv4 parsing and subnetting routines.
///
/// Every variant is a deterministic function of the input; nothing here is
/// transient or retryable. The first violation wins and no partial result
/// is computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IpError {
    /// The input is not a recognizable IPv4 address specification.
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),
    /// A dotted-decimal mask is not a contiguous run of leading one-bits.
    #[error("invalid netmask: {0}")]
    InvalidNetmask(String),
    /// A hexadecimal token does not hold exactly 8 hex digits.
    #[error("invalid hexadecimal address: {0}")]
    InvalidHexAddress(String),
    /// The requested child prefix is not usable for splitting the source.
    #[error("cannot split a /{from} network into /{to} networks")]
    InvalidSplit { from: u8, to: u8 },
}
