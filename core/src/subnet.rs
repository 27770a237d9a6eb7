//! The IPv4 network model: free-form parsing into an `(address, prefix)`
//! pair and the subnet fields derived from it.

pub mod split;

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use tracing::trace;

use crate::addr;
use crate::error::IpError;

/// Longest possible IPv4 prefix.
pub const MAX_PREFIX: u8 = 32;

/// Prefix length assumed when the input carries no mask at all.
const DEFAULT_PREFIX: u8 = 24;

/// An IPv4 network: a host address plus a prefix length.
///
/// The host portion of the address is kept verbatim, so `10.0.0.1/24`
/// remembers `.1` while [`Network::network_address`] reports `10.0.0.0`.
/// Values are immutable once constructed; every derived field is computed
/// on demand from the stored pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Network {
    addr: Ipv4Addr,
    prefix: u8,
}

/// Subnet mask for a prefix length. The shift runs in u64 so the /0 case
/// yields an all-zero mask instead of overflowing.
fn prefix_to_mask(prefix: u8) -> u32 {
    let host_bits = u32::from(MAX_PREFIX - prefix);
    (((u32::MAX as u64) >> host_bits) << host_bits) as u32
}

/// Counts the leading one-bits of a dotted-decimal netmask.
///
/// Fails with [`IpError::InvalidNetmask`] unless the mask is a contiguous
/// left-aligned run of ones (`255.255.254.0` is fine, `255.0.255.0` is not).
pub fn netmask_prefix_len(mask: Ipv4Addr) -> Result<u8, IpError> {
    let bits = u32::from(mask);
    let ones = bits.leading_ones();
    if ones + bits.trailing_zeros() != 32 {
        return Err(IpError::InvalidNetmask(mask.to_string()));
    }
    Ok(ones as u8)
}

impl Network {
    /// Builds a network from an already-validated address and prefix.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Self, IpError> {
        if prefix > MAX_PREFIX {
            return Err(IpError::InvalidAddress(format!("{addr}/{prefix}")));
        }
        Ok(Self { addr, prefix })
    }

    /// Parses a free-form address specification.
    ///
    /// The input is split on whitespace and `/` into at most two tokens:
    ///
    /// * `10.0.0.1` - prefix defaults to /24
    /// * `10.0.0.1/24` or `10.0.0.1 24`
    /// * `10.0.0.1 255.255.255.0` - dotted netmask, contiguity checked
    /// * `0xc0a800fe/24`, `c0a800fe fffffe00` - either token may be given
    ///   as 8 hex digits with an optional `0x` prefix
    pub fn parse(input: &str) -> Result<Self, IpError> {
        let mut tokens: Vec<String> = input
            .split(|c: char| c.is_whitespace() || c == '/')
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        match tokens.len() {
            1 => tokens.push(DEFAULT_PREFIX.to_string()),
            2 => {}
            _ => return Err(IpError::InvalidAddress(input.to_string())),
        }

        // Hex tokens are rewritten to dotted decimal before anything else,
        // so a hex netmask goes through the same contiguity check below.
        // An explicit 0x prefix always marks a token as hex, which lets a
        // wrong-length hex token fail as such instead of as an address.
        for token in tokens.iter_mut() {
            if token.starts_with("0x") || token.starts_with("0X") || addr::is_hex_address(token) {
                *token = addr::u32_to_dotted(addr::hex_to_u32(token)?);
            }
        }

        let address: Ipv4Addr = tokens[0]
            .parse()
            .map_err(|_| IpError::InvalidAddress(input.to_string()))?;

        let prefix = if tokens[1].contains('.') {
            let mask: Ipv4Addr = tokens[1]
                .parse()
                .map_err(|_| IpError::InvalidAddress(input.to_string()))?;
            netmask_prefix_len(mask)?
        } else {
            tokens[1]
                .parse::<u8>()
                .ok()
                .filter(|p| *p <= MAX_PREFIX)
                .ok_or_else(|| IpError::InvalidAddress(input.to_string()))?
        };

        trace!(%address, prefix, "parsed network specification");
        Ok(Self { addr: address, prefix })
    }

    /// The host address exactly as it was given.
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    /// Number of leading one-bits in the netmask.
    pub fn prefix_len(&self) -> u8 {
        self.prefix
    }

    /// The netmask as a 32-bit integer.
    pub fn netmask_u32(&self) -> u32 {
        prefix_to_mask(self.prefix)
    }

    /// The netmask in dotted-decimal notation.
    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.netmask_u32())
    }

    /// Bitwise complement of the netmask.
    pub fn wildcard(&self) -> Ipv4Addr {
        Ipv4Addr::from(!self.netmask_u32())
    }

    /// Address with all host bits cleared.
    pub fn network_address(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & self.netmask_u32())
    }

    /// Address with all host bits set.
    pub fn broadcast_address(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) | !self.netmask_u32())
    }

    /// First usable host address.
    ///
    /// A /32 has a single address and a /31 follows the point-to-point
    /// convention: both ends of the link are usable.
    pub fn first_host(&self) -> Ipv4Addr {
        match self.prefix {
            32 => self.addr,
            31 => self.network_address(),
            _ => Ipv4Addr::from(u32::from(self.network_address()) + 1),
        }
    }

    /// Last usable host address.
    pub fn last_host(&self) -> Ipv4Addr {
        match self.prefix {
            32 => self.addr,
            31 => self.broadcast_address(),
            _ => Ipv4Addr::from(u32::from(self.broadcast_address()) - 1),
        }
    }

    /// Number of usable host addresses in the network.
    pub fn usable_hosts(&self) -> u32 {
        match self.prefix {
            32 => 0,
            31 => 2,
            _ => !self.netmask_u32() - 1,
        }
    }

    /// Total number of addresses in the network, `2^(32 - prefix)`.
    ///
    /// The /0 result does not fit in 32 bits and is clamped to `u32::MAX`,
    /// matching the tool's historical output.
    pub fn network_size(&self) -> u32 {
        if self.prefix == 0 {
            return u32::MAX;
        }
        !self.netmask_u32() + 1
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

impl FromStr for Network {
    type Err = IpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::parse(s)
    }
}
