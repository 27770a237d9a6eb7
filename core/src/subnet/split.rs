//! Partitioning a network into equal-sized child networks.

use std::net::Ipv4Addr;

use tracing::debug;

use super::{MAX_PREFIX, Network};
use crate::error::IpError;
use crate::math::closest_larger_power_of_two;

/// How a split target is specified: an explicit child prefix length, or a
/// requested number of child networks (rounded up to a power of two).
///
/// The two forms are mutually exclusive inputs to one operation; resolving
/// them here keeps the validation in a single place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitSpec {
    /// Child subnet size as a prefix length.
    Bits(u8),
    /// Number of child networks wanted.
    Count(u32),
}

impl SplitSpec {
    /// Resolves the specification to a concrete child prefix length for
    /// `network`.
    pub fn resolve(self, network: &Network) -> Result<u8, IpError> {
        match self {
            SplitSpec::Bits(bits) => Ok(bits),
            SplitSpec::Count(count) => {
                let subnets = closest_larger_power_of_two(count);
                let extra = subnets.trailing_zeros();
                let target = u32::from(network.prefix_len()) + extra;
                if target > u32::from(MAX_PREFIX) {
                    return Err(IpError::InvalidSplit {
                        from: network.prefix_len(),
                        to: MAX_PREFIX,
                    });
                }
                Ok(target as u8)
            }
        }
    }
}

impl Network {
    /// Splits the network into the ordered sequence of `/target_prefix`
    /// children that exactly tile it.
    ///
    /// The first child starts at the parent's network address and children
    /// follow in ascending address order. Each child derives its own range
    /// from its address and prefix, so /31 and /32 children behave like any
    /// other network of that size. Fails with [`IpError::InvalidSplit`] if
    /// the target is less specific than the source prefix.
    pub fn split(&self, target_prefix: u8) -> Result<Vec<Network>, IpError> {
        if target_prefix < self.prefix || target_prefix > MAX_PREFIX {
            return Err(IpError::InvalidSplit {
                from: self.prefix,
                to: target_prefix,
            });
        }

        // u64 throughout: a /0 parent holds 2^32 addresses.
        let child_size = 1u64 << (MAX_PREFIX - target_prefix);
        let count = 1u64 << (target_prefix - self.prefix);
        let base = u64::from(u32::from(self.network_address()));

        debug!(parent = %self, target_prefix, count, "splitting network");

        let mut children = Vec::with_capacity(count as usize);
        for i in 0..count {
            children.push(Network {
                addr: Ipv4Addr::from((base + i * child_size) as u32),
                prefix: target_prefix,
            });
        }
        Ok(children)
    }
}
