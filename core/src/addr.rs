//! Conversions between the textual representations of an IPv4 address:
//! dotted decimal, 8-digit hexadecimal, 32-bit integer and dotted binary.

use std::net::Ipv4Addr;

use crate::error::IpError;

/// Parses a dotted-decimal address into its 32-bit integer value.
///
/// Exactly four dot-separated octets in `[0, 255]` are accepted; anything
/// else is an [`IpError::InvalidAddress`].
pub fn dotted_to_u32(s: &str) -> Result<u32, IpError> {
    let addr: Ipv4Addr = s
        .parse()
        .map_err(|_| IpError::InvalidAddress(s.to_string()))?;
    Ok(u32::from(addr))
}

/// Renders a 32-bit integer as a dotted-decimal address. Total function.
pub fn u32_to_dotted(bits: u32) -> String {
    Ipv4Addr::from(bits).to_string()
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// True if `s` is exactly 8 hexadecimal digits after an optional `0x`/`0X`
/// prefix. Used to tell hex tokens apart from dotted-decimal and prefix
/// tokens during parsing.
pub fn is_hex_address(s: &str) -> bool {
    let digits = strip_hex_prefix(s);
    digits.len() == 8 && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parses an 8-digit hexadecimal address, with or without a `0x`/`0X`
/// prefix, into its 32-bit integer value.
pub fn hex_to_u32(s: &str) -> Result<u32, IpError> {
    let digits = strip_hex_prefix(s);
    if digits.len() != 8 {
        return Err(IpError::InvalidHexAddress(s.to_string()));
    }
    u32::from_str_radix(digits, 16).map_err(|_| IpError::InvalidHexAddress(s.to_string()))
}

/// Renders an address as four dot-separated 8-bit binary groups,
/// e.g. `11000000.10101000.00000000.00000001`.
pub fn binary_text(addr: Ipv4Addr) -> String {
    let o = addr.octets();
    format!("{:08b}.{:08b}.{:08b}.{:08b}", o[0], o[1], o[2], o[3])
}

/// Renders an address as 8 lowercase hexadecimal digits.
pub fn hex_text(addr: Ipv4Addr) -> String {
    format!("{:08x}", u32::from(addr))
}

/// Renders an address as a single base-10 integer string.
pub fn decimal_text(addr: Ipv4Addr) -> String {
    u32::from(addr).to_string()
}
