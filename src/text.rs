//! String renderings of addresses: hex and binary digests, reverse-DNS
//! names and the fully expanded IPv6 form.

use crate::addr::force_ipv4;
use crate::error::{Error, Result};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

fn octets(ip: IpAddr) -> Vec<u8> {
    match force_ipv4(ip) {
        IpAddr::V4(a) => a.octets().to_vec(),
        IpAddr::V6(a) => a.octets().to_vec(),
    }
}

/// Lowercase hex digest without separators: 8 characters for IPv4 (and
/// IPv4-mapped IPv6), 32 for IPv6.
pub fn ip_to_hex_string(ip: IpAddr) -> String {
    hex::encode(octets(ip))
}

/// Parses a hex digest back into an address. Any `.` or `:` separators are
/// ignored; what remains must be exactly 8 or 32 hex digits.
pub fn hex_string_to_ip(s: &str) -> Result<IpAddr> {
    let cleaned: String = s.chars().filter(|c| *c != '.' && *c != ':').collect();
    let bytes = hex::decode(&cleaned).map_err(|e| Error::malformed(s, e.to_string()))?;
    match bytes.len() {
        4 => {
            let mut o = [0u8; 4];
            o.copy_from_slice(&bytes);
            Ok(IpAddr::V4(Ipv4Addr::from(o)))
        }
        16 => {
            let mut o = [0u8; 16];
            o.copy_from_slice(&bytes);
            Ok(IpAddr::V6(Ipv6Addr::from(o)))
        }
        n => Err(Error::malformed(
            s,
            format!("expected 8 or 32 hex digits, got {}", n * 2),
        )),
    }
}

/// Dot-separated groups of eight bits, one group per byte.
pub fn ip_to_binary_string(ip: IpAddr) -> String {
    octets(ip)
        .iter()
        .map(|b| format!("{:08b}", b))
        .collect::<Vec<_>>()
        .join(".")
}

/// The `in-addr.arpa` or `ip6.arpa` name of the address.
pub fn ip_to_arpa(ip: IpAddr) -> String {
    match force_ipv4(ip) {
        IpAddr::V4(a) => ipv4_to_arpa(a),
        IpAddr::V6(a) => ipv6_to_arpa(a),
    }
}

pub fn ipv4_to_arpa(ip: Ipv4Addr) -> String {
    let o = ip.octets();
    format!("{}.{}.{}.{}.in-addr.arpa", o[3], o[2], o[1], o[0])
}

/// Nibble-reversed name, each nibble followed by a dot, ending in
/// `ip6.arpa`.
pub fn ipv6_to_arpa(ip: Ipv6Addr) -> String {
    let mut s = String::with_capacity(72);
    for c in hex::encode(ip.octets()).chars().rev() {
        s.push(c);
        s.push('.');
    }
    s.push_str("ip6.arpa");
    s
}

/// Eight groups of four lowercase hex digits, no `::` compression.
pub fn expand_ipv6(ip: Ipv6Addr) -> String {
    ip.segments()
        .iter()
        .map(|g| format!("{:04x}", g))
        .collect::<Vec<_>>()
        .join(":")
}
