//! Stateless arithmetic over IPv4 and IPv6 addresses.
//!
//! Every increment or decrement saturates: stepping past the top of the
//! address space yields the all-ones address of the family and stepping
//! below the bottom yields the all-zeros address. Nothing wraps.

use log::trace;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use std::cmp::Ordering;
use std::fmt::{Display, Error as FmtError, Formatter};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Largest value of a `u32`, which is also the size of the IPv4 space.
pub const MAX_IPV4: u32 = u32::MAX;
/// Largest value of a `u64`, used when an IPv6 count does not fit.
pub const MAX_UINT: u64 = u64::MAX;

pub const IPV4_ZERO: Ipv4Addr = Ipv4Addr::UNSPECIFIED;
pub const IPV4_ALL_ONES: Ipv4Addr = Ipv4Addr::BROADCAST;
pub const IPV6_ZERO: Ipv6Addr = Ipv6Addr::UNSPECIFIED;
pub const IPV6_ALL_ONES: Ipv6Addr = Ipv6Addr::new(
    0xffff, 0xffff, 0xffff, 0xffff, 0xffff, 0xffff, 0xffff, 0xffff,
);

/// Address family of an IP address or netblock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Version {
    V4,
    V6,
}

impl Version {
    /// Width of the family in bits.
    pub fn bits(self) -> u8 {
        match self {
            Version::V4 => 32,
            Version::V6 => 128,
        }
    }

    /// Width of the family in bytes.
    pub fn len(self) -> usize {
        match self {
            Version::V4 => 4,
            Version::V6 => 16,
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter) -> Result<(), FmtError> {
        match self {
            Version::V4 => write!(f, "4"),
            Version::V6 => write!(f, "6"),
        }
    }
}

/// Adds one to the leading `width` bytes of `bytes`, carrying leftward.
/// Returns `None` if those bytes are already all ones.
pub(crate) fn carry_up<const N: usize>(mut bytes: [u8; N], width: usize) -> Option<[u8; N]> {
    for i in (0..width.min(N)).rev() {
        let (v, overflow) = bytes[i].overflowing_add(1);
        bytes[i] = v;
        if !overflow {
            return Some(bytes);
        }
    }
    None
}

/// Subtracts one from the leading `width` bytes of `bytes`, borrowing
/// leftward. Returns `None` if those bytes are already all zeros.
pub(crate) fn borrow_down<const N: usize>(mut bytes: [u8; N], width: usize) -> Option<[u8; N]> {
    for i in (0..width.min(N)).rev() {
        let (v, underflow) = bytes[i].overflowing_sub(1);
        bytes[i] = v;
        if !underflow {
            return Some(bytes);
        }
    }
    None
}

/// 16-byte form used for cross-family ordering: IPv4 is prefixed with
/// twelve zero bytes.
fn widen(ip: &IpAddr) -> [u8; 16] {
    match ip {
        IpAddr::V4(a) => {
            let mut out = [0u8; 16];
            out[12..].copy_from_slice(&a.octets());
            out
        }
        IpAddr::V6(a) => a.octets(),
    }
}

/// Orders two addresses byte for byte after widening both to 16 bytes.
///
/// Usable directly as a `sort_by` comparator.
pub fn compare_ips(a: &IpAddr, b: &IpAddr) -> Ordering {
    widen(a).cmp(&widen(b))
}

/// Sorts addresses in place in [`compare_ips`] order.
pub fn sort_ips(ips: &mut [IpAddr]) {
    ips.sort_by(compare_ips);
}

pub fn next_ipv4(ip: Ipv4Addr) -> Ipv4Addr {
    carry_up(ip.octets(), 4).map(Ipv4Addr::from).unwrap_or(ip)
}

pub fn previous_ipv4(ip: Ipv4Addr) -> Ipv4Addr {
    borrow_down(ip.octets(), 4).map(Ipv4Addr::from).unwrap_or(ip)
}

pub fn next_ipv6(ip: Ipv6Addr) -> Ipv6Addr {
    carry_up(ip.octets(), 16).map(Ipv6Addr::from).unwrap_or(ip)
}

pub fn previous_ipv6(ip: Ipv6Addr) -> Ipv6Addr {
    borrow_down(ip.octets(), 16).map(Ipv6Addr::from).unwrap_or(ip)
}

/// Returns the address one above `ip`, or `ip` itself at the all-ones
/// address.
pub fn next_ip(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V4(a) => IpAddr::V4(next_ipv4(a)),
        IpAddr::V6(a) => IpAddr::V6(next_ipv6(a)),
    }
}

/// Returns the address one below `ip`, or `ip` itself at the all-zeros
/// address.
pub fn previous_ip(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V4(a) => IpAddr::V4(previous_ipv4(a)),
        IpAddr::V6(a) => IpAddr::V6(previous_ipv6(a)),
    }
}

/// Adds `count` to `ip`, saturating at `255.255.255.255`.
pub fn increment_ipv4_by(ip: Ipv4Addr, count: u32) -> Ipv4Addr {
    match u32::from(ip).checked_add(count) {
        Some(v) => Ipv4Addr::from(v),
        None => {
            trace!("{} + {} saturated", ip, count);
            IPV4_ALL_ONES
        }
    }
}

/// Subtracts `count` from `ip`, saturating at `0.0.0.0`.
pub fn decrement_ipv4_by(ip: Ipv4Addr, count: u32) -> Ipv4Addr {
    match u32::from(ip).checked_sub(count) {
        Some(v) => Ipv4Addr::from(v),
        None => {
            trace!("{} - {} saturated", ip, count);
            IPV4_ZERO
        }
    }
}

/// Adds an arbitrary-precision `count` to `ip`, saturating at the all-ones
/// address.
pub fn increment_ipv6_by(ip: Ipv6Addr, count: &BigUint) -> Ipv6Addr {
    let z = ip_to_biguint(IpAddr::V6(ip)) + count;
    biguint_to_ipv6(&z)
}

/// Subtracts an arbitrary-precision `count` from `ip`, saturating at `::`.
pub fn decrement_ipv6_by(ip: Ipv6Addr, count: &BigUint) -> Ipv6Addr {
    let z = ip_to_biguint(IpAddr::V6(ip));
    if *count > z {
        trace!("{} - {} saturated", ip, count);
        return IPV6_ZERO;
    }
    biguint_to_ipv6(&(z - count))
}

/// Adds `count` to `ip` within its effective family. An IPv4-mapped
/// address stays mapped and saturates at `::ffff:255.255.255.255`.
pub fn increment_ip_by(ip: IpAddr, count: u32) -> IpAddr {
    match ip {
        IpAddr::V4(a) => IpAddr::V4(increment_ipv4_by(a, count)),
        IpAddr::V6(a) => match a.to_ipv4_mapped() {
            Some(v4) => IpAddr::V6(increment_ipv4_by(v4, count).to_ipv6_mapped()),
            None => IpAddr::V6(increment_ipv6_by(a, &BigUint::from(count))),
        },
    }
}

/// Subtracts `count` from `ip` within its effective family. An IPv4-mapped
/// address stays mapped and saturates at `::ffff:0.0.0.0`.
pub fn decrement_ip_by(ip: IpAddr, count: u32) -> IpAddr {
    match ip {
        IpAddr::V4(a) => IpAddr::V4(decrement_ipv4_by(a, count)),
        IpAddr::V6(a) => match a.to_ipv4_mapped() {
            Some(v4) => IpAddr::V6(decrement_ipv4_by(v4, count).to_ipv6_mapped()),
            None => IpAddr::V6(decrement_ipv6_by(a, &BigUint::from(count))),
        },
    }
}

pub fn delta_ipv4(a: Ipv4Addr, b: Ipv4Addr) -> u32 {
    let (a, b) = (u32::from(a), u32::from(b));
    if a > b {
        a - b
    } else {
        b - a
    }
}

pub fn delta_ipv6(a: Ipv6Addr, b: Ipv6Addr) -> BigUint {
    let a = ip_to_biguint(IpAddr::V6(a));
    let b = ip_to_biguint(IpAddr::V6(b));
    if a >= b {
        a - b
    } else {
        b - a
    }
}

/// Number of addresses between `a` and `b`, clamped to [`MAX_IPV4`].
///
/// Two effectively-IPv4 addresses (including IPv4-mapped IPv6) use 32-bit
/// arithmetic; anything else is measured on the widened 16-byte form.
pub fn delta_ip(a: IpAddr, b: IpAddr) -> u32 {
    if let (IpAddr::V4(x), IpAddr::V4(y)) = (force_ipv4(a), force_ipv4(b)) {
        return delta_ipv4(x, y);
    }
    let z = delta_ipv6(Ipv6Addr::from(widen(&a)), Ipv6Addr::from(widen(&b)));
    z.to_u32().unwrap_or(MAX_IPV4)
}

pub fn ipv4_to_u32(ip: Ipv4Addr) -> u32 {
    u32::from_be_bytes(ip.octets())
}

pub fn u32_to_ipv4(i: u32) -> Ipv4Addr {
    Ipv4Addr::from(i.to_be_bytes())
}

/// Big-endian integer value of the address bytes.
pub fn ip_to_biguint(ip: IpAddr) -> BigUint {
    match ip {
        IpAddr::V4(a) => BigUint::from_bytes_be(&a.octets()),
        IpAddr::V6(a) => BigUint::from_bytes_be(&a.octets()),
    }
}

/// Converts an integer to an IPv6 address. Values that need more than 128
/// bits saturate to the all-ones address.
pub fn biguint_to_ipv6(z: &BigUint) -> Ipv6Addr {
    let bytes = z.to_bytes_be();
    if bytes.len() > 16 {
        trace!("{} exceeds 128 bits, saturated", z);
        return IPV6_ALL_ONES;
    }
    let mut out = [0u8; 16];
    out[16 - bytes.len()..].copy_from_slice(&bytes);
    Ipv6Addr::from(out)
}

/// The network half (first 64 bits) of an IPv6 address. The interface
/// identifier is discarded.
pub fn ipv6_to_u64(ip: Ipv6Addr) -> u64 {
    let mut hi = [0u8; 8];
    hi.copy_from_slice(&ip.octets()[..8]);
    u64::from_be_bytes(hi)
}

/// Builds an IPv6 address whose network half is `i` and whose interface
/// identifier is zero.
pub fn u64_to_ipv6(i: u64) -> Ipv6Addr {
    let mut out = [0u8; 16];
    out[..8].copy_from_slice(&i.to_be_bytes());
    Ipv6Addr::from(out)
}

/// True for `::ffff:a.b.c.d` addresses.
pub fn is_ipv4_mapped(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(_) => false,
        IpAddr::V6(a) => {
            let o = a.octets();
            o[..10].iter().all(|b| *b == 0) && o[10] == 0xff && o[11] == 0xff
        }
    }
}

/// Family by storage width alone.
pub fn nominal_version(ip: IpAddr) -> Version {
    match ip {
        IpAddr::V4(_) => Version::V4,
        IpAddr::V6(_) => Version::V6,
    }
}

/// Family the address behaves as: IPv4-mapped IPv6 addresses report V4.
pub fn effective_version(ip: IpAddr) -> Version {
    if is_ipv4_mapped(ip) {
        return Version::V4;
    }
    nominal_version(ip)
}

/// Unwraps an IPv4-mapped IPv6 address to its embedded IPv4 address.
/// Any other address is returned unchanged.
pub fn force_ipv4(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(a) if is_ipv4_mapped(ip) => {
            let o = a.octets();
            IpAddr::V4(Ipv4Addr::new(o[12], o[13], o[14], o[15]))
        }
        _ => ip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn v4(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(a, b, c, d))
    }

    fn v6(s: &str) -> IpAddr {
        IpAddr::V6(s.parse().unwrap())
    }

    // (address, next, previous, integer value)
    const IPV4_TABLE: &[([u8; 4], [u8; 4], [u8; 4], u32)] = &[
        ([10, 1, 2, 3], [10, 1, 2, 4], [10, 1, 2, 2], 167838211),
        ([10, 1, 2, 255], [10, 1, 3, 0], [10, 1, 2, 254], 167838463),
        ([10, 1, 2, 0], [10, 1, 2, 1], [10, 1, 1, 255], 167838208),
        ([255, 255, 255, 255], [255, 255, 255, 255], [255, 255, 255, 254], 4294967295),
        ([0, 0, 0, 0], [0, 0, 0, 1], [0, 0, 0, 0], 0),
    ];

    #[test]
    fn ipv4_next_previous_and_integer() {
        for (ip, next, prev, int) in IPV4_TABLE {
            let ip = Ipv4Addr::from(*ip);
            assert_eq!(Ipv4Addr::from(*next), next_ipv4(ip));
            assert_eq!(Ipv4Addr::from(*prev), previous_ipv4(ip));
            assert_eq!(IpAddr::V4(Ipv4Addr::from(*next)), next_ip(IpAddr::V4(ip)));
            assert_eq!(*int, ipv4_to_u32(ip));
            assert_eq!(ip, u32_to_ipv4(*int));
        }
    }

    #[test]
    fn ipv6_next_previous_and_integer() {
        let table = [
            (
                "2001:db8:85a3::8a2e:370:7334",
                "2001:db8:85a3::8a2e:370:7335",
                "2001:db8:85a3::8a2e:370:7333",
                "42540766452641154071740215577757643572",
                2306139570357600256u64,
                "2001:db8:85a3::",
            ),
            ("::", "::1", "::", "0", 0, "::"),
            (
                "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff",
                "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff",
                "ffff:ffff:ffff:ffff:ffff:ffff:ffff:fffe",
                "340282366920938463463374607431768211455",
                18446744073709551615,
                "ffff:ffff:ffff:ffff::",
            ),
        ];
        for (ip, next, prev, big, hi, hostbits) in table.iter() {
            assert_eq!(v6(next), next_ip(v6(ip)));
            assert_eq!(v6(prev), previous_ip(v6(ip)));
            assert_eq!(*big, ip_to_biguint(v6(ip)).to_string());
            let z: BigUint = big.parse().unwrap();
            assert_eq!(v6(ip), IpAddr::V6(biguint_to_ipv6(&z)));
            let a: Ipv6Addr = ip.parse().unwrap();
            assert_eq!(*hi, ipv6_to_u64(a));
            assert_eq!(hostbits.parse::<Ipv6Addr>().unwrap(), u64_to_ipv6(*hi));
        }
    }

    #[test]
    fn biguint_wider_than_128_bits_saturates() {
        let z = BigUint::from(1u8) << 130;
        assert_eq!(IPV6_ALL_ONES, biguint_to_ipv6(&z));
    }

    #[test]
    fn ipv4_delta_increment_decrement() {
        // (address, decremented, incremented, count, delta to incr, delta to decr)
        let table = [
            (v4(192, 168, 2, 2), v4(192, 168, 1, 1), v4(192, 168, 3, 3), 257, 257, 257),
            (v4(10, 0, 0, 0), v4(9, 0, 0, 0), v4(11, 0, 0, 0), 16777216, 16777216, 16777216),
            (v4(255, 255, 255, 0), v4(255, 255, 252, 0), v4(255, 255, 255, 255), 768, 255, 768),
            (v4(0, 0, 0, 255), v4(0, 0, 0, 0), v4(0, 0, 3, 255), 768, 768, 255),
            (
                v6("2001:db8:85a3::8a2e:370:7334"),
                v6("2001:db8:85a3::8a2e:370:731c"),
                v6("2001:db8:85a3::8a2e:370:734c"),
                24,
                24,
                24,
            ),
        ];
        for (ip, decr, incr, count, incres, decres) in table.iter() {
            assert_eq!(*incres, delta_ip(*ip, *incr));
            assert_eq!(*decres, delta_ip(*ip, *decr));
            assert_eq!(*incr, increment_ip_by(*ip, *count));
            assert_eq!(*decr, decrement_ip_by(*ip, *count));
        }
    }

    #[test]
    fn mapped_addresses_step_within_ipv4() {
        // (address, count, incremented, decremented)
        let table = [
            ("::ffff:0.0.0.5", 10, "::ffff:0.0.0.15", "::ffff:0.0.0.0"),
            ("::ffff:255.255.255.250", 10, "::ffff:255.255.255.255", "::ffff:255.255.255.240"),
            ("::ffff:10.0.0.5", 3, "::ffff:10.0.0.8", "::ffff:10.0.0.2"),
            ("::ffff:0.0.0.0", 1, "::ffff:0.0.0.1", "::ffff:0.0.0.0"),
            ("::ffff:255.255.255.255", 1, "::ffff:255.255.255.255", "::ffff:255.255.255.254"),
        ];
        for (ip, count, incr, decr) in table.iter() {
            assert_eq!(v6(incr), increment_ip_by(v6(ip), *count), "{} + {}", ip, count);
            assert_eq!(v6(decr), decrement_ip_by(v6(ip), *count), "{} - {}", ip, count);
        }
        assert_eq!(v6("::"), decrement_ip_by(v6("::5"), 10));
        assert_eq!(v6("::2:0:0:4"), increment_ip_by(v6("::1:ffff:ffff:ffff"), 5));
    }

    #[test]
    fn ipv6_delta_increment_decrement() {
        let table = [
            (
                "2001:db8:85a3::8a2e:370:7334",
                "2001:db8:85a3::8a2d:370:7334",
                "2001:db8:85a3::8a2f:370:7334",
                "4294967296",
                "4294967296",
                "4294967296",
            ),
            (
                "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ff00",
                "ffff:ffff:ffff:ffff:ffff:ffff:ffff:fb00",
                "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff",
                "1024",
                "255",
                "1024",
            ),
            ("::ff", "::", "::4ff", "1024", "1024", "255"),
        ];
        for (ip, decr, incr, count, incres, decres) in table.iter() {
            let ip: Ipv6Addr = ip.parse().unwrap();
            let decr: Ipv6Addr = decr.parse().unwrap();
            let incr: Ipv6Addr = incr.parse().unwrap();
            let count: BigUint = count.parse().unwrap();
            assert_eq!(*incres, delta_ipv6(ip, incr).to_string());
            assert_eq!(*decres, delta_ipv6(ip, decr).to_string());
            assert_eq!(incr, increment_ipv6_by(ip, &count));
            assert_eq!(decr, decrement_ipv6_by(ip, &count));
        }
    }

    #[test]
    fn delta_ip_clamps_to_u32() {
        assert_eq!(MAX_IPV4, delta_ip(v6("2001:db8::"), v6("2001:db9::")));
        assert_eq!(
            1,
            delta_ip(v6("::ffff:10.0.0.1"), v4(10, 0, 0, 2))
        );
    }

    #[test]
    fn versions() {
        let table = [
            (v4(0, 0, 0, 0), Version::V4, Version::V4),
            (v4(192, 168, 1, 1), Version::V4, Version::V4),
            (v4(255, 255, 255, 255), Version::V4, Version::V4),
            (v6("::"), Version::V6, Version::V6),
            (v6("2001:db8:85a3::8a2e:370:7334"), Version::V6, Version::V6),
            (v6("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"), Version::V6, Version::V6),
            (v6("::ffff:0.0.0.0"), Version::V6, Version::V4),
            (v6("::ffff:192.168.1.1"), Version::V6, Version::V4),
            (v6("::ffff:255.255.255.255"), Version::V6, Version::V4),
        ];
        for (ip, nominal, effective) in table.iter() {
            assert_eq!(*nominal, nominal_version(*ip), "{}", ip);
            assert_eq!(*effective, effective_version(*ip), "{}", ip);
        }
        assert_eq!(v4(192, 168, 1, 1), force_ipv4(v6("::ffff:192.168.1.1")));
        assert_eq!(v6("::1"), force_ipv4(v6("::1")));
        assert_eq!("6", Version::V6.to_string());
    }

    #[test]
    fn compare_and_sort() {
        // (sorted position, address, ordering of 44.0.1.0 against it)
        let table = [
            (8, v4(192, 168, 2, 3), Ordering::Less),
            (1, v4(10, 0, 0, 3), Ordering::Greater),
            (0, v4(10, 0, 0, 1), Ordering::Greater),
            (10, v4(192, 168, 3, 255), Ordering::Less),
            (9, v4(192, 168, 3, 1), Ordering::Less),
            (2, v4(10, 0, 1, 0), Ordering::Greater),
            (7, v4(192, 168, 1, 1), Ordering::Less),
            (3, v4(44, 0, 0, 1), Ordering::Greater),
            (4, v4(44, 0, 1, 0), Ordering::Equal),
            (5, v4(44, 1, 0, 0), Ordering::Less),
            (6, v4(170, 1, 12, 1), Ordering::Less),
        ];
        let pivot = v4(44, 0, 1, 0);
        let mut ips = Vec::new();
        for (_, ip, ord) in table.iter() {
            assert_eq!(*ord, compare_ips(&pivot, ip), "{}", ip);
            ips.push(*ip);
        }
        sort_ips(&mut ips);
        for (pos, ip, _) in table.iter() {
            assert_eq!(*ip, ips[*pos]);
        }
    }

    #[test]
    fn ipv4_sorts_before_ipv6() {
        assert_eq!(
            Ordering::Less,
            compare_ips(&v4(255, 255, 255, 255), &v6("::1:0:0"))
        );
    }

    #[test]
    fn saturation_at_family_limits() {
        assert_eq!(IPV4_ALL_ONES, next_ipv4(IPV4_ALL_ONES));
        assert_eq!(IPV4_ZERO, previous_ipv4(IPV4_ZERO));
        assert_eq!(IPV6_ALL_ONES, next_ipv6(IPV6_ALL_ONES));
        assert_eq!(IPV6_ZERO, previous_ipv6(IPV6_ZERO));
        assert_eq!(IPV4_ALL_ONES, increment_ipv4_by(Ipv4Addr::new(255, 255, 255, 0), 1000));
        assert_eq!(IPV4_ZERO, decrement_ipv4_by(Ipv4Addr::new(0, 0, 1, 0), 1000));
        assert_eq!(
            IPV6_ALL_ONES,
            increment_ipv6_by("ffff:ffff:ffff:ffff:ffff:ffff:ffff:0".parse().unwrap(), &BigUint::from(1u32 << 20))
        );
        assert_eq!(IPV6_ZERO, decrement_ipv6_by("::1".parse().unwrap(), &BigUint::from(2u8)));
    }

    #[test]
    fn carry_is_bounded_by_width() {
        assert_eq!(Some([0, 2, 0xff, 0xff]), carry_up([0, 1, 0xff, 0xff], 2));
        assert_eq!(None, carry_up([0xff, 0xff, 0, 0], 2));
        assert_eq!(Some([0, 0, 0, 0]), borrow_down([0, 1, 0, 0], 2));
        assert_eq!(None, borrow_down([0, 0, 9, 9], 2));
    }

    #[quickcheck]
    fn ipv4_round_trips_through_u32(x: u32) -> bool {
        ipv4_to_u32(u32_to_ipv4(x)) == x
    }

    #[quickcheck]
    fn ipv6_round_trips_through_biguint(x: u128) -> bool {
        let ip = Ipv6Addr::from(x);
        biguint_to_ipv6(&ip_to_biguint(IpAddr::V6(ip))) == ip
    }

    #[quickcheck]
    fn ipv4_increment_then_decrement(x: u32, n: u32) -> bool {
        let n = n % (MAX_IPV4 - x).max(1);
        let ip = u32_to_ipv4(x);
        decrement_ipv4_by(increment_ipv4_by(ip, n), n) == ip
    }

    #[quickcheck]
    fn ipv6_increment_then_decrement(x: u128, n: u64) -> bool {
        let ip = Ipv6Addr::from(x >> 1);
        let n = BigUint::from(n);
        decrement_ipv6_by(increment_ipv6_by(ip, &n), &n) == ip
    }

    #[quickcheck]
    fn next_matches_integer_successor(x: u32) -> bool {
        let expected = x.saturating_add(1);
        next_ipv4(u32_to_ipv4(x)) == u32_to_ipv4(expected)
    }

    #[quickcheck]
    fn compare_is_a_total_order(a: u32, b: u32, c: u32) -> bool {
        let (a, b, c) = (
            IpAddr::V4(u32_to_ipv4(a)),
            IpAddr::V4(u32_to_ipv4(b)),
            IpAddr::V4(u32_to_ipv4(c)),
        );
        let antisymmetric = compare_ips(&a, &b) == compare_ips(&b, &a).reverse();
        let reflexive = compare_ips(&a, &a) == Ordering::Equal;
        let transitive = !(compare_ips(&a, &b) != Ordering::Greater
            && compare_ips(&b, &c) != Ordering::Greater)
            || compare_ips(&a, &c) != Ordering::Greater;
        antisymmetric && reflexive && transitive
    }

    #[quickcheck]
    fn sorting_matches_integer_order(xs: Vec<u32>) -> bool {
        let mut ips: Vec<IpAddr> = xs.iter().map(|x| IpAddr::V4(u32_to_ipv4(*x))).collect();
        sort_ips(&mut ips);
        let mut ints = xs.clone();
        ints.sort_unstable();
        ips.iter()
            .zip(ints.iter())
            .all(|(ip, i)| *ip == IpAddr::V4(u32_to_ipv4(*i)))
    }
}
