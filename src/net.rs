use crate::addr::{compare_ips, force_ipv4, next_ip, nominal_version, previous_ip, Version};
use crate::error::{Error, Result};
use crate::ipv4::Net4;
use crate::ipv6::Net6;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt::{Display, Error as FmtError, Formatter};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Operations shared by every kind of netblock.
pub trait Network: Display {
    type Addr: Into<IpAddr> + Copy;

    /// True if `ip` is a member of the block. An IPv4-mapped IPv6 address
    /// counts as IPv4, and an IPv6 block lying inside `::ffff:0:0/96` is an
    /// IPv4 range. Addresses of the other family are never members.
    fn contains(&self, ip: IpAddr) -> bool;

    /// True if `other` lies entirely within this block.
    fn contains_net(&self, other: &Netblock) -> bool {
        self.prefix_len() <= other.prefix_len() && self.contains(other.ip())
    }

    /// The base (network) address.
    fn ip(&self) -> Self::Addr;
    fn mask(&self) -> Self::Addr;
    /// First usable address.
    fn first_address(&self) -> Self::Addr;
    /// Last usable address.
    fn last_address(&self) -> Self::Addr;
    fn prefix_len(&self) -> u8;
    fn version(&self) -> Version;
}

/// A netblock of either family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Netblock {
    V4(Net4),
    V6(Net6),
}

impl Netblock {
    /// Builds the block of length `prefix` holding `ip`. The prefix is read
    /// in the effective family of `ip`, so an IPv4-mapped address yields an
    /// IPv4 block.
    pub fn new(ip: IpAddr, prefix: u8) -> Result<Self> {
        match force_ipv4(ip) {
            IpAddr::V4(a) => Net4::new(a, prefix).map(Netblock::V4),
            IpAddr::V6(a) => Net6::new(a, prefix).map(Netblock::V6),
        }
    }

    pub fn subnet(&self, prefix: u8) -> Result<Vec<Netblock>> {
        match self {
            Netblock::V4(n) => Ok(n.subnet(prefix)?.into_iter().map(Netblock::V4).collect()),
            Netblock::V6(n) => Ok(n.subnet(prefix)?.into_iter().map(Netblock::V6).collect()),
        }
    }

    pub fn supernet(&self, prefix: u8) -> Result<Netblock> {
        match self {
            Netblock::V4(n) => n.supernet(prefix).map(Netblock::V4),
            Netblock::V6(n) => n.supernet(prefix).map(Netblock::V6),
        }
    }

    pub fn next_net(&self, prefix: u8) -> Result<Netblock> {
        match self {
            Netblock::V4(n) => n.next_net(prefix).map(Netblock::V4),
            Netblock::V6(n) => n.next_net(prefix).map(Netblock::V6),
        }
    }

    pub fn previous_net(&self, prefix: u8) -> Result<Netblock> {
        match self {
            Netblock::V4(n) => n.previous_net(prefix).map(Netblock::V4),
            Netblock::V6(n) => n.previous_net(prefix).map(Netblock::V6),
        }
    }

    /// Lowest and highest address of the block, ignoring usability.
    fn bounds(&self) -> (IpAddr, IpAddr) {
        match self {
            Netblock::V4(n) => (n.network_address().into(), n.broadcast_address().into()),
            Netblock::V6(n) => (n.first_address().into(), n.last_address().into()),
        }
    }
}

impl Network for Netblock {
    type Addr = IpAddr;

    fn contains(&self, ip: IpAddr) -> bool {
        match self {
            Netblock::V4(n) => n.contains(ip),
            Netblock::V6(n) => n.contains(ip),
        }
    }

    fn ip(&self) -> IpAddr {
        match self {
            Netblock::V4(n) => n.ip().into(),
            Netblock::V6(n) => n.ip().into(),
        }
    }

    fn mask(&self) -> IpAddr {
        match self {
            Netblock::V4(n) => n.mask().into(),
            Netblock::V6(n) => n.mask().into(),
        }
    }

    fn first_address(&self) -> IpAddr {
        match self {
            Netblock::V4(n) => n.first_address().into(),
            Netblock::V6(n) => n.first_address().into(),
        }
    }

    fn last_address(&self) -> IpAddr {
        match self {
            Netblock::V4(n) => n.last_address().into(),
            Netblock::V6(n) => n.last_address().into(),
        }
    }

    fn prefix_len(&self) -> u8 {
        match self {
            Netblock::V4(n) => n.prefix_len(),
            Netblock::V6(n) => n.prefix_len(),
        }
    }

    fn version(&self) -> Version {
        match self {
            Netblock::V4(_) => Version::V4,
            Netblock::V6(_) => Version::V6,
        }
    }
}

impl From<Net4> for Netblock {
    fn from(n: Net4) -> Self {
        Netblock::V4(n)
    }
}

impl From<Net6> for Netblock {
    fn from(n: Net6) -> Self {
        Netblock::V6(n)
    }
}

impl Display for Netblock {
    fn fmt(&self, f: &mut Formatter) -> std::result::Result<(), FmtError> {
        match self {
            Netblock::V4(n) => n.fmt(f),
            Netblock::V6(n) => n.fmt(f),
        }
    }
}

impl FromStr for Netblock {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        parse_cidr(s).map(|(_, n)| n)
    }
}

/// Parses CIDR text such as `192.168.0.1/24` or `2001:db8::/64`.
///
/// Returns the address exactly as written together with the masked block.
/// Text containing `:` is read as IPv6; otherwise dotted text is read as
/// IPv4 and always yields a 4-byte address.
pub fn parse_cidr(s: &str) -> Result<(IpAddr, Netblock)> {
    lazy_static! {
        static ref RE: Regex =
            Regex::new(r"^\s*([0-9A-Fa-f:.]+)/([0-9]{1,3})\s*$").unwrap();
    }
    let caps = RE
        .captures(s)
        .ok_or_else(|| Error::malformed(s, "expected <address>/<prefix>"))?;
    let text = &caps[1];
    let prefix = caps[2]
        .parse::<u8>()
        .map_err(|e| Error::malformed(s, e.to_string()))?;

    let ip = if text.contains(':') {
        text.parse::<Ipv6Addr>()
            .map(IpAddr::V6)
            .map_err(|e| Error::malformed(s, e.to_string()))?
    } else if text.contains('.') {
        text.parse::<Ipv4Addr>()
            .map(IpAddr::V4)
            .map_err(|e| Error::malformed(s, e.to_string()))?
    } else {
        return Err(Error::malformed(s, "address has neither '.' nor ':'"));
    };
    if prefix > nominal_version(ip).bits() {
        return Err(Error::malformed(
            s,
            format!("prefix /{} too long for IPv{}", prefix, nominal_version(ip)),
        ));
    }

    let net = match ip {
        IpAddr::V4(a) => Net4::new(a, prefix).map(Netblock::V4),
        IpAddr::V6(a) => Net6::new(a, prefix).map(Netblock::V6),
    }
    .map_err(|e| Error::malformed(s, e.to_string()))?;
    Ok((ip, net))
}

/// Finds the widest netblock lying strictly between `a` and `b`.
///
/// Candidates start at the address after `a` and are tried from /1 towards
/// the host length; the first that ends at or before the address preceding
/// `b` wins. The flag is true when the block covers that gap exactly.
///
/// ```
/// use std::net::{IpAddr, Ipv4Addr};
/// let a = IpAddr::V4(Ipv4Addr::new(192, 168, 0, 255));
/// let b = IpAddr::V4(Ipv4Addr::new(192, 168, 2, 0));
/// let (n, exact) = netblock::find_between(a, b).unwrap();
/// assert_eq!("192.168.1.0/24", n.to_string());
/// assert!(exact);
/// ```
pub fn find_between(a: IpAddr, b: IpAddr) -> Result<(Netblock, bool)> {
    let (a, b) = (force_ipv4(a), force_ipv4(b));
    if nominal_version(a) != nominal_version(b) || compare_ips(&a, &b) != Ordering::Less {
        return Err(Error::NoValidRange);
    }

    let lo = next_ip(a);
    let hi = previous_ip(b);
    for prefix in 1..=nominal_version(lo).bits() {
        let candidate = match lo {
            IpAddr::V4(x) => Netblock::V4(Net4::new(x, prefix)?),
            IpAddr::V6(x) => Netblock::V6(Net6::new(x, prefix)?),
        };
        let (first, last) = candidate.bounds();
        let starts = compare_ips(&first, &lo);
        let ends = compare_ips(&last, &hi);
        if starts != Ordering::Less && ends != Ordering::Greater {
            let exact = starts == Ordering::Equal && ends == Ordering::Equal;
            debug!("between {} and {}: {} (exact: {})", a, b, candidate, exact);
            return Ok((candidate, exact));
        }
    }
    Err(Error::NoValidRange)
}

/// Orders by base address, then by ascending prefix length, so an enclosing
/// network sorts before its own subnets.
pub fn compare_netblocks(a: &Netblock, b: &Netblock) -> Ordering {
    compare_ips(&a.ip(), &b.ip()).then(a.prefix_len().cmp(&b.prefix_len()))
}

/// Sorts netblocks in place in [`compare_netblocks`] order.
pub fn sort_netblocks(nets: &mut [Netblock]) {
    nets.sort_by(compare_netblocks);
}
