use crate::addr::{force_ipv4, next_ipv4, previous_ipv4, Version, IPV4_ALL_ONES, IPV4_ZERO};
use crate::error::{Error, Result};
use crate::net::{parse_cidr, Netblock, Network};
use log::debug;
use std::fmt::{Display, Error as FmtError, Formatter};
use std::net::{IpAddr, Ipv4Addr};
use std::ops::RangeInclusive;
use std::str::FromStr;

pub(crate) const BITS: u8 = 32;

fn mask_bits(prefix: u8) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (BITS - prefix)
    }
}

/// An IPv4 netblock.
///
/// Blocks of /31 follow RFC 3021: both addresses are usable and there is no
/// separate network or broadcast address. A /32 is a single host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Net4 {
    addr: Ipv4Addr,
    prefix: u8,
}

/// Outcome of stepping through a [`Net4`].
///
/// Landing on the network or broadcast address still succeeds, but the
/// caller is told so it can decide whether the address is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Usable(Ipv4Addr),
    Network(Ipv4Addr),
    Broadcast(Ipv4Addr),
}

impl Step {
    pub fn addr(self) -> Ipv4Addr {
        match self {
            Step::Usable(a) | Step::Network(a) | Step::Broadcast(a) => a,
        }
    }

    pub fn is_usable(self) -> bool {
        matches!(self, Step::Usable(_))
    }
}

impl Net4 {
    /// Builds the block of length `prefix` containing `addr`. Host bits of
    /// `addr` are cleared.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Self> {
        if prefix > BITS {
            return Err(Error::UnsupportedFamily);
        }
        let net = u32::from(addr) & mask_bits(prefix);
        Ok(Net4 {
            addr: Ipv4Addr::from(net),
            prefix,
        })
    }

    pub fn network_address(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn broadcast_address(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) | !mask_bits(self.prefix))
    }

    pub fn wildcard(&self) -> Ipv4Addr {
        Ipv4Addr::from(!mask_bits(self.prefix))
    }

    fn holds(&self, ip: Ipv4Addr) -> bool {
        u32::from(ip) & mask_bits(self.prefix) == u32::from(self.addr)
    }

    /// Number of usable addresses: 2^(32-prefix) - 2, except 1 for a /32
    /// and 0 for a /31 (even though [`Net4::addresses`] yields both of its
    /// addresses).
    pub fn count(&self) -> u32 {
        match BITS - self.prefix {
            0 => 1,
            1 => 0,
            exp => ((1u64 << exp) - 2) as u32,
        }
    }

    /// Lazily iterates over the usable addresses of the block.
    pub fn addresses(&self) -> Addresses {
        Addresses {
            range: u32::from(self.first_address())..=u32::from(self.last_address()),
        }
    }

    /// Collects up to `size` usable addresses (all of them when `size` is 0),
    /// skipping the first `offset`.
    pub fn enumerate(&self, size: usize, offset: usize) -> Vec<Ipv4Addr> {
        let it = self.addresses().skip(offset);
        if size == 0 {
            it.collect()
        } else {
            it.take(size).collect()
        }
    }

    /// Steps `ip` up by one without leaving the block.
    pub fn next_ip(&self, ip: Ipv4Addr) -> Result<Step> {
        if !self.holds(ip) {
            return Err(Error::AddressOutOfRange);
        }
        let next = next_ipv4(ip);
        if next == ip || !self.holds(next) {
            return Err(Error::AddressAtEndOfRange);
        }
        if next == self.broadcast_address() {
            return Ok(Step::Broadcast(next));
        }
        Ok(Step::Usable(next))
    }

    /// Steps `ip` down by one without leaving the block.
    pub fn previous_ip(&self, ip: Ipv4Addr) -> Result<Step> {
        if !self.holds(ip) {
            return Err(Error::AddressOutOfRange);
        }
        let prev = previous_ipv4(ip);
        if prev == ip || !self.holds(prev) {
            return Err(Error::AddressAtEndOfRange);
        }
        if prev == self.addr {
            return Ok(Step::Network(prev));
        }
        Ok(Step::Usable(prev))
    }

    /// The block of length `prefix` holding the address right after this
    /// block's broadcast address. If `prefix` is shorter than this block's,
    /// the result may enclose this block.
    pub fn next_net(&self, prefix: u8) -> Result<Net4> {
        let last = self.broadcast_address();
        if last == IPV4_ALL_ONES {
            return Err(Error::AddressAtEndOfRange);
        }
        Net4::new(next_ipv4(last), prefix)
    }

    /// The block of length `prefix` holding the address right before this
    /// block's network address.
    pub fn previous_net(&self, prefix: u8) -> Result<Net4> {
        if self.addr == IPV4_ZERO {
            return Err(Error::AddressAtEndOfRange);
        }
        Net4::new(previous_ipv4(self.addr), prefix)
    }

    /// Carves the block into children of length `prefix`, left to right.
    /// A `prefix` of 0 splits the block in half.
    ///
    /// ```
    /// use netblock::Net4;
    /// let n: Net4 = "192.168.1.0/24".parse().unwrap();
    /// let halves: Vec<String> = n.subnet(0).unwrap().iter().map(|s| s.to_string()).collect();
    /// assert_eq!(halves, ["192.168.1.0/25", "192.168.1.128/25"]);
    /// ```
    pub fn subnet(&self, prefix: u8) -> Result<Vec<Net4>> {
        let prefix = if prefix == 0 { self.prefix + 1 } else { prefix };
        if prefix < self.prefix {
            return Err(Error::InvalidMaskLength);
        }
        let mut out = vec![Net4::new(self.addr, prefix)?];
        let end = self.broadcast_address();
        loop {
            let tail = out[out.len() - 1].broadcast_address();
            if tail >= end {
                break;
            }
            out.push(Net4 {
                addr: next_ipv4(tail),
                prefix,
            });
        }
        debug!("{} split into {} blocks of /{}", self, out.len(), prefix);
        Ok(out)
    }

    /// The enclosing block of length `prefix`. A `prefix` of 0 widens the
    /// block by one bit.
    pub fn supernet(&self, prefix: u8) -> Result<Net4> {
        let prefix = if prefix == 0 {
            self.prefix.checked_sub(1).ok_or(Error::InvalidMaskLength)?
        } else {
            prefix
        };
        if prefix > self.prefix {
            return Err(Error::InvalidMaskLength);
        }
        Net4::new(self.addr, prefix)
    }
}

impl Network for Net4 {
    type Addr = Ipv4Addr;

    fn contains(&self, ip: IpAddr) -> bool {
        match force_ipv4(ip) {
            IpAddr::V4(a) => self.holds(a),
            IpAddr::V6(_) => false,
        }
    }

    fn ip(&self) -> Ipv4Addr {
        self.addr
    }

    fn mask(&self) -> Ipv4Addr {
        Ipv4Addr::from(mask_bits(self.prefix))
    }

    fn first_address(&self) -> Ipv4Addr {
        if self.prefix >= BITS - 1 {
            return self.addr;
        }
        next_ipv4(self.addr)
    }

    fn last_address(&self) -> Ipv4Addr {
        let last = self.broadcast_address();
        if self.prefix >= BITS - 1 {
            return last;
        }
        previous_ipv4(last)
    }

    fn prefix_len(&self) -> u8 {
        self.prefix
    }

    fn version(&self) -> Version {
        Version::V4
    }
}

impl FromStr for Net4 {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match parse_cidr(s)?.1 {
            Netblock::V4(n) => Ok(n),
            Netblock::V6(_) => Err(Error::UnsupportedFamily),
        }
    }
}

impl Display for Net4 {
    fn fmt(&self, f: &mut Formatter) -> std::result::Result<(), FmtError> {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

/// Lazy, restartable iterator over the usable addresses of a [`Net4`].
#[derive(Debug, Clone)]
pub struct Addresses {
    range: RangeInclusive<u32>,
}

impl Iterator for Addresses {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Ipv4Addr> {
        self.range.next().map(Ipv4Addr::from)
    }

    fn nth(&mut self, n: usize) -> Option<Ipv4Addr> {
        self.range.nth(n).map(Ipv4Addr::from)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl DoubleEndedIterator for Addresses {
    fn next_back(&mut self) -> Option<Ipv4Addr> {
        self.range.next_back().map(Ipv4Addr::from)
    }
}
