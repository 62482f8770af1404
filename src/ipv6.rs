use crate::addr::{
    borrow_down, carry_up, effective_version, increment_ipv6_by, is_ipv4_mapped, next_ipv6,
    previous_ipv6, Version, IPV6_ALL_ONES, IPV6_ZERO, MAX_UINT,
};
use crate::error::{Error, Result};
use crate::net::{parse_cidr, Netblock, Network};
use log::debug;
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};
use std::convert::TryFrom;
use std::fmt::{Display, Error as FmtError, Formatter};
use std::net::{IpAddr, Ipv6Addr};
use std::ops::RangeInclusive;
use std::str::FromStr;

pub(crate) const BITS: u8 = 128;

/// Leading bytes treated as routing-significant unless configured
/// otherwise: a 64-bit network and a 64-bit interface identifier.
pub const DEFAULT_NETWORK_BYTES: u8 = 8;

const MAPPED_PREFIX: u8 = 96;

fn mask_bits(prefix: u8) -> u128 {
    if prefix == 0 {
        0
    } else {
        u128::MAX << (BITS - prefix)
    }
}

/// An IPv6 netblock.
///
/// There is no broadcast address, so every address in the block is usable.
/// Besides its prefix a `Net6` carries a network-byte count which bounds
/// [`Net6::next_ip`] and [`Net6::previous_ip`]: only the leading
/// `network_bytes` bytes are stepped and the interface identifier behind
/// them is reset to zero. With the default of 8 a /48 is walked one /64 at
/// a time; set it to 16 to step through individual addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Net6 {
    addr: Ipv6Addr,
    prefix: u8,
    net_bytes: u8,
}

impl Net6 {
    /// Builds the block of length `prefix` containing `addr`. Host bits of
    /// `addr` are cleared.
    ///
    /// Any 128-bit block is accepted, including ones inside the IPv4-mapped
    /// range `::ffff:0:0/96`; see [`Network::contains`] for how membership
    /// works there.
    pub fn new(addr: Ipv6Addr, prefix: u8) -> Result<Self> {
        if prefix > BITS {
            return Err(Error::UnsupportedFamily);
        }
        Ok(Net6 {
            addr: Ipv6Addr::from(u128::from(addr) & mask_bits(prefix)),
            prefix,
            net_bytes: DEFAULT_NETWORK_BYTES,
        })
    }

    pub fn with_network_bytes(self, n: u8) -> Result<Self> {
        if n == 0 || n > 16 {
            return Err(Error::InvalidNetworkBytes(n));
        }
        Ok(Net6 {
            net_bytes: n,
            ..self
        })
    }

    pub fn network_bytes(&self) -> u8 {
        self.net_bytes
    }

    pub fn wildcard(&self) -> Ipv6Addr {
        Ipv6Addr::from(!mask_bits(self.prefix))
    }

    fn holds(&self, ip: Ipv6Addr) -> bool {
        u128::from(ip) & mask_bits(self.prefix) == u128::from(self.addr)
    }

    /// True if every address of the block is IPv4-mapped.
    pub fn is_ipv4_mapped(&self) -> bool {
        self.prefix >= MAPPED_PREFIX && is_ipv4_mapped(IpAddr::V6(self.addr))
    }

    fn reshape(&self, addr: Ipv6Addr, prefix: u8) -> Result<Net6> {
        let n = Net6::new(addr, prefix)?;
        Ok(Net6 {
            net_bytes: self.net_bytes,
            ..n
        })
    }

    /// Number of addresses: 2^(128-prefix), except 1 for a /128 and 0 for
    /// a /127 (whose two addresses are still enumerated).
    pub fn count(&self) -> BigUint {
        match BITS - self.prefix {
            0 => BigUint::one(),
            1 => BigUint::from(0u8),
            exp => BigUint::one() << usize::from(exp),
        }
    }

    /// Lazily iterates over every address of the block.
    pub fn addresses(&self) -> Addresses {
        Addresses {
            range: u128::from(self.first_address())..=u128::from(self.last_address()),
        }
    }

    /// Collects up to `size` addresses (as many as the count allows when
    /// `size` is 0), skipping the first `offset`.
    ///
    /// A count that does not fit a `u64` is treated as [`MAX_UINT`]. Asking
    /// for the whole of a large block materializes all of it; prefer
    /// [`Net6::addresses`] there.
    pub fn enumerate(&self, size: u64, offset: u64) -> Vec<Ipv6Addr> {
        let total = if BITS - self.prefix == 1 {
            2
        } else {
            self.count().to_u64().unwrap_or(MAX_UINT)
        };
        if offset >= total {
            return Vec::new();
        }
        let size = if size == 0 || size > total - offset {
            total - offset
        } else {
            size
        };
        let start = increment_ipv6_by(self.first_address(), &BigUint::from(offset));
        Addresses {
            range: u128::from(start)..=u128::from(self.last_address()),
        }
        .take(usize::try_from(size).unwrap_or(usize::MAX))
        .collect()
    }

    /// Advances the network bytes of `ip` by one, zeroing the interface
    /// identifier.
    pub fn next_ip(&self, ip: Ipv6Addr) -> Result<Ipv6Addr> {
        if !self.holds(ip) {
            return Err(Error::AddressOutOfRange);
        }
        let next = carry_up(self.network_part(ip), usize::from(self.net_bytes))
            .map(Ipv6Addr::from)
            .ok_or(Error::AddressAtEndOfRange)?;
        if !self.holds(next) {
            return Err(Error::AddressAtEndOfRange);
        }
        Ok(next)
    }

    /// Steps the network bytes of `ip` back by one, zeroing the interface
    /// identifier.
    pub fn previous_ip(&self, ip: Ipv6Addr) -> Result<Ipv6Addr> {
        if !self.holds(ip) {
            return Err(Error::AddressOutOfRange);
        }
        let prev = borrow_down(self.network_part(ip), usize::from(self.net_bytes))
            .map(Ipv6Addr::from)
            .ok_or(Error::AddressAtEndOfRange)?;
        if !self.holds(prev) {
            return Err(Error::AddressAtEndOfRange);
        }
        Ok(prev)
    }

    fn network_part(&self, ip: Ipv6Addr) -> [u8; 16] {
        let mut bytes = ip.octets();
        for b in bytes.iter_mut().skip(usize::from(self.net_bytes)) {
            *b = 0;
        }
        bytes
    }

    /// The block of length `prefix` holding the address right after this
    /// block's last address.
    pub fn next_net(&self, prefix: u8) -> Result<Net6> {
        let last = self.last_address();
        if last == IPV6_ALL_ONES {
            return Err(Error::AddressAtEndOfRange);
        }
        self.reshape(next_ipv6(last), prefix)
    }

    /// The block of length `prefix` holding the address right before this
    /// block's first address.
    pub fn previous_net(&self, prefix: u8) -> Result<Net6> {
        if self.addr == IPV6_ZERO {
            return Err(Error::AddressAtEndOfRange);
        }
        self.reshape(previous_ipv6(self.addr), prefix)
    }

    /// Carves the block into children of length `prefix`, left to right.
    /// A `prefix` of 0 splits the block in half.
    pub fn subnet(&self, prefix: u8) -> Result<Vec<Net6>> {
        let prefix = if prefix == 0 { self.prefix + 1 } else { prefix };
        if prefix < self.prefix {
            return Err(Error::InvalidMaskLength);
        }
        let mut out = vec![self.reshape(self.addr, prefix)?];
        let end = self.last_address();
        loop {
            let tail = out[out.len() - 1].last_address();
            if tail >= end {
                break;
            }
            out.push(Net6 {
                addr: next_ipv6(tail),
                prefix,
                net_bytes: self.net_bytes,
            });
        }
        debug!("{} split into {} blocks of /{}", self, out.len(), prefix);
        Ok(out)
    }

    /// The enclosing block of length `prefix`. A `prefix` of 0 widens the
    /// block by one bit.
    pub fn supernet(&self, prefix: u8) -> Result<Net6> {
        let prefix = if prefix == 0 {
            self.prefix.checked_sub(1).ok_or(Error::InvalidMaskLength)?
        } else {
            prefix
        };
        if prefix > self.prefix {
            return Err(Error::InvalidMaskLength);
        }
        self.reshape(self.addr, prefix)
    }
}

impl Network for Net6 {
    type Addr = Ipv6Addr;

    /// Blocks inside `::ffff:0:0/96` hold IPv4 addresses, given either as
    /// `Ipv4Addr` or in mapped form. Every other block holds only addresses
    /// whose effective family is IPv6.
    fn contains(&self, ip: IpAddr) -> bool {
        let a = match ip {
            IpAddr::V4(a) => a.to_ipv6_mapped(),
            IpAddr::V6(a) => a,
        };
        let mapped = effective_version(IpAddr::V6(a)) == Version::V4;
        self.holds(a) && mapped == self.is_ipv4_mapped()
    }

    fn ip(&self) -> Ipv6Addr {
        self.addr
    }

    fn mask(&self) -> Ipv6Addr {
        Ipv6Addr::from(mask_bits(self.prefix))
    }

    fn first_address(&self) -> Ipv6Addr {
        self.addr
    }

    fn last_address(&self) -> Ipv6Addr {
        Ipv6Addr::from(u128::from(self.addr) | !mask_bits(self.prefix))
    }

    fn prefix_len(&self) -> u8 {
        self.prefix
    }

    fn version(&self) -> Version {
        Version::V6
    }
}

impl FromStr for Net6 {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match parse_cidr(s)?.1 {
            Netblock::V6(n) => Ok(n),
            Netblock::V4(_) => Err(Error::UnsupportedFamily),
        }
    }
}

impl Display for Net6 {
    fn fmt(&self, f: &mut Formatter) -> std::result::Result<(), FmtError> {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

/// Lazy, restartable iterator over the addresses of a [`Net6`].
#[derive(Debug, Clone)]
pub struct Addresses {
    range: RangeInclusive<u128>,
}

impl Iterator for Addresses {
    type Item = Ipv6Addr;

    fn next(&mut self) -> Option<Ipv6Addr> {
        self.range.next().map(Ipv6Addr::from)
    }

    fn nth(&mut self, n: usize) -> Option<Ipv6Addr> {
        self.range.nth(n).map(Ipv6Addr::from)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl DoubleEndedIterator for Addresses {
    fn next_back(&mut self) -> Option<Ipv6Addr> {
        self.range.next_back().map(Ipv6Addr::from)
    }
}
