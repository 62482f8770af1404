//! IP address arithmetic and CIDR netblocks for IPv4 and IPv6.
//!
//! Addresses are the standard library's [`std::net::IpAddr`] family. An
//! IPv4-mapped IPv6 address (`::ffff:a.b.c.d`) is treated as IPv4 wherever
//! the effective family matters.
//!
//! ```
//! use netblock::{Netblock, Network};
//!
//! let n: Netblock = "192.168.1.61/26".parse().unwrap();
//! assert_eq!("192.168.1.0/26", n.to_string());
//! assert!(n.contains("192.168.1.62".parse().unwrap()));
//! ```

pub mod addr;
pub mod error;
pub mod ipv4;
pub mod ipv6;
pub mod net;
pub mod text;

pub use addr::{
    compare_ips, decrement_ip_by, delta_ip, effective_version, force_ipv4, increment_ip_by,
    is_ipv4_mapped, next_ip, nominal_version, previous_ip, sort_ips, Version,
};
pub use error::{Error, Result};
pub use ipv4::{Net4, Step};
pub use ipv6::Net6;
pub use net::{compare_netblocks, find_between, parse_cidr, sort_netblocks, Netblock, Network};
pub use text::{expand_ipv6, hex_string_to_ip, ip_to_arpa, ip_to_binary_string, ip_to_hex_string};
