//! CIDR parsing and subnet calculations
//!
//! Provides utilities for working with CIDR notation:
//! - Parse CIDR notation (e.g., "192.168.1.15/24")
//! - Derive mask, wildcard, network and broadcast addresses
//! - Usable host range and host count
//! - Render every field for display via [`SubnetReport`]
//!
//! # Examples
//!
//! ```
//! use ipcalc_cidr::Cidr;
//!
//! let cidr = Cidr::parse("192.168.1.15/24").unwrap();
//! assert_eq!(cidr.prefix_len(), 24);
//! assert_eq!(cidr.network().0, 0xC0A80100); // 192.168.1.0
//! assert_eq!(cidr.broadcast().0, 0xC0A801FF); // 192.168.1.255
//! assert_eq!(cidr.host_count(), 254);
//! ```

use ipcalc_core::{IpCalcError, Ipv4Address, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub mod report;

pub use report::SubnetReport;

/// Longest valid prefix length
pub const MAX_PREFIX_LEN: u8 = 32;

/// Subnet mask with `prefix_len` leading one-bits
///
/// ```
/// assert_eq!(ipcalc_cidr::mask_for(30), 0xFFFFFFFC);
/// assert_eq!(ipcalc_cidr::mask_for(0), 0);
/// ```
pub fn mask_for(prefix_len: u8) -> u32 {
    if prefix_len == 0 {
        0
    } else {
        !((1u64 << (MAX_PREFIX_LEN - prefix_len)) - 1) as u32
    }
}

/// CIDR block anchored at a host address
///
/// The address is kept as given; mask, network and broadcast are derived
/// from it and the prefix length. Deserialization goes through [`Cidr::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CidrRepr")]
pub struct Cidr {
    /// Address as entered
    address: Ipv4Address,
    /// Prefix length (0-32)
    prefix_len: u8,
}

/// Unvalidated wire form of [`Cidr`]
#[derive(Deserialize)]
struct CidrRepr {
    address: Ipv4Address,
    prefix_len: u8,
}

impl TryFrom<CidrRepr> for Cidr {
    type Error = IpCalcError;

    fn try_from(repr: CidrRepr) -> Result<Self> {
        Cidr::new(repr.address, repr.prefix_len)
    }
}

impl Cidr {
    /// Parse CIDR notation string
    ///
    /// Surrounding whitespace is ignored. Octets and prefix accept ASCII
    /// digits only.
    ///
    /// # Arguments
    ///
    /// * `input` - CIDR string (e.g., "91.124.230.205/30")
    ///
    /// # Examples
    ///
    /// ```
    /// use ipcalc_cidr::Cidr;
    ///
    /// let cidr = Cidr::parse("10.0.0.1/8").unwrap();
    /// assert_eq!(cidr.prefix_len(), 8);
    /// assert!(Cidr::parse("10.0.0.1/33").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_notation(input.trim()).map_err(|err| {
            debug!(input, error = %err, "rejected CIDR notation");
            err
        })
    }

    fn parse_notation(input: &str) -> Result<Self> {
        let Some((ip_str, prefix_str)) = input.split_once('/') else {
            // A bare but well-formed address gets a more specific message
            input.parse::<Ipv4Address>()?;
            return Err(IpCalcError::InvalidInput(format!(
                "missing prefix in {:?} (expected format: x.x.x.x/prefix)",
                input
            )));
        };

        if prefix_str.contains('/') {
            return Err(IpCalcError::InvalidInput(format!(
                "expected a single '/' in {:?}",
                input
            )));
        }

        let address: Ipv4Address = ip_str.parse()?;
        let prefix_len = parse_prefix(prefix_str)?;

        Self::new(address, prefix_len)
    }

    /// Create new CIDR from an address and prefix length
    ///
    /// # Arguments
    ///
    /// * `address` - Host or network address
    /// * `prefix_len` - Prefix length (0-32)
    pub fn new(address: Ipv4Address, prefix_len: u8) -> Result<Self> {
        if prefix_len > MAX_PREFIX_LEN {
            return Err(prefix_out_of_range(prefix_len));
        }

        Ok(Self {
            address,
            prefix_len,
        })
    }

    /// Get the address as entered
    pub fn address(&self) -> Ipv4Address {
        self.address
    }

    /// Get prefix length
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Get subnet mask
    pub fn mask(&self) -> Ipv4Address {
        Ipv4Address(mask_for(self.prefix_len))
    }

    /// Get wildcard (inverted) mask
    pub fn wildcard(&self) -> Ipv4Address {
        Ipv4Address(!self.mask().0)
    }

    /// Get network address
    pub fn network(&self) -> Ipv4Address {
        Ipv4Address(self.address.0 & self.mask().0)
    }

    /// Get broadcast address
    pub fn broadcast(&self) -> Ipv4Address {
        Ipv4Address(self.network().0 | !self.mask().0)
    }

    /// Get usable host range (network + 1 ..= broadcast - 1)
    ///
    /// /31 and /32 blocks have no usable hosts and return `None`.
    pub fn usable_range(&self) -> Option<(Ipv4Address, Ipv4Address)> {
        if self.prefix_len >= 31 {
            None
        } else {
            Some((
                Ipv4Address(self.network().0 + 1),
                Ipv4Address(self.broadcast().0 - 1),
            ))
        }
    }

    /// Get first usable host, if any
    pub fn first_usable(&self) -> Option<Ipv4Address> {
        self.usable_range().map(|(first, _)| first)
    }

    /// Get last usable host, if any
    pub fn last_usable(&self) -> Option<Ipv4Address> {
        self.usable_range().map(|(_, last)| last)
    }

    /// Get number of usable hosts (0 for /31 and /32)
    pub fn host_count(&self) -> u64 {
        if self.prefix_len >= 31 {
            0
        } else {
            self.size() - 2
        }
    }

    /// Get total number of addresses in this CIDR block
    pub fn size(&self) -> u64 {
        1u64 << (MAX_PREFIX_LEN - self.prefix_len)
    }

    /// Check if an address is in this CIDR block
    pub fn contains(&self, addr: Ipv4Address) -> bool {
        (addr.0 & self.mask().0) == self.network().0
    }
}

impl FromStr for Cidr {
    type Err = IpCalcError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

fn parse_prefix(s: &str) -> Result<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IpCalcError::InvalidInput(format!(
            "prefix {:?} is not a decimal number",
            s
        )));
    }

    match s.parse::<u8>() {
        Ok(prefix_len) if prefix_len <= MAX_PREFIX_LEN => Ok(prefix_len),
        _ => Err(IpCalcError::InvalidInput(format!(
            "prefix length {} is out of range (must be 0-32)",
            s
        ))),
    }
}

fn prefix_out_of_range(prefix_len: u8) -> IpCalcError {
    IpCalcError::InvalidInput(format!(
        "prefix length {} is out of range (must be 0-32)",
        prefix_len
    ))
}
