//! Core types for ipcalc
//!
//! This crate provides the foundational types used throughout the ipcalc workspace:
//! - [`Ipv4Address`] - IPv4 address stored as a host-order `u32`
//! - [`AddressClass`] - Classful network class (A-E)
//! - [`IpCalcError`] - Error types
//!
//!
//! ```
//! use ipcalc_core::{AddressClass, Ipv4Address};
//!
//! let addr: Ipv4Address = "192.168.1.15".parse().unwrap();
//! assert_eq!(addr.class(), AddressClass::C);
//! assert!(addr.is_private());
//! ```

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

pub mod class;

pub use class::AddressClass;

/// IPv4 address
///
/// Stored as a 32-bit unsigned integer with the first octet in the most
/// significant byte, so plain integer comparison orders addresses.
/// Serializes as the dotted-decimal string.
///
/// # Examples
///
/// ```
/// use ipcalc_core::Ipv4Address;
///
/// let dns = Ipv4Address(0x08080808);
/// assert_eq!(dns.to_string(), "8.8.8.8");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ipv4Address(pub u32);

impl Ipv4Address {
    /// Get the four octets, most significant first
    pub fn octets(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Render as dot-separated 8-bit binary groups
    ///
    /// ```
    /// use ipcalc_core::Ipv4Address;
    ///
    /// let mask = Ipv4Address(0xFFFFFF00);
    /// assert_eq!(mask.to_binary_string(), "11111111.11111111.11111111.00000000");
    /// ```
    pub fn to_binary_string(&self) -> String {
        let [a, b, c, d] = self.octets();
        format!("{:08b}.{:08b}.{:08b}.{:08b}", a, b, c, d)
    }

    /// Classful network class, determined by the leading bits
    pub fn class(&self) -> AddressClass {
        AddressClass::of(*self)
    }

    /// Check if the address falls in an RFC 1918 private range
    pub fn is_private(&self) -> bool {
        class::is_private(*self)
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets();
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

impl FromStr for Ipv4Address {
    type Err = IpCalcError;

    fn from_str(s: &str) -> Result<Self> {
        let octets: Vec<&str> = s.split('.').collect();
        if octets.len() != 4 {
            return Err(IpCalcError::InvalidInput(format!(
                "expected 4 octets in {:?}, found {}",
                s,
                octets.len()
            )));
        }

        let mut result = 0u32;
        for (i, octet_str) in octets.iter().enumerate() {
            let octet = parse_octet(octet_str)?;
            result |= (octet as u32) << (24 - i * 8);
        }

        Ok(Ipv4Address(result))
    }
}

impl Serialize for Ipv4Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ipv4Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Parse one decimal octet, accepting ASCII digits only
fn parse_octet(s: &str) -> Result<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IpCalcError::InvalidInput(format!(
            "octet {:?} is not a decimal number",
            s
        )));
    }

    s.parse().map_err(|_| {
        IpCalcError::InvalidInput(format!("octet {} is out of range (must be 0-255)", s))
    })
}

impl From<u32> for Ipv4Address {
    fn from(value: u32) -> Self {
        Ipv4Address(value)
    }
}

impl From<Ipv4Addr> for Ipv4Address {
    fn from(value: Ipv4Addr) -> Self {
        Ipv4Address(u32::from(value))
    }
}

impl From<Ipv4Address> for Ipv4Addr {
    fn from(value: Ipv4Address) -> Self {
        Ipv4Addr::from(value.0)
    }
}

/// Error types for ipcalc operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IpCalcError {
    /// Malformed notation, octet or prefix length
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for ipcalc operations
pub type Result<T> = std::result::Result<T, IpCalcError>;
