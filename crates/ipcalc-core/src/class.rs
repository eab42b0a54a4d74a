//! Address classification
//!
//! Classful network classes are decided purely by the leading bits of the
//! address; the prefix length plays no part.

use crate::Ipv4Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// RFC 1918 private ranges as (network, mask) pairs
const PRIVATE_RANGES: [(u32, u32); 3] = [
    (0x0A00_0000, 0xFF00_0000), // 10.0.0.0/8
    (0xAC10_0000, 0xFFF0_0000), // 172.16.0.0/12
    (0xC0A8_0000, 0xFFFF_0000), // 192.168.0.0/16
];

/// Classful network class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressClass {
    /// Leading bit 0 (0.0.0.0 - 127.255.255.255)
    A,
    /// Leading bits 10 (128.0.0.0 - 191.255.255.255)
    B,
    /// Leading bits 110 (192.0.0.0 - 223.255.255.255)
    C,
    /// Leading bits 1110, multicast (224.0.0.0 - 239.255.255.255)
    D,
    /// Leading bits 1111, reserved (240.0.0.0 - 255.255.255.255)
    E,
}

impl AddressClass {
    /// Classify an address by its leading bits
    pub fn of(addr: Ipv4Address) -> Self {
        match addr.0.leading_ones() {
            0 => AddressClass::A,
            1 => AddressClass::B,
            2 => AddressClass::C,
            3 => AddressClass::D,
            _ => AddressClass::E,
        }
    }

    /// Class letter
    pub fn letter(&self) -> char {
        match self {
            AddressClass::A => 'A',
            AddressClass::B => 'B',
            AddressClass::C => 'C',
            AddressClass::D => 'D',
            AddressClass::E => 'E',
        }
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Check membership in 10.0.0.0/8, 172.16.0.0/12 or 192.168.0.0/16
pub fn is_private(addr: Ipv4Address) -> bool {
    PRIVATE_RANGES
        .iter()
        .any(|&(network, mask)| addr.0 & mask == network)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Ipv4Address {
        s.parse().unwrap()
    }

    #[test]
    fn test_class_boundaries() {
        assert_eq!(addr("0.0.0.0").class(), AddressClass::A);
        assert_eq!(addr("127.255.255.255").class(), AddressClass::A);
        assert_eq!(addr("128.0.0.0").class(), AddressClass::B);
        assert_eq!(addr("191.255.255.255").class(), AddressClass::B);
        assert_eq!(addr("192.0.0.0").class(), AddressClass::C);
        assert_eq!(addr("223.255.255.255").class(), AddressClass::C);
        assert_eq!(addr("224.0.0.0").class(), AddressClass::D);
        assert_eq!(addr("239.255.255.255").class(), AddressClass::D);
        assert_eq!(addr("240.0.0.0").class(), AddressClass::E);
        assert_eq!(addr("255.255.255.255").class(), AddressClass::E);
    }

    #[test]
    fn test_class_display() {
        assert_eq!(AddressClass::A.to_string(), "A");
        assert_eq!(AddressClass::E.to_string(), "E");
    }

    #[test]
    fn test_private_ranges() {
        assert!(addr("10.0.0.0").is_private());
        assert!(addr("10.255.255.255").is_private());
        assert!(addr("172.16.0.0").is_private());
        assert!(addr("172.31.255.255").is_private());
        assert!(addr("192.168.0.0").is_private());
        assert!(addr("192.168.255.255").is_private());
    }

    #[test]
    fn test_public_addresses() {
        assert!(!addr("9.255.255.255").is_private());
        assert!(!addr("11.0.0.0").is_private());
        assert!(!addr("172.15.255.255").is_private());
        assert!(!addr("172.32.0.0").is_private());
        assert!(!addr("192.167.255.255").is_private());
        assert!(!addr("192.169.0.0").is_private());
        assert!(!addr("91.124.230.205").is_private());
    }

    #[test]
    fn test_class_serialization() {
        let json = serde_json::to_string(&AddressClass::C).expect("serialization failed");
        assert_eq!(json, "\"C\"");
    }
}
