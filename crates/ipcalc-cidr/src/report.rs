//! Display-ready subnet report
//!
//! Every computed field of a [`Cidr`] rendered as strings, in the fixed order
//! the CLI prints them. Serializes directly to JSON or a CSV row.

use crate::Cidr;
use serde::{Deserialize, Serialize};

/// Rendered subnet calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetReport {
    /// Address as entered, dotted-decimal
    pub address: String,
    /// Prefix length
    pub prefix_len: u8,
    /// Network address
    pub network: String,
    /// Broadcast address
    pub broadcast: String,
    /// Subnet mask, dotted-decimal
    pub mask: String,
    /// Subnet mask, dotted binary
    pub binary_mask: String,
    /// Wildcard mask, dotted-decimal
    pub wildcard: String,
    /// First usable host (absent for /31 and /32)
    pub first_usable: Option<String>,
    /// Last usable host (absent for /31 and /32)
    pub last_usable: Option<String>,
    /// Number of usable hosts
    pub host_count: u64,
    /// Class letter
    pub class: String,
    /// RFC 1918 private flag
    pub private: bool,
}

impl SubnetReport {
    /// Build a report from a parsed CIDR block
    pub fn from_cidr(cidr: &Cidr) -> Self {
        let address = cidr.address();
        let mask = cidr.mask();

        Self {
            address: address.to_string(),
            prefix_len: cidr.prefix_len(),
            network: cidr.network().to_string(),
            broadcast: cidr.broadcast().to_string(),
            mask: mask.to_string(),
            binary_mask: mask.to_binary_string(),
            wildcard: cidr.wildcard().to_string(),
            first_usable: cidr.first_usable().map(|ip| ip.to_string()),
            last_usable: cidr.last_usable().map(|ip| ip.to_string()),
            host_count: cidr.host_count(),
            class: address.class().to_string(),
            private: address.is_private(),
        }
    }
}

impl From<&Cidr> for SubnetReport {
    fn from(cidr: &Cidr) -> Self {
        Self::from_cidr(cidr)
    }
}
