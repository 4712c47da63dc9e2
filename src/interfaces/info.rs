//! Interface snapshot types.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::address::IPAddress;

/// Hardware address used until a link-layer record says otherwise.
pub const DEFAULT_HARDWARE_ADDRESS: [u8; 6] = [0; 6];

/// Interface type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceType {
    /// Wired Ethernet.
    Ethernet,
    /// Wireless (Wi-Fi).
    Wifi,
    /// Loopback (localhost).
    Loopback,
    /// Media present but of another kind.
    Other,
}

impl InterfaceType {
    /// Returns true if this is a loopback interface.
    #[must_use]
    pub const fn is_loopback(self) -> bool {
        matches!(self, Self::Loopback)
    }
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ethernet => write!(f, "ethernet"),
            Self::Wifi => write!(f, "wifi"),
            Self::Loopback => write!(f, "loopback"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// An address together with the prefix length of its subnet.
///
/// Displays as `address/prefix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IPSubnet {
    /// The assigned address.
    pub address: IPAddress,
    /// Number of leading one bits of the netmask.
    pub prefix_length: u8,
}

impl IPSubnet {
    /// Creates a subnet entry.
    #[must_use]
    pub const fn new(address: IPAddress, prefix_length: u8) -> Self {
        Self {
            address,
            prefix_length,
        }
    }
}

impl fmt::Display for IPSubnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_length)
    }
}

impl Serialize for IPSubnet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A network interface and the addresses assigned to it at enumeration time.
///
/// Addresses keep the order in which the operating system reported them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceInfo {
    /// OS interface index, 0 when unknown.
    pub index: u32,
    /// MAC address bytes.
    #[serde(serialize_with = "serialize_hardware_address")]
    pub hardware_address: Vec<u8>,
    /// Interface name as reported by the OS (e.g. `eth0`, `en0`).
    pub name: String,
    /// Interface classification.
    pub kind: InterfaceType,
    /// Assigned addresses with their prefix lengths.
    pub addresses: Vec<IPSubnet>,
}

impl InterfaceInfo {
    /// Creates an interface with no addresses and the all-zero hardware address.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: InterfaceType, index: u32) -> Self {
        Self {
            index,
            hardware_address: DEFAULT_HARDWARE_ADDRESS.to_vec(),
            name: name.into(),
            kind,
            addresses: Vec::new(),
        }
    }

    /// Returns the first IPv4 address, if any.
    #[must_use]
    pub fn ipv4_address(&self) -> Option<IPAddress> {
        self.addresses
            .iter()
            .map(|subnet| subnet.address)
            .find(IPAddress::is_v4)
    }

    /// Returns the first IPv6 address, if any.
    #[must_use]
    pub fn ipv6_address(&self) -> Option<IPAddress> {
        self.addresses
            .iter()
            .map(|subnet| subnet.address)
            .find(IPAddress::is_v6)
    }

    /// Formats the hardware address as colon-separated hex (`aa:bb:cc:dd:ee:ff`).
    #[must_use]
    pub fn hardware_address_string(&self) -> String {
        format_hardware_address(&self.hardware_address)
    }
}

/// Finds an interface by exact name in a snapshot.
#[must_use]
pub fn find_by_name<'a>(interfaces: &'a [InterfaceInfo], name: &str) -> Option<&'a InterfaceInfo> {
    interfaces.iter().find(|info| info.name == name)
}

fn format_hardware_address(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

fn serialize_hardware_address<S: Serializer>(
    bytes: &[u8],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_hardware_address(bytes))
}
