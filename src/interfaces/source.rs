//! The operating-system collaborator behind interface enumeration.

use thiserror::Error;

use crate::address::IPAddress;
use crate::platform::SocketAddress;

/// Error type for interface enumeration.
///
/// Only the bulk listing can fail the whole enumeration; per-interface and
/// per-address queries degrade to "unknown" instead.
#[derive(Debug, Error)]
pub enum EnumerateError {
    /// The OS call listing interface addresses failed.
    #[error("Failed to list interface addresses: {0}")]
    Io(#[from] std::io::Error),

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// Interface flags carried by each address record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordFlags {
    /// The interface is administratively up.
    pub up: bool,
    /// The interface is a loopback interface.
    pub loopback: bool,
}

/// An address of some family attached to an [`AddressRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordAddress {
    /// Link-layer (hardware) address bytes.
    Link(Vec<u8>),
    /// IPv4 or IPv6 socket address.
    Inet(SocketAddress),
    /// Any other family, kept only for logging.
    Other(i32),
}

/// One entry of the OS bulk listing: an interface name with one address.
///
/// An interface appears once per address assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    /// Interface name.
    pub name: String,
    /// Interface flags.
    pub flags: RecordFlags,
    /// The address, absent for interfaces listed without one.
    pub address: Option<RecordAddress>,
    /// The netmask matching `address`, when the OS supplies one.
    pub netmask: Option<RecordAddress>,
}

impl AddressRecord {
    /// Creates a record for an up, non-loopback interface.
    #[must_use]
    pub fn new(name: impl Into<String>, address: Option<RecordAddress>) -> Self {
        Self {
            name: name.into(),
            flags: RecordFlags {
                up: true,
                loopback: false,
            },
            address,
            netmask: None,
        }
    }

    /// Sets the netmask (builder pattern).
    #[must_use]
    pub fn with_netmask(mut self, netmask: RecordAddress) -> Self {
        self.netmask = Some(netmask);
        self
    }

    /// Sets the flags (builder pattern).
    #[must_use]
    pub const fn with_flags(mut self, flags: RecordFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Media type reported by a media query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Wired Ethernet.
    Ethernet,
    /// IEEE 802.11.
    Wifi,
    /// Anything else.
    Other,
}

/// Result of a media query on an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaStatus {
    /// Media type.
    pub kind: MediaKind,
    /// The OS reported a meaningful media status.
    pub valid: bool,
    /// Link is active (carrier present).
    pub active: bool,
}

/// Trait for the OS queries interface enumeration is built on.
///
/// # Design
///
/// - Platform implementations live in [`platform`](super::platform)
/// - Enables dependency injection for testing with mock implementations
/// - Every query except [`address_records`](Self::address_records) is
///   allowed to fail by returning `None`
pub trait InterfaceSource {
    /// Lists every (interface, address) pair known to the OS.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerateError`] when the OS listing call fails.
    fn address_records(&self) -> Result<Vec<AddressRecord>, EnumerateError>;

    /// Queries the media of an interface. `None` means media information is
    /// unavailable for it.
    fn media_status(&self, name: &str) -> Option<MediaStatus>;

    /// Reports whether an IPv6 address is deprecated. `None` means the query
    /// failed.
    fn is_deprecated(&self, name: &str, address: &IPAddress) -> Option<bool>;

    /// Looks up the OS interface index.
    fn interface_index(&self, name: &str) -> Option<u32>;
}

impl<T: InterfaceSource + ?Sized> InterfaceSource for &T {
    fn address_records(&self) -> Result<Vec<AddressRecord>, EnumerateError> {
        (*self).address_records()
    }

    fn media_status(&self, name: &str) -> Option<MediaStatus> {
        (*self).media_status(name)
    }

    fn is_deprecated(&self, name: &str, address: &IPAddress) -> Option<bool> {
        (*self).is_deprecated(name, address)
    }

    fn interface_index(&self, name: &str) -> Option<u32> {
        (*self).interface_index(name)
    }
}
