//! Local network interface enumeration.
//!
//! This module provides types and traits for:
//! - Interface snapshots ([`InterfaceInfo`], [`IPSubnet`], [`InterfaceType`])
//! - The OS collaborator enumeration runs on (`InterfaceSource`, Unix only)
//! - Grouping address records into snapshots (`collect_interfaces`, Unix only)
//! - Netmask conversion ([`prefix_length`])
//! - Picking one interface out of a snapshot ([`find_by_name`])
//! - Platform-specific sources (`platform`, Unix only)

#[cfg(unix)]
mod enumerate;
mod info;
#[cfg(unix)]
pub mod platform;
mod prefix;
#[cfg(unix)]
mod source;


#[cfg(unix)]
pub use enumerate::collect_interfaces;
pub use info::{DEFAULT_HARDWARE_ADDRESS, IPSubnet, InterfaceInfo, InterfaceType, find_by_name};
pub use prefix::{NetmaskError, prefix_length};
#[cfg(unix)]
pub use source::{
    AddressRecord, EnumerateError, InterfaceSource, MediaKind, MediaStatus, RecordAddress,
    RecordFlags,
};

/// Lists the usable interfaces of this machine.
///
/// # Errors
///
/// Returns [`EnumerateError`] when the OS listing call fails.
#[cfg(target_os = "linux")]
pub fn get_network_interfaces() -> Result<Vec<InterfaceInfo>, EnumerateError> {
    collect_interfaces(&platform::PlatformInterfaces::new())
}
