//! Grouping OS address records into interface snapshots.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use super::info::{IPSubnet, InterfaceInfo, InterfaceType};
use super::prefix::prefix_length;
use super::source::{
    AddressRecord, EnumerateError, InterfaceSource, MediaKind, RecordAddress, RecordFlags,
};

/// Where a name seen in the listing ended up.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Kept(usize),
    Dropped,
}

/// Builds a snapshot of the usable interfaces reported by `source`.
///
/// Records of interfaces that are down or carry no address are skipped.
/// Each remaining name is classified once, on first sighting: an interface
/// with media information must be valid and active, and one without it is
/// kept only if it is a loopback interface. Interfaces appear in the order
/// they were first seen.
///
/// Deprecated IPv6 addresses, and IPv6 addresses whose status cannot be
/// queried, are left out. An address whose netmask is not contiguous is
/// logged and left out. A missing netmask, or one of the other address
/// family, gives a prefix length of 0.
///
/// # Errors
///
/// Returns [`EnumerateError`] only when the bulk listing itself fails.
pub fn collect_interfaces<S>(source: &S) -> Result<Vec<InterfaceInfo>, EnumerateError>
where
    S: InterfaceSource + ?Sized,
{
    let records = source.address_records()?;
    debug!(records = records.len(), "Listed interface address records");

    let mut interfaces: Vec<InterfaceInfo> = Vec::new();
    let mut slots: HashMap<String, Slot> = HashMap::new();

    for AddressRecord {
        name,
        flags,
        address,
        netmask,
    } in records
    {
        if !flags.up {
            continue;
        }
        let Some(address) = address else {
            continue;
        };

        let slot = match slots.get(&name) {
            Some(slot) => *slot,
            None => {
                let slot = classify(source, &name, flags).map_or(Slot::Dropped, |kind| {
                    let index = source.interface_index(&name).unwrap_or(0);
                    interfaces.push(InterfaceInfo::new(name.clone(), kind, index));
                    Slot::Kept(interfaces.len() - 1)
                });
                slots.insert(name, slot);
                slot
            }
        };

        if let Slot::Kept(position) = slot {
            add_address(source, &mut interfaces[position], address, netmask.as_ref());
        }
    }

    Ok(interfaces)
}

fn classify<S>(source: &S, name: &str, flags: RecordFlags) -> Option<InterfaceType>
where
    S: InterfaceSource + ?Sized,
{
    match source.media_status(name) {
        Some(media) if media.valid && media.active => {
            let kind = match media.kind {
                MediaKind::Ethernet => InterfaceType::Ethernet,
                MediaKind::Wifi => InterfaceType::Wifi,
                MediaKind::Other => InterfaceType::Other,
            };
            debug!(interface = name, %kind, "Classified interface");
            Some(kind)
        }
        Some(media) => {
            debug!(interface = name, ?media, "Dropping interface without active media");
            None
        }
        None if flags.loopback => {
            debug!(interface = name, "Classified loopback interface");
            Some(InterfaceType::Loopback)
        }
        None => {
            debug!(interface = name, "Dropping interface without media information");
            None
        }
    }
}

fn add_address<S>(
    source: &S,
    info: &mut InterfaceInfo,
    address: RecordAddress,
    netmask: Option<&RecordAddress>,
) where
    S: InterfaceSource + ?Sized,
{
    let native = match address {
        RecordAddress::Link(bytes) => {
            info.hardware_address = bytes;
            return;
        }
        RecordAddress::Other(family) => {
            trace!(interface = %info.name, family, "Ignoring address of other family");
            return;
        }
        RecordAddress::Inet(native) => native,
    };

    let ip = native.address();
    if ip.is_v6() {
        match source.is_deprecated(&info.name, &ip) {
            Some(false) => {}
            Some(true) => {
                debug!(interface = %info.name, address = %ip, "Skipping deprecated address");
                return;
            }
            None => {
                debug!(interface = %info.name, address = %ip, "Skipping address with unknown status");
                return;
            }
        }
    }

    // A mask of the other family says nothing about this address
    let mask = match netmask {
        Some(RecordAddress::Inet(mask)) if mask.version() == ip.version() => {
            mask.address().bytes().to_vec()
        }
        Some(RecordAddress::Inet(mask)) => {
            debug!(interface = %info.name, address = %ip, mask_version = %mask.version(), "Ignoring netmask of other family");
            Vec::new()
        }
        _ => Vec::new(),
    };

    match prefix_length(&mask) {
        Ok(length) => info.addresses.push(IPSubnet::new(ip, length)),
        Err(error) => {
            warn!(interface = %info.name, address = %ip, %error, "Skipping address with invalid netmask");
        }
    }
}
