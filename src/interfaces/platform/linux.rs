//! Linux interface source: `getifaddrs(3)` for addresses, sysfs for media and
//! procfs for IPv6 address state.

use std::ffi::CStr;
use std::fs;
use std::io;
use std::iter;
use std::path::{Path, PathBuf};
use std::ptr;

use crate::address::{IPAddress, ScopeResolver, SystemScopeResolver};
use crate::interfaces::{
    AddressRecord, EnumerateError, InterfaceSource, MediaKind, MediaStatus, RecordAddress,
    RecordFlags,
};
use crate::platform::SocketAddress;

/// Default sysfs directory holding one entry per network interface.
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/net";

/// Default procfs directory holding `if_inet6`.
pub const DEFAULT_PROCFS_ROOT: &str = "/proc/net";

/// `ARPHRD_ETHER` from `<linux/if_arp.h>`; Wi-Fi devices report it too.
const ARPHRD_ETHER: u32 = 1;

/// `IFA_F_DEPRECATED` from `<linux/if_addr.h>`.
const IFA_F_DEPRECATED: u32 = 0x20;

/// Linux implementation of [`InterfaceSource`].
///
/// # Example
///
/// ```no_run
/// use cast_addr::interfaces::collect_interfaces;
/// use cast_addr::interfaces::platform::LinuxInterfaces;
///
/// let interfaces = collect_interfaces(&LinuxInterfaces::new()).expect("Failed to list interfaces");
///
/// for info in interfaces {
///     println!("{} ({}): {:?}", info.name, info.kind, info.addresses);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct LinuxInterfaces {
    sysfs_root: PathBuf,
    procfs_root: PathBuf,
}

impl Default for LinuxInterfaces {
    fn default() -> Self {
        Self::new()
    }
}

impl LinuxInterfaces {
    /// Creates a source reading the live system.
    #[must_use]
    pub fn new() -> Self {
        Self::with_roots(DEFAULT_SYSFS_ROOT, DEFAULT_PROCFS_ROOT)
    }

    /// Creates a source reading media and address state from other
    /// directories. Address records still come from the live system.
    #[must_use]
    pub fn with_roots(sysfs_root: impl Into<PathBuf>, procfs_root: impl Into<PathBuf>) -> Self {
        Self {
            sysfs_root: sysfs_root.into(),
            procfs_root: procfs_root.into(),
        }
    }

    /// Returns the sysfs root in use.
    #[must_use]
    pub fn sysfs_root(&self) -> &Path {
        &self.sysfs_root
    }

    /// Returns the procfs root in use.
    #[must_use]
    pub fn procfs_root(&self) -> &Path {
        &self.procfs_root
    }
}

impl InterfaceSource for LinuxInterfaces {
    fn address_records(&self) -> Result<Vec<AddressRecord>, EnumerateError> {
        let list = IfAddrs::new()?;
        Ok(list.iter().map(to_record).collect())
    }

    fn media_status(&self, name: &str) -> Option<MediaStatus> {
        let dir = self.sysfs_root.join(device_name(name));
        let link_type: u32 = fs::read_to_string(dir.join("type"))
            .ok()?
            .trim()
            .parse()
            .ok()?;
        if link_type != ARPHRD_ETHER {
            return None;
        }

        let wireless = dir.join("wireless").exists() || dir.join("phy80211").exists();
        let active = fs::read_to_string(dir.join("operstate"))
            .is_ok_and(|state| state.trim() == "up");

        Some(MediaStatus {
            kind: if wireless {
                MediaKind::Wifi
            } else {
                MediaKind::Ethernet
            },
            valid: true,
            active,
        })
    }

    fn is_deprecated(&self, name: &str, address: &IPAddress) -> Option<bool> {
        let table = fs::read_to_string(self.procfs_root.join("if_inet6")).ok()?;
        let flags = find_inet6_flags(&table, name, address)?;
        Some(flags & IFA_F_DEPRECATED != 0)
    }

    fn interface_index(&self, name: &str) -> Option<u32> {
        SystemScopeResolver.name_to_index(device_name(name))
    }
}

/// Strips the label of an IPv4 alias (`eth0:1` -> `eth0`).
///
/// `getifaddrs` reports alias addresses under their label, while sysfs and
/// the index table only know the device.
fn device_name(name: &str) -> &str {
    name.split_once(':').map_or(name, |(device, _)| device)
}

/// Looks up the flags column of `/proc/net/if_inet6` for one address.
///
/// Each line holds the address as 32 hex digits, then the interface index,
/// prefix length, scope and flags in hex, then the interface name.
fn find_inet6_flags(table: &str, name: &str, address: &IPAddress) -> Option<u32> {
    table.lines().find_map(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [hex, _index, _prefix, _scope, flags, line_name] = fields.as_slice() else {
            return None;
        };
        if *line_name != name || decode_hex_address(hex)? != address.bytes() {
            return None;
        }
        u32::from_str_radix(flags, 16).ok()
    })
}

fn decode_hex_address(hex: &str) -> Option<[u8; 16]> {
    if hex.len() != 32 || !hex.is_ascii() {
        return None;
    }
    let mut bytes = [0u8; 16];
    for (byte, pair) in bytes.iter_mut().zip(hex.as_bytes().chunks_exact(2)) {
        let pair = std::str::from_utf8(pair).ok()?;
        *byte = u8::from_str_radix(pair, 16).ok()?;
    }
    Some(bytes)
}

/// Owned `getifaddrs` list, freed on drop.
struct IfAddrs(*mut libc::ifaddrs);

impl IfAddrs {
    fn new() -> io::Result<Self> {
        let mut head: *mut libc::ifaddrs = ptr::null_mut();
        // SAFETY: getifaddrs writes a list head that we own until freeifaddrs.
        if unsafe { libc::getifaddrs(&raw mut head) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(Self(head))
    }

    fn iter(&self) -> impl Iterator<Item = &libc::ifaddrs> {
        // SAFETY: each node and its `ifa_next` link stay valid while `self` is alive.
        iter::successors(unsafe { self.0.as_ref() }, |entry| unsafe {
            entry.ifa_next.as_ref()
        })
    }
}

impl Drop for IfAddrs {
    fn drop(&mut self) {
        if !self.0.is_null() {
            // SAFETY: the pointer came from a successful getifaddrs and is freed once.
            unsafe { libc::freeifaddrs(self.0) };
        }
    }
}

fn to_record(entry: &libc::ifaddrs) -> AddressRecord {
    let name = if entry.ifa_name.is_null() {
        String::new()
    } else {
        // SAFETY: getifaddrs stores NUL-terminated interface names.
        unsafe { CStr::from_ptr(entry.ifa_name) }
            .to_string_lossy()
            .into_owned()
    };

    let flags = RecordFlags {
        up: entry.ifa_flags & libc::IFF_UP.unsigned_abs() != 0,
        loopback: entry.ifa_flags & libc::IFF_LOOPBACK.unsigned_abs() != 0,
    };

    AddressRecord {
        name,
        flags,
        // SAFETY: getifaddrs pointers are null or point to storage sized for their family.
        address: unsafe { decode_address(entry.ifa_addr) },
        // SAFETY: as above.
        netmask: unsafe { decode_address(entry.ifa_netmask) },
    }
}

/// # Safety
///
/// `address` must be null or point to a socket address whose storage is
/// sized for its family.
unsafe fn decode_address(address: *const libc::sockaddr) -> Option<RecordAddress> {
    if address.is_null() {
        return None;
    }
    // SAFETY: non-null and readable per the function contract.
    let family = i32::from(unsafe { (*address).sa_family });
    match family {
        libc::AF_PACKET => {
            // SAFETY: AF_PACKET entries are stored as sockaddr_ll.
            let link: libc::sockaddr_ll = unsafe { ptr::read_unaligned(address.cast()) };
            let len = usize::from(link.sll_halen).min(link.sll_addr.len());
            Some(RecordAddress::Link(link.sll_addr[..len].to_vec()))
        }
        // SAFETY: the family says the storage is sockaddr_in / sockaddr_in6.
        libc::AF_INET | libc::AF_INET6 => unsafe { SocketAddress::from_ptr(address) }
            .ok()
            .map(RecordAddress::Inet),
        other => Some(RecordAddress::Other(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IF_INET6: &str = "\
00000000000000000000000000000001 01 80 10 80       lo
fe80000000000000021a2bfffe3c4d5e 02 40 20 80     eth0
20010db8000000000000000000000001 02 40 00 a0     eth0
20010db8000000000000000000000002 02 40 00 00     eth0
";

    fn ip(text: &str) -> IPAddress {
        text.parse().unwrap()
    }

    mod inet6_table {
        use super::*;

        #[test]
        fn finds_flags_by_name_and_address() {
            assert_eq!(find_inet6_flags(IF_INET6, "lo", &ip("::1")), Some(0x80));
            assert_eq!(
                find_inet6_flags(IF_INET6, "eth0", &ip("2001:db8::1")),
                Some(0xa0)
            );
        }

        #[test]
        fn name_must_match() {
            assert_eq!(find_inet6_flags(IF_INET6, "eth1", &ip("2001:db8::1")), None);
        }

        #[test]
        fn unknown_address_is_none() {
            assert_eq!(find_inet6_flags(IF_INET6, "eth0", &ip("2001:db8::9")), None);
        }

        #[test]
        fn malformed_lines_are_skipped() {
            let table = "garbage\nzz 01 80 10 80 lo\n00000000000000000000000000000001 01 80 10 80 lo\n";
            assert_eq!(find_inet6_flags(table, "lo", &ip("::1")), Some(0x80));
        }

        #[test]
        fn alias_label_is_stripped() {
            assert_eq!(device_name("eth0:1"), "eth0");
            assert_eq!(device_name("eth0:backup"), "eth0");
            assert_eq!(device_name("wlan0"), "wlan0");
        }

        #[test]
        fn decodes_hex_address() {
            let bytes = decode_hex_address("fe80000000000000021a2bfffe3c4d5e").unwrap();
            assert_eq!(bytes[0], 0xfe);
            assert_eq!(bytes[15], 0x5e);
            assert!(decode_hex_address("fe80").is_none());
            assert!(decode_hex_address("gg80000000000000021a2bfffe3c4d5e").is_none());
        }
    }

    mod fixtures {
        use super::*;
        use tempfile::TempDir;

        fn write_link(root: &Path, name: &str, link_type: &str, operstate: &str) -> PathBuf {
            let dir = root.join(name);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("type"), format!("{link_type}\n")).unwrap();
            fs::write(dir.join("operstate"), format!("{operstate}\n")).unwrap();
            dir
        }

        fn source(sysfs: &TempDir, procfs: &TempDir) -> LinuxInterfaces {
            LinuxInterfaces::with_roots(sysfs.path(), procfs.path())
        }

        #[test]
        fn ethernet_up_is_active() {
            let (sysfs, procfs) = (TempDir::new().unwrap(), TempDir::new().unwrap());
            write_link(sysfs.path(), "eth0", "1", "up");

            assert_eq!(
                source(&sysfs, &procfs).media_status("eth0"),
                Some(MediaStatus {
                    kind: MediaKind::Ethernet,
                    valid: true,
                    active: true,
                })
            );
        }

        #[test]
        fn ethernet_down_is_inactive() {
            let (sysfs, procfs) = (TempDir::new().unwrap(), TempDir::new().unwrap());
            write_link(sysfs.path(), "eth0", "1", "down");

            let media = source(&sysfs, &procfs).media_status("eth0").unwrap();
            assert!(media.valid);
            assert!(!media.active);
        }

        #[test]
        fn wireless_directory_means_wifi() {
            let (sysfs, procfs) = (TempDir::new().unwrap(), TempDir::new().unwrap());
            let dir = write_link(sysfs.path(), "wlan0", "1", "up");
            fs::create_dir(dir.join("wireless")).unwrap();
            let dir = write_link(sysfs.path(), "wlan1", "1", "up");
            fs::create_dir(dir.join("phy80211")).unwrap();

            let source = source(&sysfs, &procfs);
            assert_eq!(source.media_status("wlan0").unwrap().kind, MediaKind::Wifi);
            assert_eq!(source.media_status("wlan1").unwrap().kind, MediaKind::Wifi);
        }

        #[test]
        fn alias_label_uses_device_media() {
            let (sysfs, procfs) = (TempDir::new().unwrap(), TempDir::new().unwrap());
            write_link(sysfs.path(), "eth0", "1", "up");

            let media = source(&sysfs, &procfs).media_status("eth0:1").unwrap();
            assert_eq!(media.kind, MediaKind::Ethernet);
            assert!(media.active);
        }

        #[test]
        fn non_ethernet_link_has_no_media() {
            let (sysfs, procfs) = (TempDir::new().unwrap(), TempDir::new().unwrap());
            write_link(sysfs.path(), "lo", "772", "unknown");
            write_link(sysfs.path(), "tun0", "65534", "unknown");

            let source = source(&sysfs, &procfs);
            assert_eq!(source.media_status("lo"), None);
            assert_eq!(source.media_status("tun0"), None);
            assert_eq!(source.media_status("missing0"), None);
        }

        #[test]
        fn deprecation_from_if_inet6() {
            let (sysfs, procfs) = (TempDir::new().unwrap(), TempDir::new().unwrap());
            fs::write(procfs.path().join("if_inet6"), IF_INET6).unwrap();

            let source = source(&sysfs, &procfs);
            assert_eq!(source.is_deprecated("eth0", &ip("2001:db8::1")), Some(true));
            assert_eq!(source.is_deprecated("eth0", &ip("2001:db8::2")), Some(false));
            assert_eq!(source.is_deprecated("eth0", &ip("2001:db8::9")), None);
        }

        #[test]
        fn missing_if_inet6_is_unknown() {
            let (sysfs, procfs) = (TempDir::new().unwrap(), TempDir::new().unwrap());
            assert_eq!(
                source(&sysfs, &procfs).is_deprecated("lo", &ip("::1")),
                None
            );
        }
    }

    mod live {
        use super::*;
        use crate::interfaces::{InterfaceType, collect_interfaces, find_by_name};

        #[test]
        fn lists_address_records() {
            let records = LinuxInterfaces::new().address_records().unwrap();
            assert!(records.iter().all(|record| !record.name.is_empty()));
        }

        #[test]
        fn loopback_is_classified_as_loopback() {
            let interfaces = collect_interfaces(&LinuxInterfaces::new()).unwrap();
            if let Some(lo) = find_by_name(&interfaces, "lo") {
                assert_eq!(lo.kind, InterfaceType::Loopback);
                assert!(
                    lo.addresses
                        .iter()
                        .all(|subnet| subnet.address.is_v6() || subnet.prefix_length == 8)
                );
            }
        }
    }
}
