//! The [`IPAddress`] value type: construction, parsing, ordering and text form.

use std::fmt::{self, Write as _};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::AddressError;
use super::scope::{ScopeResolver, SystemScopeResolver};

/// IP protocol version of an [`IPAddress`].
///
/// Ordered so that IPv4 sorts before IPv6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Version {
    /// IPv4, 4 address bytes.
    V4,
    /// IPv6, 16 address bytes.
    V6,
}

impl Version {
    /// Number of address bytes for this version.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Self::V4 => IPAddress::V4_SIZE,
            Self::V6 => IPAddress::V6_SIZE,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// Storage for the two address shapes.
///
/// Field order matters: the derived ordering compares the variant first,
/// then the bytes, then the scope id.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Repr {
    V4([u8; 4]),
    V6 { bytes: [u8; 16], scope_id: u32 },
}

/// An IPv4 or IPv6 address, with an optional scope id for IPv6 link-local addresses.
///
/// # Invariants
///
/// - Equality and ordering look only at the bytes of the address's own version.
/// - Every IPv4 address sorts before every IPv6 address; within a version,
///   bytes compare as a big-endian unsigned integer; IPv6 ties are broken by
///   scope id.
/// - Only link-local IPv6 addresses (`fe80::/10`) carry a non-zero scope id.
///
/// # Examples
///
/// ```
/// use cast_addr::address::IPAddress;
///
/// let address: IPAddress = "abcd::10fe:dbca".parse().unwrap();
/// assert_eq!(
///     address.to_string(),
///     "abcd:0000:0000:0000:0000:0000:10fe:dbca"
/// );
/// assert!(IPAddress::new_v4(192, 168, 0, 1) < address);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IPAddress(Repr);

impl Default for IPAddress {
    fn default() -> Self {
        Self::ANY_V4
    }
}

impl IPAddress {
    /// Byte length of an IPv4 address.
    pub const V4_SIZE: usize = 4;
    /// Byte length of an IPv6 address.
    pub const V6_SIZE: usize = 16;

    /// `0.0.0.0`
    pub const ANY_V4: Self = Self::new_v4(0, 0, 0, 0);
    /// `::`
    pub const ANY_V6: Self = Self::from_hextets([0; 8]);
    /// `127.0.0.1`
    pub const V4_LOOPBACK: Self = Self::new_v4(127, 0, 0, 1);
    /// `::1`
    pub const V6_LOOPBACK: Self = Self::from_hextets([0, 0, 0, 0, 0, 0, 0, 1]);

    /// Creates an IPv4 address from its four octets.
    #[must_use]
    pub const fn new_v4(b1: u8, b2: u8, b3: u8, b4: u8) -> Self {
        Self(Repr::V4([b1, b2, b3, b4]))
    }

    /// Creates an IPv4 address from an octet array.
    #[must_use]
    pub const fn from_octets(octets: [u8; 4]) -> Self {
        Self(Repr::V4(octets))
    }

    /// Creates an IPv6 address from eight host-order hextets.
    #[must_use]
    pub const fn from_hextets(hextets: [u16; 8]) -> Self {
        let mut bytes = [0u8; 16];
        let mut i = 0;
        while i < 8 {
            let [high, low] = hextets[i].to_be_bytes();
            bytes[2 * i] = high;
            bytes[2 * i + 1] = low;
            i += 1;
        }
        Self::from_v6_bytes(bytes)
    }

    /// Creates an IPv6 address from its sixteen bytes, without a scope id.
    #[must_use]
    pub const fn from_v6_bytes(bytes: [u8; 16]) -> Self {
        Self(Repr::V6 { bytes, scope_id: 0 })
    }

    /// Creates an IPv6 address carrying a scope id.
    ///
    /// The scope id is kept only when the address is link-local; for any
    /// other address it is dropped.
    #[must_use]
    pub const fn from_v6_bytes_scoped(bytes: [u8; 16], scope_id: u32) -> Self {
        let scope_id = if is_link_local_bytes(&bytes) { scope_id } else { 0 };
        Self(Repr::V6 { bytes, scope_id })
    }

    /// Creates an address of `version` from the leading bytes of `bytes`.
    ///
    /// Bytes beyond the version's size are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::TooShort`] if `bytes` has fewer bytes than the version needs.
    pub fn from_slice(version: Version, bytes: &[u8]) -> Result<Self, AddressError> {
        let too_short = || AddressError::TooShort {
            version,
            expected: version.size(),
            actual: bytes.len(),
        };
        match version {
            Version::V4 => bytes
                .get(..Self::V4_SIZE)
                .and_then(|b| <[u8; 4]>::try_from(b).ok())
                .map(Self::from_octets)
                .ok_or_else(too_short),
            Version::V6 => bytes
                .get(..Self::V6_SIZE)
                .and_then(|b| <[u8; 16]>::try_from(b).ok())
                .map(Self::from_v6_bytes)
                .ok_or_else(too_short),
        }
    }

    /// Returns the IP version.
    #[must_use]
    pub const fn version(&self) -> Version {
        match self.0 {
            Repr::V4(_) => Version::V4,
            Repr::V6 { .. } => Version::V6,
        }
    }

    /// Returns true for IPv4 addresses.
    #[must_use]
    pub const fn is_v4(&self) -> bool {
        matches!(self.0, Repr::V4(_))
    }

    /// Returns true for IPv6 addresses.
    #[must_use]
    pub const fn is_v6(&self) -> bool {
        matches!(self.0, Repr::V6 { .. })
    }

    /// Number of meaningful address bytes: 4 or 16.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.version().size()
    }

    /// The address bytes in network order, exactly [`size`](Self::size) long.
    #[must_use]
    pub const fn bytes(&self) -> &[u8] {
        match &self.0 {
            Repr::V4(bytes) => bytes,
            Repr::V6 { bytes, .. } => bytes,
        }
    }

    /// Scope id of a link-local IPv6 address; 0 for every other address.
    #[must_use]
    pub const fn scope_id(&self) -> u32 {
        match self.0 {
            Repr::V4(_) => 0,
            Repr::V6 { scope_id, .. } => scope_id,
        }
    }

    /// Returns true if this is an IPv6 link-local address (`fe80::/10`).
    #[must_use]
    pub const fn is_link_local(&self) -> bool {
        match &self.0 {
            Repr::V4(_) => false,
            Repr::V6 { bytes, .. } => is_link_local_bytes(bytes),
        }
    }

    /// Returns true if every address byte is zero (`0.0.0.0` or `::`).
    #[must_use]
    pub fn is_unspecified(&self) -> bool {
        self.bytes().iter().all(|&b| b == 0)
    }

    /// Copies the address bytes into the front of `out`.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::TooShort`] if `out` cannot hold [`size`](Self::size) bytes.
    pub fn copy_to(&self, out: &mut [u8]) -> Result<(), AddressError> {
        let size = self.size();
        let actual = out.len();
        let target = out.get_mut(..size).ok_or(AddressError::TooShort {
            version: self.version(),
            expected: size,
            actual,
        })?;
        target.copy_from_slice(self.bytes());
        Ok(())
    }

    /// Parses an IPv4 (`192.168.0.1`) or IPv6 (`abcd::1234`, `fe80::1%eth0`) address.
    ///
    /// Zone names are resolved through the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::InvalidIPv6Address`] if the text looks like
    /// IPv6 (contains `:` or `%`) and fails to parse, otherwise
    /// [`AddressError::InvalidIPv4Address`].
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        Self::parse_with(s, &SystemScopeResolver)
    }

    /// Like [`parse`](Self::parse), resolving zone names through `resolver`.
    ///
    /// # Errors
    ///
    /// See [`parse`](Self::parse).
    pub fn parse_with(s: &str, resolver: &dyn ScopeResolver) -> Result<Self, AddressError> {
        parse_v4(s).or_else(|v4_error| {
            if s.contains(|c| c == ':' || c == '%') {
                parse_v6(s, resolver)
            } else {
                Err(v4_error)
            }
        })
    }

    /// Formats the address, resolving the scope id through `resolver`.
    #[must_use]
    pub fn display_with<'a>(&'a self, resolver: &'a dyn ScopeResolver) -> ScopedDisplay<'a> {
        ScopedDisplay {
            address: self,
            resolver,
        }
    }
}

const fn is_link_local_bytes(bytes: &[u8; 16]) -> bool {
    bytes[0] == 0xfe && (bytes[1] & 0xc0) == 0x80
}

pub(super) fn parse_v4(s: &str) -> Result<IPAddress, AddressError> {
    let invalid = || AddressError::InvalidIPv4Address(s.to_string());

    let mut octets = [0u8; 4];
    let mut parts = s.split('.');
    for octet in &mut octets {
        let part = parts.next().ok_or_else(invalid)?;
        *octet = parse_octet(part).ok_or_else(invalid)?;
    }
    if parts.next().is_some() {
        return Err(invalid());
    }

    Ok(IPAddress::from_octets(octets))
}

fn parse_octet(part: &str) -> Option<u8> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

pub(super) fn parse_v6(s: &str, resolver: &dyn ScopeResolver) -> Result<IPAddress, AddressError> {
    let invalid = || AddressError::InvalidIPv6Address(s.to_string());

    let (text, scope_id) = match s.split_once('%') {
        Some((text, zone)) => (text, Some(resolve_zone(zone, resolver).ok_or_else(invalid)?)),
        None => (s, None),
    };

    let hextets = parse_hextets(text).ok_or_else(invalid)?;
    let address = IPAddress::from_hextets(hextets);

    match scope_id {
        None => Ok(address),
        Some(_) if !address.is_link_local() => Err(invalid()),
        Some(scope_id) => {
            let mut bytes = [0u8; 16];
            bytes.copy_from_slice(address.bytes());
            Ok(IPAddress::from_v6_bytes_scoped(bytes, scope_id))
        }
    }
}

/// Resolves a zone to a non-zero scope id: interface name first, then decimal.
fn resolve_zone(zone: &str, resolver: &dyn ScopeResolver) -> Option<u32> {
    if zone.is_empty() {
        return None;
    }

    resolver
        .name_to_index(zone)
        .filter(|&index| index != 0)
        .or_else(|| {
            if zone.bytes().all(|b| b.is_ascii_digit()) {
                zone.parse::<u32>().ok().filter(|&index| index != 0)
            } else {
                None
            }
        })
}

/// Parses colon-separated hextets with at most one `::` zero run.
fn parse_hextets(text: &str) -> Option<[u16; 8]> {
    let mut hextets = [0u16; 8];

    let Some((head, tail)) = text.split_once("::") else {
        let count = parse_groups(text, &mut hextets)?;
        return (count == 8).then_some(hextets);
    };

    if tail.contains("::") {
        return None;
    }

    let head_count = parse_groups(head, &mut hextets)?;
    let mut tail_groups = [0u16; 8];
    let tail_count = parse_groups(tail, &mut tail_groups)?;

    // The run must stand for at least one zero hextet.
    if head_count + tail_count > 7 {
        return None;
    }
    hextets[8 - tail_count..].copy_from_slice(&tail_groups[..tail_count]);

    Some(hextets)
}

/// Parses `text` as `:`-separated groups into `out`, returning the group count.
///
/// Empty text yields zero groups; an empty group anywhere else is rejected.
fn parse_groups(text: &str, out: &mut [u16; 8]) -> Option<usize> {
    if text.is_empty() {
        return Some(0);
    }

    let mut count = 0;
    for group in text.split(':') {
        let slot = out.get_mut(count)?;
        *slot = parse_hextet(group)?;
        count += 1;
    }
    Some(count)
}

fn parse_hextet(group: &str) -> Option<u16> {
    if group.is_empty() || group.len() > 4 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(group, 16).ok()
}

/// Display adapter returned by [`IPAddress::display_with`].
pub struct ScopedDisplay<'a> {
    address: &'a IPAddress,
    resolver: &'a dyn ScopeResolver,
}

impl fmt::Display for ScopedDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match &self.address.0 {
            Repr::V4([a, b, c, d]) => format!("{a}.{b}.{c}.{d}"),
            Repr::V6 { bytes, scope_id } => {
                let mut text = String::with_capacity(48);
                for (i, pair) in bytes.chunks_exact(2).enumerate() {
                    if i > 0 {
                        text.push(':');
                    }
                    write!(text, "{:02x}{:02x}", pair[0], pair[1])?;
                }
                if self.address.is_link_local() && *scope_id != 0 {
                    match self.resolver.index_to_name(*scope_id) {
                        Some(name) => write!(text, "%{name}")?,
                        None => write!(text, "%{scope_id}")?,
                    }
                }
                text
            }
        };
        // Honors width, fill and alignment
        f.pad(&text)
    }
}

impl fmt::Display for IPAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display_with(&SystemScopeResolver), f)
    }
}

impl fmt::Debug for IPAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display_with(&super::NumericScopes), f)
    }
}

impl FromStr for IPAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Ipv4Addr> for IPAddress {
    fn from(address: Ipv4Addr) -> Self {
        Self::from_octets(address.octets())
    }
}

impl From<Ipv6Addr> for IPAddress {
    fn from(address: Ipv6Addr) -> Self {
        Self::from_v6_bytes(address.octets())
    }
}

impl From<IpAddr> for IPAddress {
    fn from(address: IpAddr) -> Self {
        match address {
            IpAddr::V4(v4) => v4.into(),
            IpAddr::V6(v6) => v6.into(),
        }
    }
}

impl From<IPAddress> for IpAddr {
    fn from(address: IPAddress) -> Self {
        match address.0 {
            Repr::V4(octets) => Self::V4(Ipv4Addr::from(octets)),
            Repr::V6 { bytes, .. } => Self::V6(Ipv6Addr::from(bytes)),
        }
    }
}

impl Serialize for IPAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IPAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse::<Self>().map_err(serde::de::Error::custom)
    }
}
