//! Bit-exact encoding of endpoints into `sockaddr_in` / `sockaddr_in6`.

use std::fmt;
use std::mem;
use std::ptr;

use thiserror::Error;

use crate::address::{IPAddress, IPEndpoint, Version};

/// Error type for socket-address conversion.
///
/// Every variant points at a caller bug or an unexpected OS structure, not
/// at bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SocketAddressError {
    /// The endpoint's version does not match the requested native shape.
    #[error("Cannot encode {actual} endpoint as {expected} socket address")]
    VersionMismatch {
        /// Version of the requested shape.
        expected: Version,
        /// Version of the endpoint supplied.
        actual: Version,
    },

    /// The native structure has a family other than `AF_INET` / `AF_INET6`.
    #[error("Unsupported socket address family {0}")]
    UnsupportedFamily(i32),

    /// The buffer is shorter than the structure its family requires.
    #[error("Socket address truncated: need {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes required.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
}

/// A native IPv4 or IPv6 socket address.
///
/// Encoded values are fully deterministic: every byte not carrying the
/// family, port, address or scope id is zero.
///
/// # Examples
///
/// ```
/// use cast_addr::address::IPEndpoint;
/// use cast_addr::platform::SocketAddress;
///
/// let endpoint: IPEndpoint = "192.168.0.1:8009".parse().unwrap();
/// let native = SocketAddress::from(&endpoint);
///
/// assert_eq!(native.size(), SocketAddress::size_for(endpoint.address.version()));
/// assert_eq!(SocketAddress::from_bytes(native.as_bytes()).unwrap().to_endpoint(), endpoint);
/// ```
#[derive(Clone, Copy)]
pub enum SocketAddress {
    /// `AF_INET`
    V4(libc::sockaddr_in),
    /// `AF_INET6`
    V6(libc::sockaddr_in6),
}

impl SocketAddress {
    /// Byte size of the native structure used for `version`.
    #[must_use]
    pub const fn size_for(version: Version) -> usize {
        match version {
            Version::V4 => mem::size_of::<libc::sockaddr_in>(),
            Version::V6 => mem::size_of::<libc::sockaddr_in6>(),
        }
    }

    /// Decodes a native socket address from its raw bytes.
    ///
    /// # Errors
    ///
    /// - [`SocketAddressError::Truncated`] if `bytes` is too short for the
    ///   family field or for the family's structure.
    /// - [`SocketAddressError::UnsupportedFamily`] for any family other than
    ///   `AF_INET` / `AF_INET6`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SocketAddressError> {
        let family = read_family(bytes)?;
        match family {
            libc::AF_INET => {
                check_len(bytes, mem::size_of::<libc::sockaddr_in>())?;
                // SAFETY: the slice holds at least size_of::<sockaddr_in>() bytes and
                // read_unaligned places no alignment requirement on the source.
                let sin = unsafe { ptr::read_unaligned(bytes.as_ptr().cast::<libc::sockaddr_in>()) };
                Ok(Self::V4(sin))
            }
            libc::AF_INET6 => {
                check_len(bytes, mem::size_of::<libc::sockaddr_in6>())?;
                // SAFETY: as above, for sockaddr_in6.
                let sin6 =
                    unsafe { ptr::read_unaligned(bytes.as_ptr().cast::<libc::sockaddr_in6>()) };
                Ok(Self::V6(sin6))
            }
            other => Err(SocketAddressError::UnsupportedFamily(other)),
        }
    }

    /// Decodes a socket address handed out by the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`SocketAddressError::UnsupportedFamily`] for any family other
    /// than `AF_INET` / `AF_INET6`.
    ///
    /// # Safety
    ///
    /// `address` must be non-null and point to a readable socket address whose
    /// storage is at least as large as the structure of its family.
    pub unsafe fn from_ptr(address: *const libc::sockaddr) -> Result<Self, SocketAddressError> {
        // SAFETY: the caller guarantees `address` points to a readable sockaddr.
        let family = i32::from(unsafe { (*address).sa_family });
        match family {
            // SAFETY: the family says the storage is a sockaddr_in.
            libc::AF_INET => Ok(Self::V4(unsafe { ptr::read_unaligned(address.cast()) })),
            // SAFETY: the family says the storage is a sockaddr_in6.
            libc::AF_INET6 => Ok(Self::V6(unsafe { ptr::read_unaligned(address.cast()) })),
            other => Err(SocketAddressError::UnsupportedFamily(other)),
        }
    }

    /// Returns the IP version of the native shape.
    #[must_use]
    pub const fn version(&self) -> Version {
        match self {
            Self::V4(_) => Version::V4,
            Self::V6(_) => Version::V6,
        }
    }

    /// Returns the address, including the scope id of a link-local IPv6 address.
    #[must_use]
    pub fn address(&self) -> IPAddress {
        match self {
            Self::V4(sin) => IPAddress::from_octets(sin.sin_addr.s_addr.to_ne_bytes()),
            Self::V6(sin6) => {
                IPAddress::from_v6_bytes_scoped(sin6.sin6_addr.s6_addr, sin6.sin6_scope_id)
            }
        }
    }

    /// Returns the port in host byte order.
    #[must_use]
    pub const fn port(&self) -> u16 {
        match self {
            Self::V4(sin) => u16::from_be(sin.sin_port),
            Self::V6(sin6) => u16::from_be(sin6.sin6_port),
        }
    }

    /// Decodes the portable endpoint.
    #[must_use]
    pub fn to_endpoint(&self) -> IPEndpoint {
        IPEndpoint::new(self.address(), self.port())
    }

    /// Byte size of the encoded structure.
    #[must_use]
    pub const fn size(&self) -> usize {
        Self::size_for(self.version())
    }

    /// Byte size as the `socklen_t` expected by socket calls.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // both structures are far below u32::MAX
    pub const fn socklen(&self) -> libc::socklen_t {
        self.size() as libc::socklen_t
    }

    /// Pointer to the structure for passing to socket calls.
    ///
    /// Valid for [`size`](Self::size) bytes while `self` is alive.
    #[must_use]
    pub const fn as_ptr(&self) -> *const libc::sockaddr {
        match self {
            Self::V4(sin) => ptr::from_ref(sin).cast(),
            Self::V6(sin6) => ptr::from_ref(sin6).cast(),
        }
    }

    /// The encoded structure as raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8] {
        // SAFETY: both structures are plain old data without implicit padding,
        // and the pointer is valid for `size()` bytes for the lifetime of `self`.
        unsafe { std::slice::from_raw_parts(self.as_ptr().cast::<u8>(), self.size()) }
    }
}

/// Encodes an IPv4 endpoint as `sockaddr_in`.
///
/// # Errors
///
/// Returns [`SocketAddressError::VersionMismatch`] for an IPv6 endpoint.
pub fn to_sockaddr_in(endpoint: &IPEndpoint) -> Result<libc::sockaddr_in, SocketAddressError> {
    check_version(endpoint, Version::V4)?;
    let mut octets = [0u8; 4];
    octets.copy_from_slice(endpoint.address.bytes());
    Ok(encode_v4(octets, endpoint.port))
}

/// Encodes an IPv6 endpoint as `sockaddr_in6`.
///
/// The scope id is written only for a link-local address.
///
/// # Errors
///
/// Returns [`SocketAddressError::VersionMismatch`] for an IPv4 endpoint.
pub fn to_sockaddr_in6(endpoint: &IPEndpoint) -> Result<libc::sockaddr_in6, SocketAddressError> {
    check_version(endpoint, Version::V6)?;
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(endpoint.address.bytes());
    Ok(encode_v6(&endpoint.address, bytes, endpoint.port))
}

fn check_version(endpoint: &IPEndpoint, expected: Version) -> Result<(), SocketAddressError> {
    let actual = endpoint.address.version();
    if actual != expected {
        return Err(SocketAddressError::VersionMismatch { expected, actual });
    }
    Ok(())
}

fn encode_v4(octets: [u8; 4], port: u16) -> libc::sockaddr_in {
    // SAFETY: sockaddr_in is plain old data for which all-zero bytes are valid.
    let mut out: libc::sockaddr_in = unsafe { mem::zeroed() };
    #[cfg(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly"
    ))]
    {
        #[allow(clippy::cast_possible_truncation)]
        let len = mem::size_of::<libc::sockaddr_in>() as u8;
        out.sin_len = len;
    }
    out.sin_family = libc::AF_INET as libc::sa_family_t;
    out.sin_port = port.to_be();
    out.sin_addr.s_addr = u32::from_ne_bytes(octets);
    out
}

fn encode_v6(address: &IPAddress, bytes: [u8; 16], port: u16) -> libc::sockaddr_in6 {
    // SAFETY: sockaddr_in6 is plain old data for which all-zero bytes are valid.
    let mut out: libc::sockaddr_in6 = unsafe { mem::zeroed() };
    #[cfg(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly"
    ))]
    {
        #[allow(clippy::cast_possible_truncation)]
        let len = mem::size_of::<libc::sockaddr_in6>() as u8;
        out.sin6_len = len;
    }
    out.sin6_family = libc::AF_INET6 as libc::sa_family_t;
    out.sin6_port = port.to_be();
    out.sin6_addr.s6_addr = bytes;
    if address.is_link_local() {
        out.sin6_scope_id = address.scope_id();
    }
    out
}

fn read_family(bytes: &[u8]) -> Result<i32, SocketAddressError> {
    let end = mem::offset_of!(libc::sockaddr, sa_family) + mem::size_of::<libc::sa_family_t>();
    check_len(bytes, end)?;
    let offset = mem::offset_of!(libc::sockaddr, sa_family);
    // SAFETY: the slice covers the family field, read without alignment requirements.
    let family = unsafe {
        ptr::read_unaligned(bytes.as_ptr().add(offset).cast::<libc::sa_family_t>())
    };
    Ok(i32::from(family))
}

const fn check_len(bytes: &[u8], expected: usize) -> Result<(), SocketAddressError> {
    if bytes.len() < expected {
        return Err(SocketAddressError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

impl From<&IPEndpoint> for SocketAddress {
    fn from(endpoint: &IPEndpoint) -> Self {
        let address = &endpoint.address;
        match address.version() {
            Version::V4 => {
                let mut octets = [0u8; 4];
                octets.copy_from_slice(address.bytes());
                Self::V4(encode_v4(octets, endpoint.port))
            }
            Version::V6 => {
                let mut bytes = [0u8; 16];
                bytes.copy_from_slice(address.bytes());
                Self::V6(encode_v6(address, bytes, endpoint.port))
            }
        }
    }
}

impl From<IPEndpoint> for SocketAddress {
    fn from(endpoint: IPEndpoint) -> Self {
        Self::from(&endpoint)
    }
}

impl From<SocketAddress> for IPEndpoint {
    fn from(address: SocketAddress) -> Self {
        address.to_endpoint()
    }
}

impl PartialEq for SocketAddress {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for SocketAddress {}

impl fmt::Debug for SocketAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SocketAddress")
            .field(&self.to_endpoint())
            .finish()
    }
}
