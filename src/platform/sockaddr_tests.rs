//! Tests for the native socket-address adapter.

use super::*;
use crate::address::{IPAddress, IPEndpoint, NumericScopes, Version};

fn endpoint(s: &str) -> IPEndpoint {
    IPEndpoint::parse_with(s, &NumericScopes).unwrap()
}

mod encoding {
    use super::*;

    #[test]
    fn v4_fields() {
        let native = to_sockaddr_in(&endpoint("192.168.0.1:8080")).unwrap();
        assert_eq!(i32::from(native.sin_family), libc::AF_INET);
        assert_eq!(u16::from_be(native.sin_port), 8080);
        assert_eq!(native.sin_addr.s_addr.to_ne_bytes(), [192, 168, 0, 1]);
    }

    #[test]
    fn v6_fields_with_scope() {
        let native = to_sockaddr_in6(&endpoint("[fe80::1%4]:5353")).unwrap();
        assert_eq!(i32::from(native.sin6_family), libc::AF_INET6);
        assert_eq!(u16::from_be(native.sin6_port), 5353);
        assert_eq!(native.sin6_flowinfo, 0);
        assert_eq!(native.sin6_scope_id, 4);
        assert_eq!(native.sin6_addr.s6_addr[0], 0xfe);
        assert_eq!(native.sin6_addr.s6_addr[15], 1);
    }

    #[test]
    fn v6_without_scope_writes_zero() {
        let native = to_sockaddr_in6(&endpoint("[abcd::1]:99")).unwrap();
        assert_eq!(native.sin6_scope_id, 0);
    }

    #[test]
    fn wrong_version_is_rejected() {
        assert_eq!(
            to_sockaddr_in(&endpoint("[abcd::1]:99")).unwrap_err(),
            SocketAddressError::VersionMismatch {
                expected: Version::V4,
                actual: Version::V6,
            }
        );
        assert_eq!(
            to_sockaddr_in6(&endpoint("1.2.3.4:99")).unwrap_err(),
            SocketAddressError::VersionMismatch {
                expected: Version::V6,
                actual: Version::V4,
            }
        );
    }

    #[test]
    fn sizes_match_native_structures() {
        assert_eq!(
            SocketAddress::size_for(Version::V4),
            std::mem::size_of::<libc::sockaddr_in>()
        );
        assert_eq!(
            SocketAddress::size_for(Version::V6),
            std::mem::size_of::<libc::sockaddr_in6>()
        );
        let native = SocketAddress::from(endpoint("[abcd::1]:99"));
        assert_eq!(native.size(), native.as_bytes().len());
        assert_eq!(native.socklen() as usize, native.size());
    }

    #[test]
    fn encoding_is_deterministic() {
        let a = SocketAddress::from(endpoint("[fe80::1%2]:80"));
        let b = SocketAddress::from(endpoint("[fe80::1%2]:80"));
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn v4_byte_layout() {
        let native = SocketAddress::from(endpoint("192.168.0.1:8080"));
        let mut expected = Vec::new();
        expected.extend_from_slice(&(libc::AF_INET as u16).to_ne_bytes());
        expected.extend_from_slice(&[0x1f, 0x90, 192, 168, 0, 1]);
        expected.extend_from_slice(&[0; 8]);
        assert_eq!(native.as_bytes(), expected.as_slice());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn v6_byte_layout() {
        let native = SocketAddress::from(endpoint("[fe80::1%4]:5353"));
        let bytes = native.as_bytes();
        assert_eq!(bytes.len(), 28);
        assert_eq!(bytes[..2], (libc::AF_INET6 as u16).to_ne_bytes());
        assert_eq!(bytes[2..4], [0x14, 0xe9]);
        assert_eq!(bytes[4..8], [0; 4]);
        assert_eq!(bytes[8..10], [0xfe, 0x80]);
        assert_eq!(bytes[10..23], [0; 13]);
        assert_eq!(bytes[23], 1);
        assert_eq!(bytes[24..28], 4u32.to_ne_bytes());
    }
}

mod decoding {
    use super::*;

    #[test]
    fn round_trips_v4_and_v6() {
        for text in ["192.168.0.1:8080", "0.0.0.0:0", "[abcd::1]:99", "[fe80::1%4]:5353"] {
            let original = endpoint(text);
            let native = SocketAddress::from(&original);
            let decoded = SocketAddress::from_bytes(native.as_bytes()).unwrap();
            assert_eq!(decoded, native);
            assert_eq!(decoded.to_endpoint(), original, "{text}");
        }
    }

    #[test]
    fn scope_survives_round_trip() {
        let native = SocketAddress::from(endpoint("[fe80::abcd%9]:1"));
        let decoded = IPEndpoint::from(SocketAddress::from_bytes(native.as_bytes()).unwrap());
        assert_eq!(decoded.address.scope_id(), 9);
    }

    #[test]
    fn scope_on_non_link_local_is_dropped() {
        let mut native = to_sockaddr_in6(&endpoint("[abcd::1]:99")).unwrap();
        native.sin6_scope_id = 5;
        let decoded = SocketAddress::V6(native).to_endpoint();
        assert_eq!(decoded.address.scope_id(), 0);
    }

    #[test]
    fn from_ptr_reads_os_structure() {
        let native = SocketAddress::from(endpoint("10.1.2.3:53"));
        // SAFETY: the pointer refers to a live, fully initialised sockaddr_in.
        let decoded = unsafe { SocketAddress::from_ptr(native.as_ptr()) }.unwrap();
        assert_eq!(decoded.to_endpoint(), endpoint("10.1.2.3:53"));
    }

    #[test]
    fn unsupported_family_is_rejected() {
        // SAFETY: all-zero is a valid sockaddr_un.
        let mut unix: libc::sockaddr_un = unsafe { std::mem::zeroed() };
        unix.sun_family = libc::AF_UNIX as libc::sa_family_t;
        // SAFETY: sockaddr_un is plain old data readable as bytes.
        let bytes = unsafe {
            std::slice::from_raw_parts(
                std::ptr::from_ref(&unix).cast::<u8>(),
                std::mem::size_of::<libc::sockaddr_un>(),
            )
        };
        assert_eq!(
            SocketAddress::from_bytes(bytes).unwrap_err(),
            SocketAddressError::UnsupportedFamily(libc::AF_UNIX)
        );
    }

    #[test]
    fn truncated_buffers_are_rejected() {
        assert!(matches!(
            SocketAddress::from_bytes(&[]),
            Err(SocketAddressError::Truncated { actual: 0, .. })
        ));

        let native = SocketAddress::from(endpoint("[abcd::1]:99"));
        let short = &native.as_bytes()[..native.size() - 1];
        assert_eq!(
            SocketAddress::from_bytes(short).unwrap_err(),
            SocketAddressError::Truncated {
                expected: native.size(),
                actual: native.size() - 1,
            }
        );
    }

    #[test]
    fn debug_shows_endpoint() {
        let native = SocketAddress::from(endpoint("1.2.3.4:5"));
        assert_eq!(
            format!("{native:?}"),
            "SocketAddress(IPEndpoint { address: 1.2.3.4, port: 5 })"
        );
    }
}

#[test]
fn addresses_compare_by_bytes() {
    let a = SocketAddress::from(endpoint("1.2.3.4:5"));
    let b = SocketAddress::from(endpoint("1.2.3.4:6"));
    assert_ne!(a, b);
    assert_eq!(a, SocketAddress::from(IPEndpoint::new(IPAddress::new_v4(1, 2, 3, 4), 5)));
}
