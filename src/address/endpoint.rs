//! The [`IPEndpoint`] value type: an address plus a port.

use std::fmt;
use std::net::{SocketAddr, SocketAddrV4, SocketAddrV6};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::{ParseError, ParseErrorKind};
use super::ip::{IPAddress, parse_v4, parse_v6};
use super::scope::{ScopeResolver, SystemScopeResolver};

/// An IP address and port.
///
/// Ordered by address first, then port. The text form is `a.b.c.d:port` for
/// IPv4 and `[v6]:port` for IPv6.
///
/// # Examples
///
/// ```
/// use cast_addr::address::{IPAddress, IPEndpoint};
///
/// let endpoint: IPEndpoint = "[abcd::1]:99".parse().unwrap();
/// assert_eq!(endpoint.port, 99);
/// assert_eq!(
///     endpoint.address,
///     IPAddress::from_hextets([0xabcd, 0, 0, 0, 0, 0, 0, 1])
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IPEndpoint {
    /// The IP address.
    pub address: IPAddress,
    /// The port, in host byte order.
    pub port: u16,
}

impl IPEndpoint {
    /// `0.0.0.0:0`, the "any" endpoint for IPv4 sockets.
    pub const ANY_V4: Self = Self::new(IPAddress::ANY_V4, 0);
    /// `[::]:0`, the "any" endpoint for IPv6 sockets.
    pub const ANY_V6: Self = Self::new(IPAddress::ANY_V6, 0);

    /// Creates an endpoint.
    #[must_use]
    pub const fn new(address: IPAddress, port: u16) -> Self {
        Self { address, port }
    }

    /// Returns true if both the address and the port are zero.
    #[must_use]
    pub fn is_unspecified(&self) -> bool {
        self.address.is_unspecified() && self.port == 0
    }

    /// Parses `1.2.3.4:5678` or `[abcd::1]:5678`.
    ///
    /// Zone names inside the brackets are resolved through the operating system.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] whose [`kind`](ParseError::kind) tells which
    /// part of the text was wrong.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        Self::parse_with(s, &SystemScopeResolver)
    }

    /// Like [`parse`](Self::parse), resolving zone names through `resolver`.
    ///
    /// # Errors
    ///
    /// See [`parse`](Self::parse).
    pub fn parse_with(s: &str, resolver: &dyn ScopeResolver) -> Result<Self, ParseError> {
        let error = |kind| ParseError::new(kind, s);

        // Also rejects the empty string.
        let colon = s.rfind(':').ok_or_else(|| error(ParseErrorKind::MissingColon))?;
        if colon == 0 {
            return Err(error(ParseErrorKind::MissingAddress));
        }
        if colon == s.len() - 1 {
            return Err(error(ParseErrorKind::MissingPort));
        }

        let (host, port) = (&s[..colon], &s[colon + 1..]);

        let address = match host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
            Some(inner) => parse_v6(inner, resolver),
            None => parse_v4(host),
        }
        .map_err(|_| error(ParseErrorKind::InvalidAddress))?;

        let port = parse_port(port).ok_or_else(|| error(ParseErrorKind::InvalidPort))?;

        Ok(Self::new(address, port))
    }

    /// Parses an endpoint, or failing that a bare address that gets
    /// `default_port`.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's [`ParseError`] when the text is neither.
    pub fn parse_or_address(s: &str, default_port: u16) -> Result<Self, ParseError> {
        Self::parse_or_address_with(s, default_port, &SystemScopeResolver)
    }

    /// Like [`parse_or_address`](Self::parse_or_address), resolving zone
    /// names through `resolver`.
    ///
    /// # Errors
    ///
    /// See [`parse_or_address`](Self::parse_or_address).
    pub fn parse_or_address_with(
        s: &str,
        default_port: u16,
        resolver: &dyn ScopeResolver,
    ) -> Result<Self, ParseError> {
        Self::parse_with(s, resolver).or_else(|error| {
            IPAddress::parse_with(s, resolver)
                .map(|address| Self::new(address, default_port))
                .map_err(|_| error)
        })
    }

    /// Formats the endpoint, resolving the scope id through `resolver`.
    #[must_use]
    pub fn to_string_with(&self, resolver: &dyn ScopeResolver) -> String {
        let address = self.address.display_with(resolver);
        if self.address.is_v6() {
            format!("[{address}]:{}", self.port)
        } else {
            format!("{address}:{}", self.port)
        }
    }
}

fn parse_port(text: &str) -> Option<u16> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for IPEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.address.is_v6() {
            write!(f, "[{}]:{}", self.address, self.port)
        } else {
            write!(f, "{}:{}", self.address, self.port)
        }
    }
}

impl FromStr for IPEndpoint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<SocketAddr> for IPEndpoint {
    fn from(address: SocketAddr) -> Self {
        match address {
            SocketAddr::V4(v4) => Self::new((*v4.ip()).into(), v4.port()),
            SocketAddr::V6(v6) => Self::new(
                IPAddress::from_v6_bytes_scoped(v6.ip().octets(), v6.scope_id()),
                v6.port(),
            ),
        }
    }
}

impl From<IPEndpoint> for SocketAddr {
    fn from(endpoint: IPEndpoint) -> Self {
        match std::net::IpAddr::from(endpoint.address) {
            std::net::IpAddr::V4(ip) => Self::V4(SocketAddrV4::new(ip, endpoint.port)),
            std::net::IpAddr::V6(ip) => Self::V6(SocketAddrV6::new(
                ip,
                endpoint.port,
                0,
                endpoint.address.scope_id(),
            )),
        }
    }
}

impl Serialize for IPEndpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IPEndpoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse::<Self>().map_err(serde::de::Error::custom)
    }
}
