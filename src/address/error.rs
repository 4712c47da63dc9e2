//! Error types for address and endpoint parsing.

use std::fmt;

use thiserror::Error;

use super::Version;

/// Error type for [`IPAddress`](super::IPAddress) construction and parsing.
///
/// All variants describe malformed input; none of them are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The text is not a dotted-decimal IPv4 address.
    #[error("Invalid IPv4 address '{0}'")]
    InvalidIPv4Address(String),

    /// The text is not a valid IPv6 address, or carries a bad zone suffix.
    #[error("Invalid IPv6 address '{0}'")]
    InvalidIPv6Address(String),

    /// A byte slice was too short for the requested address version.
    #[error("{version} address needs {expected} bytes, got {actual}")]
    TooShort {
        /// The version the bytes were tagged with.
        version: Version,
        /// Number of bytes the version requires.
        expected: usize,
        /// Number of bytes supplied.
        actual: usize,
    },
}

/// Why an endpoint string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// No `:` separating the address from the port.
    MissingColon,
    /// The separating `:` is the first character.
    MissingAddress,
    /// The separating `:` is the last character.
    MissingPort,
    /// The address part did not parse.
    InvalidAddress,
    /// The port part is not a decimal number in `0..=65535`.
    InvalidPort,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::MissingColon => "missing colon separator",
            Self::MissingAddress => "missing address before colon",
            Self::MissingPort => "missing port after colon",
            Self::InvalidAddress => "invalid address part",
            Self::InvalidPort => "invalid port part",
        };
        f.write_str(reason)
    }
}

/// Error type for [`IPEndpoint`](super::IPEndpoint) parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to parse endpoint '{input}': {kind}")]
pub struct ParseError {
    kind: ParseErrorKind,
    input: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, input: &str) -> Self {
        Self {
            kind,
            input: input.to_string(),
        }
    }

    /// Returns the machine-readable reason.
    #[must_use]
    pub const fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}
