//! Portable IP address model.
//!
//! This module provides:
//! - IP addresses of either version ([`IPAddress`], [`Version`])
//! - Address + port pairs ([`IPEndpoint`])
//! - Parse errors ([`AddressError`], [`ParseError`], [`ParseErrorKind`])
//! - Zone name lookup for link-local IPv6 ([`ScopeResolver`])
//!
//! # Text Forms
//!
//! - IPv4: `d.d.d.d`, each `d` a decimal octet.
//! - IPv6: up to 8 groups of 1-4 hex digits with at most one `::` run, and an
//!   optional `%zone` on link-local (`fe80::/10`) addresses. Output is always
//!   fully expanded and lowercase: `fe80:0000:0000:0000:0000:0000:0000:0001`.
//! - Endpoints: `a.b.c.d:port` or `[v6]:port`, no whitespace.

mod endpoint;
mod error;
mod ip;
mod scope;


pub use endpoint::IPEndpoint;
pub use error::{AddressError, ParseError, ParseErrorKind};
pub use ip::{IPAddress, ScopedDisplay, Version};
pub use scope::{NumericScopes, ScopeResolver, SystemScopeResolver};
