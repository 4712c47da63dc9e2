//! cast-addr: IP address model and local interface enumeration
//!
//! A library for the address plumbing of a Cast streaming stack:
//!
//! - [`address`]: portable IPv4/IPv6 addresses and endpoints with strict
//!   parsing, canonical formatting and a total order
//! - [`platform`]: conversion to and from the native `sockaddr_in` /
//!   `sockaddr_in6` structures
//! - [`interfaces`]: snapshots of the usable local network interfaces
//! - [`config`]: configuration for the `cast-addr` command-line tool

pub mod address;
pub mod config;
pub mod interfaces;
pub mod platform;
