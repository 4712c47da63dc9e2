//! Native socket-address adapter.
//!
//! This module converts between the portable [`IPEndpoint`](crate::address::IPEndpoint)
//! and the operating system's socket-address structures, in both directions.
//!
//! # Platform Support
//!
//! - **Unix**: `sockaddr_in` / `sockaddr_in6` via the `libc` crate, including
//!   the `sin_len` field on BSD-derived systems.
//! - **Windows**: not provided.

#[cfg(unix)]
mod sockaddr;

#[cfg(all(test, unix))]
mod sockaddr_tests;

#[cfg(unix)]
pub use sockaddr::{SocketAddress, SocketAddressError, to_sockaddr_in, to_sockaddr_in6};
