//! Platform-specific interface sources.
//!
//! This module provides conditional compilation for platform-specific
//! implementations of the [`InterfaceSource`](super::InterfaceSource) trait.
//!
//! # Platform Support
//!
//! - **Linux**: `getifaddrs(3)` plus sysfs media and procfs IPv6 state.
//! - **Other Unix**: no source yet; supply your own [`InterfaceSource`](super::InterfaceSource).

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "linux")]
pub use linux::{DEFAULT_PROCFS_ROOT, DEFAULT_SYSFS_ROOT, LinuxInterfaces};

#[cfg(target_os = "linux")]
pub use linux::LinuxInterfaces as PlatformInterfaces;
