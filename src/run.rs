//! Command execution.
//!
//! Every command writes its result to the given writer so the output can be
//! captured in tests.

use std::io::Write;

use thiserror::Error;
use tracing::{debug, info};

use cast_addr::address::{
    AddressError, IPAddress, IPEndpoint, NumericScopes, ParseError, ScopeResolver,
    SystemScopeResolver,
};
use cast_addr::config::{Command, OutputFormat, ValidatedConfig};
use cast_addr::interfaces::{InterfaceInfo, find_by_name};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The address argument did not parse.
    #[error("Invalid address: {0}")]
    Address(#[from] AddressError),

    /// The endpoint argument did not parse.
    #[error(transparent)]
    Endpoint(#[from] ParseError),

    /// `interfaces NAME` named no usable interface.
    #[error("No usable interface named '{name}'")]
    InterfaceNotFound {
        /// Requested name
        name: String,
    },

    /// The OS interface listing failed.
    #[cfg(target_os = "linux")]
    #[error("Failed to enumerate interfaces: {0}")]
    Enumerate(#[from] cast_addr::interfaces::EnumerateError),

    /// No interface source exists for this platform.
    #[cfg(not(target_os = "linux"))]
    #[error("Interface listing is not supported on this platform")]
    Unsupported,

    /// JSON encoding failed.
    #[error("Failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Runs `command`, writing its result to `out`.
///
/// `init` is handled before configuration is loaded and does nothing here.
///
/// # Errors
///
/// Returns [`RunError`] if the input does not parse, the interfaces cannot be
/// listed, or the output cannot be written.
pub fn execute(
    command: &Command,
    config: &ValidatedConfig,
    out: &mut dyn Write,
) -> Result<(), RunError> {
    let resolver: &dyn ScopeResolver = if config.numeric_scopes {
        &NumericScopes
    } else {
        &SystemScopeResolver
    };

    match command {
        Command::Address { text } => print_address(text, resolver, out),
        Command::Endpoint { text, .. } => {
            print_endpoint(text, config.default_port, resolver, out)
        }
        Command::Interfaces(_) => {
            let interfaces = list_local()?;
            print_interfaces(interfaces, config, resolver, out)
        }
        Command::Init { .. } => Ok(()),
    }
}

fn print_address(
    text: &str,
    resolver: &dyn ScopeResolver,
    out: &mut dyn Write,
) -> Result<(), RunError> {
    let address = IPAddress::parse(text)?;
    info!(
        version = %address.version(),
        link_local = address.is_link_local(),
        scope_id = address.scope_id(),
        "Parsed address"
    );
    writeln!(out, "{}", address.display_with(resolver))?;
    Ok(())
}

fn print_endpoint(
    text: &str,
    default_port: u16,
    resolver: &dyn ScopeResolver,
    out: &mut dyn Write,
) -> Result<(), RunError> {
    let endpoint = IPEndpoint::parse_or_address(text, default_port)?;
    info!(
        version = %endpoint.address.version(),
        port = endpoint.port,
        "Parsed endpoint"
    );
    writeln!(out, "{}", endpoint.to_string_with(resolver))?;
    Ok(())
}

#[cfg(target_os = "linux")]
fn list_local() -> Result<Vec<InterfaceInfo>, RunError> {
    Ok(cast_addr::interfaces::get_network_interfaces()?)
}

#[cfg(not(target_os = "linux"))]
fn list_local() -> Result<Vec<InterfaceInfo>, RunError> {
    Err(RunError::Unsupported)
}

fn print_interfaces(
    interfaces: Vec<InterfaceInfo>,
    config: &ValidatedConfig,
    resolver: &dyn ScopeResolver,
    out: &mut dyn Write,
) -> Result<(), RunError> {
    let total = interfaces.len();
    let selected = match config.interface.as_deref() {
        Some(name) => {
            let interface = find_by_name(&interfaces, name).ok_or_else(|| {
                RunError::InterfaceNotFound {
                    name: name.to_string(),
                }
            })?;
            vec![interface.clone()]
        }
        None => interfaces,
    };
    info!(total, selected = selected.len(), "Enumerated interfaces");

    match config.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &selected)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for interface in &selected {
                write_interface(interface, resolver, out)?;
            }
        }
    }
    Ok(())
}

/// Writes one interface header line followed by one indented line per subnet.
fn write_interface(
    interface: &InterfaceInfo,
    resolver: &dyn ScopeResolver,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    debug!(interface = %interface.name, addresses = interface.addresses.len(), "Printing interface");
    writeln!(
        out,
        "{} ({}) index {} hw {}",
        interface.name,
        interface.kind,
        interface.index,
        interface.hardware_address_string()
    )?;
    for subnet in &interface.addresses {
        writeln!(
            out,
            "    {}/{}",
            subnet.address.display_with(resolver),
            subnet.prefix_length
        )?;
    }
    Ok(())
}
