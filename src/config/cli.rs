//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use super::validated::OutputFormat;

/// cast-addr: IP address and local interface inspector
///
/// Parses and normalises IP addresses and endpoints, and lists the local
/// network interfaces usable for streaming.
#[derive(Debug, Parser)]
#[command(name = "cast-addr")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (a leading `~` expands to the home directory)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Print IPv6 zones as numeric scope ids instead of interface names
    #[arg(long, short, global = true)]
    pub numeric: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for cast-addr
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List usable network interfaces and their addresses
    Interfaces(InterfacesArgs),

    /// Print the canonical form of an IP address
    Address {
        /// Address text, e.g. `192.168.0.1` or `fe80::1%eth0`
        text: String,
    },

    /// Print the canonical form of an IP endpoint
    ///
    /// A bare address is accepted too and gets the default port.
    Endpoint {
        /// Endpoint text, e.g. `192.168.0.1:8009` or `[fe80::1%eth0]:8009`
        text: String,

        /// Port for a bare address [default: 8010]
        #[arg(long, value_name = "PORT")]
        default_port: Option<u16>,
    },

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = super::defaults::INIT_OUTPUT)]
        output: PathBuf,
    },
}

/// Options of the `interfaces` subcommand.
#[derive(Debug, Default, Args)]
pub struct InterfacesArgs {
    /// Show only the interface with this exact name
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
}

/// Output format argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// One line per interface and address
    Text,
    /// A JSON array of interfaces
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns the `interfaces` options, if that is the command being run.
    #[must_use]
    pub const fn interfaces_args(&self) -> Option<&InterfacesArgs> {
        match &self.command {
            Command::Interfaces(args) => Some(args),
            _ => None,
        }
    }

    /// Returns `--default-port` when the command is `endpoint` and it was given.
    #[must_use]
    pub const fn default_port(&self) -> Option<u16> {
        match &self.command {
            Command::Endpoint { default_port, .. } => *default_port,
            _ => None,
        }
    }
}
