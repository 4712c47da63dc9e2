//! Configuration layer for cast-addr.
//!
//! Settings come from three places: the subcommand line ([`Cli`]), an
//! optional TOML file ([`TomlConfig`], template from [`write_default_config`])
//! and the constants in [`defaults`]. [`ValidatedConfig`] merges them, the
//! command line winning over the file and the file over the defaults.
//!
//! # Switches
//!
//! `--numeric` and `numeric_scopes` use OR semantics: set in either the CLI
//! or the file, the result is `true`.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod toml_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, FormatArg, InterfacesArgs};
pub use error::ConfigError;
pub use toml::{EndpointSection, OutputSection, TomlConfig, default_config_template};
pub use validated::{OutputFormat, ValidatedConfig, expand_tilde, write_default_config};
