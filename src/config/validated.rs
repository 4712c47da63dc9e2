//! The merged configuration the commands run with.
//!
//! The output format is checked while merging, so a [`ValidatedConfig`]
//! never holds an invalid setting.

use std::fmt;
use std::path::{Path, PathBuf};

use super::cli::{Cli, InterfacesArgs};
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// How interface listings are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per interface, then one indented line per address.
    Text,
    /// A pretty-printed JSON array.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Settings for one `cast-addr` invocation.
///
/// Built by [`ValidatedConfig::load`] or, without touching the filesystem,
/// [`ValidatedConfig::from_raw`].
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Exact name of the one interface `interfaces` should show
    pub interface: Option<String>,

    /// Port `endpoint` gives to a bare address
    pub default_port: u16,

    /// Interface listing format
    pub format: OutputFormat,

    /// Print IPv6 zones as numeric scope ids
    pub numeric_scopes: bool,

    /// Log at DEBUG instead of INFO
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ format: {}, numeric_scopes: {}, interface: {}, default_port: {} }}",
            self.format,
            self.numeric_scopes,
            self.interface.as_deref().unwrap_or("*"),
            self.default_port,
        )
    }
}

impl ValidatedConfig {
    /// Merges the parsed command line with an already loaded config file.
    ///
    /// CLI arguments take precedence over TOML config values. Options of a
    /// subcommand other than the one being run keep their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidFormat`] if the file names an unknown format.
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let empty = InterfacesArgs::default();
        let args = cli.interfaces_args().unwrap_or(&empty);

        let format = Self::resolve_format(args, toml)?;
        let default_port = cli
            .default_port()
            .or_else(|| toml.and_then(|t| t.endpoint.default_port))
            .unwrap_or(defaults::CAST_PORT);

        // Flags only enable, never disable
        let numeric_scopes = cli.numeric
            || toml.map_or(defaults::NUMERIC_SCOPES, |t| t.output.numeric_scopes);

        Ok(Self {
            interface: args.name.clone(),
            default_port,
            format,
            numeric_scopes,
            verbose: cli.verbose,
        })
    }

    /// Reads `--config` (if given, with `~` expanded) and merges it with `cli`.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from reading the file or from [`from_raw`](Self::from_raw).
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = match cli.config {
            Some(ref path) => Some(TomlConfig::load(&expand_tilde(path))?),
            None => None,
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_format(
        args: &InterfacesArgs,
        toml: Option<&TomlConfig>,
    ) -> Result<OutputFormat, ConfigError> {
        // Priority: CLI explicit > TOML > default
        if let Some(format) = args.format {
            return Ok(format.into());
        }

        let format_str = toml
            .and_then(|t| t.output.format.as_deref())
            .unwrap_or(defaults::FORMAT);

        parse_format(format_str)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Replaces a leading `~` component with the home directory.
///
/// Paths without one, or when the home directory is unknown, are returned
/// unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}

// Helper functions

fn parse_format(s: &str) -> Result<OutputFormat, ConfigError> {
    match s.to_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(ConfigError::InvalidFormat {
            value: s.to_string(),
        }),
    }
}
