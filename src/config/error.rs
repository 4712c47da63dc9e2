//! Errors raised while building a [`ValidatedConfig`](super::ValidatedConfig).

use std::path::PathBuf;

use thiserror::Error;

/// Why the CLI arguments and config file could not be turned into a usable
/// configuration, or why `init` could not write its template.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `--config` file could not be read.
    #[error("Cannot read config file '{}': {source}", path.display())]
    FileRead {
        /// Path given on the command line, after `~` expansion
        path: PathBuf,
        /// Cause
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has unknown keys.
    #[error("Malformed config file: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// `init` could not write the template.
    #[error("Cannot write config template '{}': {source}", path.display())]
    FileWrite {
        /// Output path
        path: PathBuf,
        /// Cause
        #[source]
        source: std::io::Error,
    },

    /// `output.format` is neither `text` nor `json`.
    #[error("Invalid output format '{value}': expected text or json")]
    InvalidFormat {
        /// Rejected text
        value: String,
    },
}
