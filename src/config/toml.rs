//! Shape of the `--config` file.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// The whole config file. Every section and key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Endpoint parsing configuration
    #[serde(default)]
    pub endpoint: EndpointSection,

    /// Output configuration
    #[serde(default)]
    pub output: OutputSection,
}

/// Endpoint parsing configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointSection {
    /// Port given to a bare address by `cast-addr endpoint`
    pub default_port: Option<u16>,
}

/// Output configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Interface listing format: "text" or "json"
    pub format: Option<String>,

    /// Print IPv6 zones as numeric scope ids
    #[serde(default)]
    pub numeric_scopes: bool,
}

impl TomlConfig {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::FileRead`] or [`ConfigError::TomlParse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses file contents.
    ///
    /// # Errors
    ///
    /// [`ConfigError::TomlParse`] on bad syntax, unknown keys or wrong types.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Commented template written by `cast-addr init`.
#[must_use]
pub fn default_config_template() -> String {
    r#"# cast-addr configuration file

[endpoint]
# Port used when `cast-addr endpoint` is given a bare address.
# --default-port on the command line overrides it.
default_port = 8010

[output]
# Interface listing format: "text" or "json" (default: text)
# format = "text"

# Print IPv6 zones as numeric scope ids instead of interface names
# numeric_scopes = false
"#
    .to_string()
}
