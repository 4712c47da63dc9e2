//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_endpoint_section() {
        let toml = r"
            [endpoint]
            default_port = 8009
        ";

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.endpoint.default_port, Some(8009));
    }

    #[test]
    fn reject_out_of_range_port() {
        let toml = r"
            [endpoint]
            default_port = 70000
        ";

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn parse_output_section() {
        let toml = r#"
            [output]
            format = "json"
            numeric_scopes = true
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.output.format.as_deref(), Some("json"));
        assert!(config.output.numeric_scopes);
    }

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.endpoint.default_port.is_none());
        assert!(config.output.format.is_none());
        assert!(!config.output.numeric_scopes);
    }

    #[test]
    fn reject_unknown_fields() {
        let toml = r"
            [output]
            colour = true
        ";

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn reject_unknown_sections() {
        let toml = r"
            [receiver]
            port = 8009
        ";

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn reject_wrong_types() {
        let toml = r#"
            [endpoint]
            default_port = "8009"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }
}

mod template {
    use super::*;

    #[test]
    fn template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert_eq!(config.endpoint.default_port, Some(8010));
        assert!(config.output.format.is_none());
    }

    #[test]
    fn template_documents_every_option() {
        let template = default_config_template();

        for key in ["default_port", "format", "numeric_scopes"] {
            assert!(template.contains(key), "template should mention {key}");
        }
    }
}

mod loading {
    use super::*;
    use crate::config::ConfigError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nformat = \"json\"").unwrap();

        let config = TomlConfig::load(file.path()).unwrap();
        assert_eq!(config.output.format.as_deref(), Some("json"));
    }

    #[test]
    fn load_missing_file_is_file_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = TomlConfig::load(&dir.path().join("missing.toml"));

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn load_invalid_toml_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[output").unwrap();

        let result = TomlConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }
}
