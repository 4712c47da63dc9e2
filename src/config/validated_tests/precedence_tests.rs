//! Tests for CLI vs TOML precedence rules.

use super::*;

mod cli_precedence {
    use super::*;

    #[test]
    fn cli_format_overrides_toml() {
        let toml = toml(
            r#"
            [output]
            format = "text"
        "#,
        );

        let config = ValidatedConfig::from_raw(
            &cli(&["interfaces", "--format", "json"]),
            Some(&toml),
        )
        .unwrap();

        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn cli_default_port_overrides_toml() {
        let toml = toml(
            r"
            [endpoint]
            default_port = 9000
        ",
        );

        let config = ValidatedConfig::from_raw(
            &cli(&["endpoint", "10.0.0.1", "--default-port", "8009"]),
            Some(&toml),
        )
        .unwrap();

        assert_eq!(config.default_port, 8009);
    }

    #[test]
    fn interface_name_comes_from_cli() {
        let config = ValidatedConfig::from_raw(&cli(&["interfaces", "eth0"]), None).unwrap();
        assert_eq!(config.interface.as_deref(), Some("eth0"));

        let config = ValidatedConfig::from_raw(&cli(&["interfaces"]), None).unwrap();
        assert!(config.interface.is_none());
    }
}

mod toml_fallback {
    use super::*;

    #[test]
    fn toml_format_used_without_cli() {
        let toml = toml(
            r#"
            [output]
            format = "JSON"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&["interfaces"]), Some(&toml)).unwrap();

        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn unknown_toml_format_is_rejected() {
        let toml = toml(
            r#"
            [output]
            format = "yaml"
        "#,
        );

        let result = ValidatedConfig::from_raw(&cli(&["interfaces"]), Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidFormat { ref value }) if value == "yaml"
        ));
    }

    #[test]
    fn toml_default_port_used_without_cli() {
        let toml = toml(
            r"
            [endpoint]
            default_port = 9000
        ",
        );

        let config =
            ValidatedConfig::from_raw(&cli(&["endpoint", "10.0.0.1"]), Some(&toml)).unwrap();

        assert_eq!(config.default_port, 9000);
    }

    #[test]
    fn defaults_apply_without_either() {
        let config = ValidatedConfig::from_raw(&cli(&["endpoint", "10.0.0.1"]), None).unwrap();

        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.default_port, 8010);
    }
}

mod flags {
    use super::*;

    #[test]
    fn numeric_scopes_from_either_source() {
        let from_cli = ValidatedConfig::from_raw(&cli(&["address", "::1", "-n"]), None).unwrap();
        assert!(from_cli.numeric_scopes);

        let toml = toml(
            r"
            [output]
            numeric_scopes = true
        ",
        );
        let from_toml = ValidatedConfig::from_raw(&cli(&["address", "::1"]), Some(&toml)).unwrap();
        assert!(from_toml.numeric_scopes);

        let neither = ValidatedConfig::from_raw(&cli(&["address", "::1"]), None).unwrap();
        assert!(!neither.numeric_scopes);
    }

    #[test]
    fn verbose_comes_from_cli() {
        let config = ValidatedConfig::from_raw(&cli(&["interfaces", "-v"]), None).unwrap();
        assert!(config.verbose);
    }
}
