//! Tests for CLI argument parsing.

use super::cli::{Cli, Command, FormatArg};

mod parsing {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_interfaces_with_name() {
        let cli = Cli::parse_from_iter(["cast-addr", "interfaces", "eth0", "--format", "json"]);

        let args = cli.interfaces_args().unwrap();
        assert_eq!(args.name.as_deref(), Some("eth0"));
        assert_eq!(args.format, Some(FormatArg::Json));
    }

    #[test]
    fn interfaces_defaults() {
        let cli = Cli::parse_from_iter(["cast-addr", "interfaces"]);

        let args = cli.interfaces_args().unwrap();
        assert!(args.name.is_none());
        assert!(args.format.is_none());
        assert!(!cli.verbose);
        assert!(!cli.numeric);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parse_address_and_endpoint() {
        let cli = Cli::parse_from_iter(["cast-addr", "address", "fe80::1%eth0"]);
        assert!(matches!(cli.command, Command::Address { ref text } if text == "fe80::1%eth0"));
        assert!(cli.interfaces_args().is_none());

        let cli = Cli::parse_from_iter(["cast-addr", "endpoint", "[::1]:8009"]);
        assert!(matches!(cli.command, Command::Endpoint { ref text, .. } if text == "[::1]:8009"));
        assert_eq!(cli.default_port(), None);
    }

    #[test]
    fn parse_endpoint_default_port() {
        let cli = Cli::parse_from_iter([
            "cast-addr",
            "endpoint",
            "10.0.0.1",
            "--default-port",
            "8009",
        ]);
        assert_eq!(cli.default_port(), Some(8009));

        let cli = Cli::parse_from_iter(["cast-addr", "address", "10.0.0.1"]);
        assert_eq!(cli.default_port(), None);
    }

    #[test]
    fn out_of_range_default_port_is_rejected() {
        let args = ["cast-addr", "endpoint", "::1", "--default-port", "65536"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from_iter([
            "cast-addr",
            "address",
            "::1",
            "--config",
            "/path/to/config.toml",
            "-v",
            "-n",
        ]);

        assert_eq!(
            cli.config.as_ref().unwrap().to_str(),
            Some("/path/to/config.toml")
        );
        assert!(cli.verbose);
        assert!(cli.numeric);
    }

    #[test]
    fn init_default_output() {
        let cli = Cli::parse_from_iter(["cast-addr", "init"]);
        match cli.command {
            Command::Init { output } => assert_eq!(output.to_str(), Some("cast-addr.toml")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn init_custom_output() {
        let cli = Cli::parse_from_iter(["cast-addr", "init", "-o", "/tmp/custom.toml"]);
        match cli.command {
            Command::Init { output } => assert_eq!(output.to_str(), Some("/tmp/custom.toml")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["cast-addr"]).is_err());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["cast-addr", "interfaces", "--kind", "wifi"]).is_err());
    }
}

mod format_arg {
    use super::*;
    use crate::config::OutputFormat;
    use clap::ValueEnum;

    #[test]
    fn from_str_accepts_known_formats() {
        assert_eq!(FormatArg::from_str("text", false).unwrap(), FormatArg::Text);
        assert_eq!(FormatArg::from_str("json", false).unwrap(), FormatArg::Json);
        assert!(FormatArg::from_str("yaml", false).is_err());
    }

    #[test]
    fn converts_to_output_format() {
        assert_eq!(OutputFormat::from(FormatArg::Text), OutputFormat::Text);
        assert_eq!(OutputFormat::from(FormatArg::Json), OutputFormat::Json);
    }
}
