//! cast-addr: IP address and local interface inspector
//!
//! Entry point for the cast-addr command-line tool.

use cast_addr::config::{Cli, Command, ValidatedConfig, expand_tilde, write_default_config};
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Parses arguments, then either writes the config template or runs a command.
///
/// Only wiring lives here, so it is left out of coverage runs.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // init must work before any config file exists
    if let Command::Init { output } = &cli.command {
        return handle_init(output);
    }

    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cast-addr: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    let stdout = std::io::stdout();
    match run::execute(&cli.command, &config, &mut stdout.lock()) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            eprintln!("cast-addr: {e}");
            exit_code::runtime_error()
        }
    }
}

/// Writes the commented config template to `output`.
fn handle_init(output: &std::path::Path) -> ExitCode {
    let output = expand_tilde(output);
    match write_default_config(&output) {
        Ok(()) => {
            println!("Wrote {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("cast-addr: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}
