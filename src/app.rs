//! Process-level glue for the `cast-addr` binary: exit codes, log setup and
//! hints printed after configuration errors.

use cast_addr::config::ConfigError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Exit statuses of `cast-addr`.
pub mod exit_code {
    use std::process::ExitCode;

    /// The command printed its result.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Exit code 1: the arguments or the config file were rejected.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Exit code 2: the command itself failed (bad address text, no
    /// interface listing).
    ///
    /// `ExitCode::from` is not const, hence a function.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints a follow-up suggestion to stderr for errors the user can fix directly.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::FileRead { .. } | ConfigError::TomlParse(_) => {
            eprintln!("\nRun 'cast-addr init' to generate a configuration template.");
        }
        ConfigError::InvalidFormat { .. } => {
            eprintln!("\nAccepted values for output.format are \"text\" and \"json\".");
        }
        ConfigError::FileWrite { .. } => {}
    }
}

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` overrides the level chosen by `verbose`. Logs go to stderr so
/// that command output on stdout stays machine-readable.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
