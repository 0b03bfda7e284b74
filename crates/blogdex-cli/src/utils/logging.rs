//! Logging initialization and color control.

use anyhow::Result;
use colored::control as color_control;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::cli::Cli;

/// Level selected by the global flags when `RUST_LOG` is not set.
///
/// Machine-readable output drops to `ERROR` unless `--verbose` was given.
pub fn level_for(cli: &Cli) -> Level {
    let machine_output = cli.command.format().is_some_and(|f| f.is_machine());
    if cli.verbose {
        Level::DEBUG
    } else if cli.quiet || machine_output {
        Level::ERROR
    } else {
        Level::WARN
    }
}

/// Install the global subscriber (stderr) and apply color preferences.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let level = level_for(cli);
    let builder = FmtSubscriber::builder()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr);

    match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => {
            let subscriber = builder.with_env_filter(EnvFilter::new(directives)).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        },
        _ => {
            let subscriber = builder.with_max_level(level).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        },
    }

    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    let machine_output = cli.command.format().is_some_and(|f| f.is_machine());
    if cli.no_color || env_no_color || machine_output {
        color_control::set_override(false);
    }
    Ok(())
}
