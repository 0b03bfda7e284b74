//! blogdex CLI entry point

use std::process::ExitCode;

use blogdex_cli::error::{CliError, exit_code_from_error};
use colored::Colorize;

#[tokio::main]
async fn main() -> ExitCode {
    match blogdex_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = err
                .downcast_ref::<CliError>()
                .map_or_else(|| format!("{err:#}"), |cli_err| format!("{:#}", cli_err.source));
            eprintln!("{} {message}", "error:".red().bold());
            ExitCode::from(exit_code_from_error(&err))
        },
    }
}
