//! blogdex CLI - content index and fuzzy search for a markdown blog
//!
//! The binary in `main.rs` is a thin wrapper around [`run`].

use anyhow::Result;
use blogdex_core::Config;
use clap::Parser;

/// Argument definitions
pub mod cli;
/// Subcommand implementations
pub mod commands;
/// Exit codes
pub mod error;
/// Output formats and renderers
pub mod output;
/// Logging and suggestion helpers
pub mod utils;

use cli::{Cli, Commands};
use error::CliError;
use utils::logging::initialize_logging;

/// Parse arguments, set up logging and configuration, then run the command.
///
/// # Errors
///
/// Returns the command's error; use [`error::exit_code_from_error`] to turn
/// it into a process exit code.
pub async fn run() -> Result<()> {
    // Convert Broken pipe panics into a clean exit
    std::panic::set_hook(Box::new(|info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe") || msg.contains("broken pipe") {
            std::process::exit(0);
        }
        eprintln!("{msg}");
    }));

    let cli = Cli::parse();
    initialize_logging(&cli)?;

    let config = Config::load(cli.config.as_deref()).map_err(CliError::usage)?;
    execute_command(cli, &config).await
}

async fn execute_command(cli: Cli, config: &Config) -> Result<()> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::Build { content, output } => commands::build(config, content, output, quiet),
        Commands::Watch {
            content,
            output,
            marker,
        } => commands::watch(config, content, output, marker, quiet).await,
        Commands::Search {
            query,
            index,
            limit,
            format,
        } => commands::search(config, &query, index, limit, format),
        Commands::Pages {
            total,
            per_page,
            page,
            range,
            format,
        } => commands::pages(config, total, per_page, page, range, format),
        Commands::List {
            folder,
            tag,
            page,
            format,
        } => commands::list(config, folder, tag, page, format),
        Commands::Recommend { format } => commands::recommend(config, format),
        Commands::Related {
            slug,
            limit,
            format,
        } => commands::related(config, &slug, limit, format),
        Commands::Sitemap { base_url, output } => {
            commands::sitemap(config, base_url, output, quiet)
        },
    }
}
