//! Pages command implementation

use anyhow::Result;
use blogdex_core::Config;
use blogdex_core::pagination::window;

use crate::error::CliError;
use crate::output::{OutputFormat, print_json};

/// Execute the pages command
pub fn execute(
    config: &Config,
    total: usize,
    per_page: Option<usize>,
    page: usize,
    range: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let per_page = per_page.unwrap_or(config.listing.items_per_page);
    if per_page == 0 {
        return Err(CliError::usage(anyhow::anyhow!("--per-page must be at least 1")).into());
    }
    let window = window(
        total,
        per_page,
        page,
        range.unwrap_or(config.listing.visible_range),
    );

    match format {
        OutputFormat::Json => print_json(&window)?,
        OutputFormat::Text if window.tokens.is_empty() => println!("(no pages)"),
        OutputFormat::Text => println!("{window}"),
    }
    Ok(())
}
