//! Related command implementation

use anyhow::{Result, anyhow};
use blogdex_core::Config;
use blogdex_core::catalog;

use super::{did_you_mean, load_artifact};
use crate::error::CliError;
use crate::output::{OutputFormat, print_article_lines, print_json};
use crate::utils::suggest::suggest;

/// Execute the related command
pub fn execute(config: &Config, slug: &str, limit: usize, format: OutputFormat) -> Result<()> {
    let records = load_artifact(config)?;
    if !records.iter().any(|r| r.slug == slug) {
        let hints = suggest(slug, records.iter().map(|r| r.slug.as_str()), 3);
        return Err(CliError::not_found(anyhow!(
            "unknown article '{slug}'{}",
            did_you_mean(&hints)
        ))
        .into());
    }

    let related = catalog::related(&records, slug, limit);
    match format {
        OutputFormat::Json => print_json(&related)?,
        OutputFormat::Text if related.is_empty() => println!("No related articles"),
        OutputFormat::Text => print_article_lines(&related),
    }
    Ok(())
}
