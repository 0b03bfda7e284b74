//! Recommend command implementation

use anyhow::Result;
use blogdex_core::Config;
use blogdex_core::catalog;
use tracing::debug;

use super::load_artifact;
use crate::output::{OutputFormat, print_article_lines, print_json};

/// Execute the recommend command
pub fn execute(config: &Config, format: OutputFormat) -> Result<()> {
    let records = load_artifact(config)?;
    let listing = &config.listing;

    for slug in &listing.pinned {
        if !records.iter().any(|r| &r.slug == slug) {
            debug!("pinned article '{slug}' is not in the index");
        }
    }

    let picked = catalog::recommend(
        &records,
        &listing.pinned,
        listing.recommend_count,
        &listing.excluded_slugs,
    );

    match format {
        OutputFormat::Json => print_json(&picked)?,
        OutputFormat::Text => print_article_lines(&picked),
    }
    Ok(())
}
