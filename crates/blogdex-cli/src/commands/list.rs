//! List command implementation

use anyhow::{Result, anyhow};
use blogdex_core::Config;
use blogdex_core::catalog::{self, ArticleFilter};
use colored::Colorize;
use std::collections::BTreeMap;

use super::{did_you_mean, load_artifact};
use crate::error::CliError;
use crate::output::{OutputFormat, print_article_lines, print_json};
use crate::utils::suggest::suggest;

/// Execute the list command
pub fn execute(
    config: &Config,
    folder: Option<String>,
    tag: Option<String>,
    page: usize,
    format: OutputFormat,
) -> Result<()> {
    let records = load_artifact(config)?;
    if let Some(folder) = &folder {
        ensure_known("folder", folder, &catalog::folders(&records))?;
    }
    if let Some(tag) = &tag {
        ensure_known("tag", tag, &catalog::tags(&records))?;
    }

    let filter = ArticleFilter { folder, tag };
    let listing = catalog::list_articles(&records, &filter, &config.listing.excluded_slugs);
    let page = catalog::paginate(
        &listing,
        config.listing.items_per_page,
        page,
        config.listing.visible_range,
    );

    match format {
        OutputFormat::Json => print_json(&page)?,
        OutputFormat::Text => {
            if page.items.is_empty() {
                println!("No articles on page {}", page.page);
            } else {
                print_article_lines(&page.items);
            }
            if page.window.has_multiple_pages() {
                println!();
                println!(
                    "{} {}",
                    format!("Page {} of {}:", page.page, page.window.total_pages).bright_black(),
                    page.window
                );
            }
        },
    }
    Ok(())
}

fn ensure_known(kind: &str, name: &str, known: &BTreeMap<String, usize>) -> Result<()> {
    if known.contains_key(name) {
        return Ok(());
    }
    let hints = suggest(name, known.keys().map(String::as_str), 3);
    Err(CliError::not_found(anyhow!("unknown {kind} '{name}'{}", did_you_mean(&hints))).into())
}
