//! Search command implementation

use anyhow::Result;
use blogdex_core::{ArtifactStore, Config, SearchHandle, SearchOptions};
use std::path::PathBuf;
use tracing::debug;

use crate::output::{OutputFormat, print_json, print_search_hits};

/// Execute the search command
pub fn execute(
    config: &Config,
    query: &[String],
    index: Option<PathBuf>,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let store = ArtifactStore::new(index.unwrap_or_else(|| config.paths.artifact.clone()));
    let handle = SearchHandle::new(SearchOptions::from(&config.search));
    let loaded = handle.reload(&store)?;
    debug!("loaded {loaded} documents from {}", store.artifact_path().display());

    let text = query.join(" ");
    let hits = handle.query(&text, limit.unwrap_or(config.search.limit))?;

    match format {
        OutputFormat::Json => print_json(&hits)?,
        OutputFormat::Text if hits.is_empty() => println!("No results for '{text}'"),
        OutputFormat::Text => print_search_hits(&hits),
    }
    Ok(())
}
