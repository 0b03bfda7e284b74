//! Sitemap command implementation

use anyhow::Result;
use blogdex_core::builder::slug_for;
use blogdex_core::sitemap::render_sitemap;
use blogdex_core::{ArtifactStore, Config, IndexBuilder};
use chrono::Utc;
use colored::Colorize;
use std::path::PathBuf;

/// Execute the sitemap command
///
/// Slugs come straight from the content tree, so no artifact is needed.
pub fn execute(
    config: &Config,
    base_url: Option<String>,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let builder = IndexBuilder::from_config(config);
    let slugs = builder
        .scan()?
        .iter()
        .map(|path| slug_for(builder.root(), path))
        .collect::<blogdex_core::Result<Vec<_>>>()?;

    let base_url = base_url.unwrap_or_else(|| config.sitemap.base_url.clone());
    let xml = render_sitemap(
        &base_url,
        slugs.iter().map(String::as_str),
        Utc::now(),
        &config.sitemap.priority,
    );

    let output = output.unwrap_or_else(|| config.sitemap.output.clone());
    ArtifactStore::new(&config.paths.artifact).write_text(&output, &xml)?;

    if !quiet {
        println!(
            "{} sitemap.xml written to {} ({} urls)",
            "✓".green(),
            output.display(),
            slugs.len() + 2
        );
    }
    Ok(())
}
