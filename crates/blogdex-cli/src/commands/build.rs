//! Build command implementation

use anyhow::Result;
use blogdex_core::{ArtifactStore, Config, IndexBuilder};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Instant;

/// Execute the build command
pub fn execute(
    config: &Config,
    content: Option<PathBuf>,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let mut builder = IndexBuilder::from_config(config);
    if let Some(content) = content {
        builder = builder.with_root(content);
    }
    let store = ArtifactStore::new(output.unwrap_or_else(|| config.paths.artifact.clone()));

    let started = Instant::now();
    let report = builder.build()?;
    store.save(&report.records)?;

    for diagnostic in &report.diagnostics {
        eprintln!(
            "{} {}: {}",
            "warning:".yellow().bold(),
            diagnostic.slug,
            diagnostic.message
        );
    }
    if !quiet {
        println!(
            "{} Indexed {} documents into {} ({} warnings, {:.0?})",
            "✓".green(),
            report.len(),
            store.artifact_path().display(),
            report.diagnostics.len(),
            started.elapsed()
        );
    }
    Ok(())
}
