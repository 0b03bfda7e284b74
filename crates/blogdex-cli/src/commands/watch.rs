//! Watch command implementation

use anyhow::Result;
use blogdex_core::watcher::{self, RebuildListener};
use blogdex_core::{ArtifactStore, BuildSummary, Coalescer, Config, IndexBuilder, IndexPipeline};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Execute the watch command, returning after Ctrl-C.
pub async fn execute(
    config: &Config,
    content: Option<PathBuf>,
    output: Option<PathBuf>,
    marker: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let mut builder = IndexBuilder::from_config(config);
    if let Some(content) = content {
        builder = builder.with_root(content);
    }
    let store = ArtifactStore::new(output.unwrap_or_else(|| config.paths.artifact.clone()))
        .with_marker(marker.unwrap_or_else(|| config.paths.freshness_marker.clone()));

    let marker_store = store.clone();
    let on_rebuilt: RebuildListener = Arc::new(move |summary: &BuildSummary| {
        if let Err(e) = marker_store.touch_marker() {
            warn!("failed to touch freshness marker: {e}");
        }
        if !quiet {
            println!(
                "{} {} rebuilt: {} documents, {} warnings",
                chrono::Local::now().format("%H:%M:%S").to_string().bright_black(),
                "✓".green(),
                summary.documents,
                summary.warnings
            );
        }
    });

    let coalescer = Coalescer::new(
        IndexPipeline::new(builder.clone(), store),
        Duration::from_millis(config.watch.settle_ms),
        on_rebuilt,
    );

    if !quiet {
        eprintln!(
            "Watching {} (press Ctrl-C to stop)",
            builder.root().display().to_string().cyan()
        );
    }

    watcher::watch(&builder, coalescer, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl-C: {e}");
        }
    })
    .await?;
    Ok(())
}
