//! Command implementations, one module per subcommand.

mod build;
mod list;
mod pages;
mod recommend;
mod related;
mod search;
mod sitemap;
mod watch;

pub use build::execute as build;
pub use list::execute as list;
pub use pages::execute as pages;
pub use recommend::execute as recommend;
pub use related::execute as related;
pub use search::execute as search;
pub use sitemap::execute as sitemap;
pub use watch::execute as watch;

use anyhow::{Context, Result};
use blogdex_core::{ArtifactStore, Config, DocumentRecord};

/// Records from the configured artifact.
fn load_artifact(config: &Config) -> Result<Vec<DocumentRecord>> {
    let store = ArtifactStore::new(&config.paths.artifact);
    store
        .load()
        .with_context(|| format!("Failed to load {}", store.artifact_path().display()))
}

/// `". Did you mean: a, b?"`, or nothing without suggestions.
fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(". Did you mean: {}?", suggestions.join(", "))
    }
}
