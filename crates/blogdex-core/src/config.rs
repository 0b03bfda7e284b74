//! Configuration for blogdex.
//!
//! Settings live in a single TOML file. Every section and key is optional;
//! missing values fall back to the defaults below, which match the layout of a
//! typical blog checkout (`content/` in, `public/` out).
//!
//! ## Discovery order
//!
//! 1. An explicit path (`--config FILE` or `BLOGDEX_CONFIG`)
//! 2. `./blogdex.toml` in the working directory
//! 3. `global.toml` in the platform config directory
//! 4. Built-in defaults
//!
//! Environment variables are applied last: `BLOGDEX_CONTENT_DIR`,
//! `BLOGDEX_ARTIFACT` and `BLOGDEX_BASE_URL`.
//!
//! ## Example
//!
//! ```toml
//! [paths]
//! content_root = "posts"
//!
//! [search]
//! threshold = 0.25
//!
//! [listing]
//! pinned = ["getting-started", "rust/ownership"]
//! ```
//!
//! ```rust
//! use blogdex_core::Config;
//!
//! let config = Config::from_toml_str("[search]\nlimit = 5\n")?;
//! assert_eq!(config.search.limit, 5);
//! assert_eq!(config.listing.items_per_page, 8);
//! # Ok::<(), blogdex_core::Error>(())
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "blogdex.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Input and output locations.
    pub paths: PathsConfig,
    /// Which files are indexed.
    pub index: IndexConfig,
    /// Fuzzy search tuning.
    pub search: SearchConfig,
    /// Article listing, pagination and recommendations.
    pub listing: ListingConfig,
    /// Sitemap generation.
    pub sitemap: SitemapConfig,
    /// File watching.
    pub watch: WatchConfig,
}

/// Input and output locations, relative to the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Root of the markdown corpus.
    pub content_root: PathBuf,
    /// Where the search index artifact is written.
    pub artifact: PathBuf,
    /// File rewritten after every rebuild so dev servers notice the change.
    pub freshness_marker: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("content"),
            artifact: PathBuf::from("public/search-index.json"),
            freshness_marker: PathBuf::from("lib/force-refresh.ts"),
        }
    }
}

/// Which files the builder picks up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Markdown extensions without the dot, matched case-insensitively.
    pub extensions: Vec<String>,
    /// Index files and directories whose names start with `.`.
    pub include_hidden: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string()],
            include_hidden: false,
        }
    }
}

/// Fuzzy search tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Maximum normalized distance for a token to count as a match.
    ///
    /// `0.0` requires an exact substring, `1.0` matches anything.
    pub threshold: f64,
    /// Maximum number of results per query.
    pub limit: usize,
    /// Length of the snippet taken from the start of the body, in characters.
    pub snippet_chars: usize,
    /// Query tokens longer than this are truncated before matching.
    pub max_pattern_chars: usize,
    /// Per-field weights.
    pub weights: FieldWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            limit: 10,
            snippet_chars: 100,
            max_pattern_chars: 32,
            weights: FieldWeights::default(),
        }
    }
}

/// Relative importance of each indexed field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldWeights {
    /// Weight of the title.
    pub title: f64,
    /// Weight of the tags.
    pub tags: f64,
    /// Weight of the summary.
    pub summary: f64,
    /// Weight of the body.
    pub content: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: 1.0,
            tags: 0.8,
            summary: 0.7,
            content: 0.5,
        }
    }
}

/// Article listing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    /// Articles per page.
    pub items_per_page: usize,
    /// Pages shown on each side of the current one.
    pub visible_range: usize,
    /// Slugs always recommended first, in display order.
    pub pinned: Vec<String>,
    /// Total number of recommendations.
    pub recommend_count: usize,
    /// Slugs never listed (landing pages).
    pub excluded_slugs: Vec<String>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            items_per_page: 8,
            visible_range: 2,
            pinned: Vec::new(),
            recommend_count: 3,
            excluded_slugs: vec!["index".to_string()],
        }
    }
}

/// Sitemap settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    /// Public origin of the site.
    pub base_url: String,
    /// Where `sitemap.xml` is written.
    pub output: PathBuf,
    /// `<priority>` value for every URL.
    pub priority: String,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            output: PathBuf::from("public/sitemap.xml"),
            priority: "0.80".to_string(),
        }
    }
}

/// File watching settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatchConfig {
    /// Delay before a rebuild starts, letting editors finish their writes.
    pub settle_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { settle_ms: 100 }
    }
}

impl Config {
    /// Load configuration following the discovery order, then apply the
    /// environment and validate.
    ///
    /// An explicit path that does not exist is an error; the implicit
    /// locations are simply skipped.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match Self::discover(explicit)? {
            Some(path) => {
                tracing::debug!("loading config from {}", path.display());
                Self::from_file(&path)?
            },
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn discover(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(Error::Config(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            return Ok(Some(path.to_path_buf()));
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Ok(Some(local));
        }

        Ok(Self::global_config_path().filter(|p| p.is_file()))
    }

    /// Read and parse a config file without applying the environment.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        Self::from_toml_str(&content)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Platform config file, e.g. `~/.config/blogdex/global.toml` on Linux.
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "blogdex", "blogdex")
            .map(|dirs| dirs.config_dir().join("global.toml"))
    }

    /// Apply `BLOGDEX_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides using `lookup` in place of the process environment.
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = get("BLOGDEX_CONTENT_DIR") {
            self.paths.content_root = PathBuf::from(dir);
        }
        if let Some(artifact) = get("BLOGDEX_ARTIFACT") {
            self.paths.artifact = PathBuf::from(artifact);
        }
        if let Some(url) = get("BLOGDEX_BASE_URL") {
            self.sitemap.base_url = url;
        }
    }

    /// Reject settings that would make the pipeline misbehave.
    pub fn validate(&self) -> Result<()> {
        let search = &self.search;
        if !(0.0..=1.0).contains(&search.threshold) {
            return Err(Error::Config(format!(
                "search.threshold must be within 0.0..=1.0, got {}",
                search.threshold
            )));
        }
        if search.limit == 0 {
            return Err(Error::Config("search.limit must be at least 1".into()));
        }
        if search.max_pattern_chars == 0 {
            return Err(Error::Config(
                "search.max_pattern_chars must be at least 1".into(),
            ));
        }
        if self.listing.items_per_page == 0 {
            return Err(Error::Config(
                "listing.items_per_page must be at least 1".into(),
            ));
        }
        if self.index.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(Error::Config(
                "index.extensions must name at least one extension".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.paths.content_root, PathBuf::from("content"));
        assert_eq!(config.paths.artifact, PathBuf::from("public/search-index.json"));
        assert!((config.search.threshold - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.search.limit, 10);
        assert_eq!(config.search.snippet_chars, 100);
        assert_eq!(config.listing.items_per_page, 8);
        assert_eq!(config.listing.excluded_slugs, vec!["index"]);
        assert_eq!(config.sitemap.priority, "0.80");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        // Given: A file that only sets one nested key
        let config = Config::from_toml_str("[search.weights]\ntitle = 2.0\n").unwrap();

        // Then: Everything else is defaulted
        assert!((config.search.weights.title - 2.0).abs() < f64::EPSILON);
        assert!((config.search.weights.content - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.search.limit, 10);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = Config::from_toml_str("[search]\nthreshhold = 0.2\n").unwrap_err();
        assert_eq!(err.category(), "config");
        assert!(Config::from_toml_str("[searhc]\n").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = [
            "[search]\nthreshold = 1.5\n",
            "[search]\nlimit = 0\n",
            "[listing]\nitems_per_page = 0\n",
            "[index]\nextensions = []\n",
        ];
        for case in cases {
            let config = Config::from_toml_str(case).unwrap();
            assert!(config.validate().is_err(), "{case} should be invalid");
        }
    }

    #[test]
    fn test_env_overrides() {
        // Given: A fake environment
        let env: HashMap<&str, &str> = [
            ("BLOGDEX_CONTENT_DIR", "posts"),
            ("BLOGDEX_ARTIFACT", "dist/index.json"),
            ("BLOGDEX_BASE_URL", "  "),
        ]
        .into_iter()
        .collect();

        // When: Applying overrides
        let mut config = Config::default();
        config.apply_env_overrides_with(|k| env.get(k).map(ToString::to_string));

        // Then: Set values win, blank values are ignored
        assert_eq!(config.paths.content_root, PathBuf::from("posts"));
        assert_eq!(config.paths.artifact, PathBuf::from("dist/index.json"));
        assert_eq!(config.sitemap.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[listing]\nitems_per_page = 4\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.listing.items_per_page, 4);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
