//! # blogdex-core
//!
//! Content indexing and fuzzy search for a markdown blog.
//!
//! The pipeline scans a directory of markdown posts, extracts front-matter
//! metadata, writes a single JSON search index, keeps that index current while
//! posts change, and answers typo-tolerant queries against it.
//!
//! ## Architecture
//!
//! - **Builder** ([`IndexBuilder`]): content tree to sorted [`DocumentRecord`]s
//! - **Storage** ([`ArtifactStore`]): atomic artifact writes and the freshness marker
//! - **Watcher** ([`watcher`]): coalesced, serialized rebuilds on file changes
//! - **Search** ([`SearchIndex`], [`SearchHandle`]): weighted approximate matching
//! - **Pagination** ([`pagination`]): page windows with ellipsis collapsing
//! - **Catalog** ([`catalog`]) and **sitemap** ([`sitemap`]): derived site views
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blogdex_core::{ArtifactStore, Config, IndexBuilder, SearchHandle, SearchOptions};
//!
//! let config = Config::load(None)?;
//! let report = IndexBuilder::from_config(&config).build()?;
//!
//! let store = ArtifactStore::new(&config.paths.artifact);
//! store.save(&report.records)?;
//!
//! let search = SearchHandle::new(SearchOptions::from(&config.search));
//! search.reload(&store)?;
//! for hit in search.query("ownership", 10)? {
//!     println!("{} {}", hit.id, hit.title);
//! }
//! # Ok::<(), blogdex_core::Error>(())
//! ```

/// Index builder: scanning, parsing and sorting documents
pub mod builder;
/// Filtered listings, recommendations and navigation maps
pub mod catalog;
/// Title ordering
pub mod collation;
/// Configuration loading and validation
pub mod config;
/// Error types and result aliases
pub mod error;
/// Front-matter splitting and parsing
pub mod frontmatter;
/// Pagination windows
pub mod pagination;
/// Fuzzy search engine
pub mod search;
/// Approximate string matching primitives
pub mod similarity;
/// Sitemap rendering
pub mod sitemap;
/// Artifact persistence
pub mod storage;
/// Core data structures
pub mod types;
/// File watching and coalesced rebuilds
pub mod watcher;

pub use builder::IndexBuilder;
pub use config::Config;
pub use error::{Error, Result};
pub use search::{SearchHandle, SearchIndex, SearchOptions};
pub use storage::ArtifactStore;
pub use types::{BuildReport, BuildSummary, Diagnostic, DocumentRecord, SearchResult, Severity};
pub use watcher::{Coalescer, IndexPipeline, Rebuild, RebuildGate};
