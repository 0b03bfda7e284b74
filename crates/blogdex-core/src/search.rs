//! Fuzzy search over index records.
//!
//! [`SearchIndex`] is an immutable structure built from one artifact.
//! [`SearchHandle`] owns the currently active index and swaps in a new one on
//! reload while queries against the old one finish undisturbed.
//!
//! ## Matching
//!
//! A query is lowercased and split on whitespace. A document matches when every
//! token is within `threshold` of its title, summary, one of its tags or its
//! body (see [`similarity`](crate::similarity::similarity)). The document
//! score is the mean over tokens of the best `weight * (1 - distance)`.
//!
//! ```rust
//! use blogdex_core::{DocumentRecord, SearchIndex, SearchOptions};
//! use chrono::Utc;
//!
//! let now = Utc::now();
//! let records = vec![DocumentRecord {
//!     title: "Pinning in async Rust".into(),
//!     summary: String::new(),
//!     tags: vec!["rust".into()],
//!     slug: "rust/pin".into(),
//!     folder: "rust".into(),
//!     content: "Why futures must not move.".into(),
//!     created_at: now,
//!     updated_at: now,
//! }];
//!
//! let index = SearchIndex::build(&records, SearchOptions::default());
//! let hits = index.query("pinnign", 10);
//! assert_eq!(hits[0].id, "rust/pin");
//! ```

use crate::config::{FieldWeights, SearchConfig};
use crate::similarity::{edit_ratio, substring_distance_ratio};
use crate::{ArtifactStore, DocumentRecord, Error, Result, SearchResult};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;
use tracing::{debug, info};

/// Query tuning, usually taken from the `[search]` config section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Maximum normalized distance for a token match.
    pub threshold: f64,
    /// Default result cap for [`SearchIndex::search`].
    pub limit: usize,
    /// Snippet length in characters.
    pub snippet_chars: usize,
    /// Longest query token considered, in characters.
    pub max_pattern_chars: usize,
    /// Per-field weights.
    pub weights: FieldWeights,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            threshold: config.threshold,
            limit: config.limit,
            snippet_chars: config.snippet_chars,
            max_pattern_chars: config.max_pattern_chars,
            weights: config.weights,
        }
    }
}

#[derive(Debug)]
struct IndexedDocument {
    id: String,
    title: String,
    snippet: String,
    title_chars: Vec<char>,
    summary_chars: Vec<char>,
    tag_chars: Vec<Vec<char>>,
    content_chars: Vec<char>,
}

impl IndexedDocument {
    fn new(record: &DocumentRecord, snippet_chars: usize) -> Self {
        Self {
            id: record.slug.clone(),
            title: record.title.clone(),
            snippet: record.content.chars().take(snippet_chars).collect(),
            title_chars: folded(&record.title),
            summary_chars: folded(&record.summary),
            tag_chars: record.tags.iter().map(|t| folded(t)).collect(),
            content_chars: folded(&record.content),
        }
    }

    /// Best weighted relevance of `token` over all fields, if any field matches.
    fn token_relevance(&self, token: &[char], options: &SearchOptions) -> Option<f64> {
        let w = &options.weights;
        let fields = [
            (w.title, self.title_chars.as_slice()),
            (w.summary, self.summary_chars.as_slice()),
            (w.content, self.content_chars.as_slice()),
        ];
        let tags = self.tag_chars.iter().map(|t| (w.tags, t.as_slice()));

        fields
            .into_iter()
            .chain(tags)
            .filter(|(_, text)| !text.is_empty())
            .filter_map(|(weight, text)| {
                let distance = substring_distance_ratio(token, text);
                (distance <= options.threshold).then(|| weight * (1.0 - distance))
            })
            .max_by(f64::total_cmp)
    }
}

fn folded(text: &str) -> Vec<char> {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Searchable structure built from one artifact.
#[derive(Debug)]
pub struct SearchIndex {
    documents: Vec<IndexedDocument>,
    options: SearchOptions,
}

struct Candidate {
    position: usize,
    score: f64,
    title_distance: f64,
}

impl SearchIndex {
    /// Build the structure from records in artifact order.
    pub fn build(records: &[DocumentRecord], options: SearchOptions) -> Self {
        let documents = records
            .par_iter()
            .map(|record| IndexedDocument::new(record, options.snippet_chars))
            .collect();
        Self { documents, options }
    }

    /// Build from the artifact held by `store`.
    pub fn load(store: &ArtifactStore, options: SearchOptions) -> Result<Self> {
        let records = store.load()?;
        Ok(Self::build(&records, options))
    }

    /// Number of searchable documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Options the index was built with.
    pub const fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Query with the configured default limit.
    pub fn search(&self, text: &str) -> Vec<SearchResult> {
        self.query(text, self.options.limit)
    }

    /// Ranked matches for `text`, at most `limit` of them.
    pub fn query(&self, text: &str, limit: usize) -> Vec<SearchResult> {
        let lowered = text.to_lowercase();
        let tokens: Vec<Vec<char>> = lowered
            .split_whitespace()
            .map(|t| t.chars().take(self.options.max_pattern_chars).collect())
            .collect();
        if tokens.is_empty() || limit == 0 {
            return Vec::new();
        }
        let started = Instant::now();
        let whole: Vec<char> = tokens.join(&' ');

        let mut candidates: Vec<Candidate> = self
            .documents
            .par_iter()
            .enumerate()
            .filter_map(|(position, doc)| {
                let mut total = 0.0;
                for token in &tokens {
                    total += doc.token_relevance(token, &self.options)?;
                }
                #[allow(clippy::cast_precision_loss)]
                let score = total / tokens.len() as f64;
                Some(Candidate {
                    position,
                    score,
                    title_distance: edit_ratio(&whole, &doc.title_chars),
                })
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.title_distance.total_cmp(&b.title_distance))
                .then_with(|| a.position.cmp(&b.position))
        });
        let matched = candidates.len();
        candidates.truncate(limit);

        debug!(
            "query {text:?}: {matched} matches in {}µs",
            started.elapsed().as_micros()
        );
        candidates
            .into_iter()
            .map(|c| {
                let doc = &self.documents[c.position];
                SearchResult {
                    id: doc.id.clone(),
                    title: doc.title.clone(),
                    snippet: doc.snippet.clone(),
                    score: c.score,
                }
            })
            .collect()
    }
}

/// Shared, reloadable handle to the active [`SearchIndex`].
///
/// Reloads build the new index before taking the write lock, and queries
/// hold the read lock only long enough to clone an `Arc`, so a reload never
/// blocks behind a slow query and a query never sees a half-built index.
#[derive(Debug, Default)]
pub struct SearchHandle {
    active: RwLock<Option<Arc<SearchIndex>>>,
    options: SearchOptions,
}

impl SearchHandle {
    /// Empty handle; queries fail with [`Error::NotReady`] until the first install.
    pub fn new(options: SearchOptions) -> Self {
        Self {
            active: RwLock::new(None),
            options,
        }
    }

    /// Build an index from `records` and make it the active one.
    pub fn install(&self, records: &[DocumentRecord]) -> usize {
        let index = Arc::new(SearchIndex::build(records, self.options));
        let count = index.len();
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = Some(index);
        count
    }

    /// Rebuild from the artifact in `store`.
    ///
    /// On failure the previously active index stays in place.
    pub fn reload(&self, store: &ArtifactStore) -> Result<usize> {
        let records = store.load()?;
        let count = self.install(&records);
        info!(
            "search index reloaded from {} ({count} documents)",
            store.artifact_path().display()
        );
        Ok(count)
    }

    /// Whether an index has been installed.
    pub fn is_ready(&self) -> bool {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The active index.
    pub fn snapshot(&self) -> Result<Arc<SearchIndex>> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| Error::NotReady("no search index has been loaded".into()))
    }

    /// Query the active index.
    pub fn query(&self, text: &str, limit: usize) -> Result<Vec<SearchResult>> {
        Ok(self.snapshot()?.query(text, limit))
    }
}
