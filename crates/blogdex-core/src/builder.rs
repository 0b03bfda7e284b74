//! Document index builder.
//!
//! Walks the content root, turns every markdown file into a
//! [`DocumentRecord`] and returns them sorted by title. Building never writes
//! anything; persisting the result is [`ArtifactStore::save`](crate::ArtifactStore::save).
//!
//! A document with broken front-matter is still indexed: its metadata falls
//! back to empty values and a [`Diagnostic`] is recorded. When two files map
//! to the same slug (`post.md` and `post.markdown`), the first in scan order
//! is kept and the other becomes a diagnostic. I/O failures abort the build.

use crate::frontmatter::{self, FrontMatter};
use crate::{
    BuildReport, Config, Diagnostic, DocumentRecord, Error, Result, Severity, collation,
};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Scans a content tree and produces index records.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    root: PathBuf,
    extensions: Vec<String>,
    include_hidden: bool,
}

impl IndexBuilder {
    /// Builder for `root` with default settings (`.md`, hidden entries skipped).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: vec!["md".to_string()],
            include_hidden: false,
        }
    }

    /// Builder configured from the `[paths]` and `[index]` sections.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.paths.content_root)
            .with_extensions(config.index.extensions.clone())
            .include_hidden(config.index.include_hidden)
    }

    /// Same settings, different root.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Replace the set of indexed extensions (without the leading dot).
    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    /// Whether dot-files and dot-directories are indexed.
    #[must_use]
    pub const fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// The content root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `path` would be indexed, judged from its name alone.
    ///
    /// Used for file-system events, where the file may already be gone.
    pub fn matches(&self, path: &Path) -> bool {
        self.is_visible(path) && self.has_extension(path)
    }

    /// Whether `path` could be a directory holding documents.
    ///
    /// True for existing directories and for extensionless names under the
    /// root, since a directory that was just moved away can no longer be
    /// inspected.
    pub fn may_contain_documents(&self, path: &Path) -> bool {
        self.is_visible(path) && (path.is_dir() || path.extension().is_none())
    }

    /// Under the root and not hidden (unless hidden entries are indexed).
    pub(crate) fn is_visible(&self, path: &Path) -> bool {
        let Ok(rel) = path.strip_prefix(&self.root) else {
            return false;
        };
        self.include_hidden || !rel.components().any(|c| is_hidden_name(c.as_os_str()))
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// List indexable files in deterministic scan order.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        let meta = fs::metadata(&self.root).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("content root {}: {e}", self.root.display()),
            ))
        })?;
        if !meta.is_dir() {
            return Err(Error::NotFound(format!(
                "content root {} is not a directory",
                self.root.display()
            )));
        }

        let include_hidden = self.include_hidden;
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| include_hidden || entry.depth() == 0 || !is_hidden(entry));

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() && self.has_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    /// Build the full record set.
    pub fn build(&self) -> Result<BuildReport> {
        let started = Instant::now();
        let files = self.scan()?;
        debug!("found {} markdown files under {}", files.len(), self.root.display());

        let loaded = files
            .par_iter()
            .map(|path| self.load(path))
            .collect::<Result<Vec<_>>>()?;

        let mut records = Vec::with_capacity(loaded.len());
        let mut diagnostics = Vec::new();
        let mut seen = HashSet::with_capacity(loaded.len());
        // Scan order decides which of two colliding files keeps the slug.
        for (path, (record, diagnostic)) in files.iter().zip(loaded) {
            if !seen.insert(record.slug.clone()) {
                let duplicate = Diagnostic {
                    message: format!("duplicate slug, {} skipped", path.display()),
                    slug: record.slug,
                    severity: Severity::Warn,
                };
                warn!("{}: {}", duplicate.slug, duplicate.message);
                diagnostics.push(duplicate);
                continue;
            }
            if let Some(diagnostic) = diagnostic {
                warn!("{}: {}", diagnostic.slug, diagnostic.message);
                diagnostics.push(diagnostic);
            }
            records.push(record);
        }

        // Stable: equal titles keep scan order.
        records.sort_by(|a, b| collation::compare(&a.title, &b.title));

        info!(
            "indexed {} documents ({} warnings) in {}ms",
            records.len(),
            diagnostics.len(),
            started.elapsed().as_millis()
        );
        Ok(BuildReport {
            records,
            diagnostics,
        })
    }

    fn load(&self, path: &Path) -> Result<(DocumentRecord, Option<Diagnostic>)> {
        let with_path =
            |e: std::io::Error| Error::Io(std::io::Error::new(e.kind(), format!("{}: {e}", path.display())));

        let bytes = fs::read(path).map_err(with_path)?;
        let meta = fs::metadata(path).map_err(with_path)?;
        let modified = meta.modified().map_err(with_path)?;
        let created = meta.created().unwrap_or(modified);

        let slug = slug_for(&self.root, path)?;
        let text = String::from_utf8_lossy(&bytes);
        let (front, body, failure) = match frontmatter::split(&text) {
            Ok(split) => (split.front, split.body, None),
            Err(e) => (None, &*text, Some(e)),
        };
        let (matter, failure) = match front.map(frontmatter::parse) {
            Some(Ok(matter)) => (matter, failure),
            Some(Err(e)) => (FrontMatter::default(), Some(e)),
            None => (FrontMatter::default(), failure),
        };

        let diagnostic = failure.map(|e| Diagnostic {
            slug: slug.clone(),
            severity: Severity::Warn,
            message: format!("front-matter ignored: {e}"),
        });
        debug!("parsed {slug}");

        let record = DocumentRecord {
            title: matter.title.unwrap_or_default(),
            summary: matter.summary.unwrap_or_default(),
            tags: matter.tags,
            folder: folder_of(&slug).to_string(),
            slug,
            content: body.to_string(),
            created_at: DateTime::<Utc>::from(created),
            updated_at: DateTime::<Utc>::from(modified),
        };
        Ok((record, diagnostic))
    }
}

/// Slug for `path`: relative to `root`, extension stripped, `/`-separated.
pub fn slug_for(root: &Path, path: &Path) -> Result<String> {
    let rel = path.strip_prefix(root).map_err(|_| {
        Error::Other(format!(
            "{} is outside the content root {}",
            path.display(),
            root.display()
        ))
    })?;
    let rel = rel.with_extension("");

    let parts: Vec<_> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        return Err(Error::Other(format!("{} has no file name", path.display())));
    }
    Ok(parts.join("/"))
}

/// Directory part of a slug, `"."` at the root.
pub fn folder_of(slug: &str) -> &str {
    slug.rsplit_once('/').map_or(".", |(dir, _)| dir)
}

fn is_hidden(entry: &DirEntry) -> bool {
    is_hidden_name(entry.file_name())
}

fn is_hidden_name(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}
