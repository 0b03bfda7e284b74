//! Article listings built on top of an artifact: filtered and paginated lists,
//! recommendations, related posts and folder/tag navigation maps.

use crate::DocumentRecord;
use crate::pagination::{PageWindow, page_bounds, window};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Restricts a listing to one folder and/or one tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    /// Exact folder, e.g. `"rust"` or `"."` for the root.
    pub folder: Option<String>,
    /// Tag the article must carry.
    pub tag: Option<String>,
}

impl ArticleFilter {
    /// Whether `record` passes the filter.
    pub fn accepts(&self, record: &DocumentRecord) -> bool {
        self.folder.as_ref().is_none_or(|f| &record.folder == f)
            && self.tag.as_ref().is_none_or(|t| record.has_tag(t))
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize)]
pub struct ArticlePage<'a> {
    /// Articles on this page.
    pub items: Vec<&'a DocumentRecord>,
    /// Paginator entries.
    pub window: PageWindow,
    /// Requested page (at least 1).
    pub page: usize,
    /// Size of the whole listing.
    pub total_items: usize,
}

/// Articles in artifact order, minus `excluded` slugs, narrowed by `filter`.
pub fn list_articles<'a>(
    records: &'a [DocumentRecord],
    filter: &ArticleFilter,
    excluded: &[String],
) -> Vec<&'a DocumentRecord> {
    records
        .iter()
        .filter(|r| !excluded.contains(&r.slug))
        .filter(|r| filter.accepts(r))
        .collect()
}

/// Slice `items` to `page` and compute its paginator.
pub fn paginate<'a>(
    items: &[&'a DocumentRecord],
    per_page: usize,
    page: usize,
    visible_range: usize,
) -> ArticlePage<'a> {
    let page = page.max(1);
    let bounds = page_bounds(items.len(), per_page, page);
    ArticlePage {
        items: items[bounds].to_vec(),
        window: window(items.len(), per_page, page, visible_range),
        page,
        total_items: items.len(),
    }
}

/// Pinned articles first, then the most recently updated ones, `count` in total.
///
/// Unknown pinned slugs are skipped. `excluded` slugs are never added by the
/// recency fill.
pub fn recommend<'a>(
    records: &'a [DocumentRecord],
    pinned: &[String],
    count: usize,
    excluded: &[String],
) -> Vec<&'a DocumentRecord> {
    let mut picked: Vec<&DocumentRecord> = Vec::with_capacity(count);
    let mut seen: HashSet<&str> = HashSet::new();

    for slug in pinned {
        if picked.len() == count {
            return picked;
        }
        if let Some(record) = records.iter().find(|r| &r.slug == slug) {
            if seen.insert(record.slug.as_str()) {
                picked.push(record);
            }
        }
    }

    for record in by_recency(records.iter()) {
        if picked.len() == count {
            break;
        }
        if !excluded.contains(&record.slug) && seen.insert(record.slug.as_str()) {
            picked.push(record);
        }
    }
    picked
}

/// Other articles in the same folder as `slug`, most recently updated first.
///
/// Empty when `slug` is unknown.
pub fn related<'a>(records: &'a [DocumentRecord], slug: &str, count: usize) -> Vec<&'a DocumentRecord> {
    let Some(origin) = records.iter().find(|r| r.slug == slug) else {
        return Vec::new();
    };
    by_recency(
        records
            .iter()
            .filter(|r| r.folder == origin.folder && r.slug != origin.slug),
    )
    .into_iter()
    .take(count)
    .collect()
}

/// Article count per folder, sorted by folder name.
pub fn folders(records: &[DocumentRecord]) -> BTreeMap<String, usize> {
    let mut map = BTreeMap::new();
    for record in records {
        *map.entry(record.folder.clone()).or_insert(0) += 1;
    }
    map
}

/// Article count per tag, sorted by tag.
pub fn tags(records: &[DocumentRecord]) -> BTreeMap<String, usize> {
    let mut map = BTreeMap::new();
    for record in records {
        for tag in &record.tags {
            *map.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    map
}

/// Newest first; ties keep their input order.
fn by_recency<'a>(records: impl Iterator<Item = &'a DocumentRecord>) -> Vec<&'a DocumentRecord> {
    let mut sorted: Vec<_> = records.collect();
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    sorted
}
