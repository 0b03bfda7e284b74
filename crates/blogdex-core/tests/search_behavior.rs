#![allow(clippy::unwrap_used)]

use blogdex_core::{ArtifactStore, IndexBuilder, SearchHandle, SearchIndex, SearchOptions};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, title: &str, tags: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        path,
        format!("---\ntitle: {title}\nsummary: Notes on {title}\ntags: {tags}\n---\n{body}"),
    )
    .unwrap();
}

fn built_store() -> (TempDir, ArtifactStore) {
    let dir = TempDir::new().unwrap();
    let content = dir.path().join("content");
    write(&content, "rust/ownership.md", "Understanding Ownership", "[rust]", "Moves, borrows and lifetimes in practice.");
    write(&content, "rust/ownership-faq.md", "Understanding Ownership FAQ", "[rust, faq]", "Short answers.");
    write(&content, "rust/traits.md", "Trait Objects", "[rust]", "Dynamic dispatch with dyn.");
    write(&content, "web/flexbox.md", "Flexbox Layouts", "[css]", "Aligning items along the main axis.");

    let store = ArtifactStore::new(dir.path().join("public").join("search-index.json"));
    let report = IndexBuilder::new(&content).build().unwrap();
    store.save(&report.records).unwrap();
    (dir, store)
}

#[test]
fn exact_title_ranks_first() {
    let (_dir, store) = built_store();
    let index = SearchIndex::load(&store, SearchOptions::default()).unwrap();

    let hits = index.query("Understanding Ownership", 10);

    assert_eq!(hits[0].id, "rust/ownership");
    assert_eq!(hits[0].title, "Understanding Ownership");
    assert_eq!(hits[1].id, "rust/ownership-faq");
}

#[test]
fn transposed_title_still_matches() {
    let (_dir, store) = built_store();
    let index = SearchIndex::load(&store, SearchOptions::default()).unwrap();

    let hits = index.query("Trait Obejcts", 10);

    assert!(!hits.is_empty());
    assert_eq!(hits[0].id, "rust/traits");
}

#[test]
fn unrelated_query_returns_nothing() {
    let (_dir, store) = built_store();
    let index = SearchIndex::load(&store, SearchOptions::default()).unwrap();

    assert!(index.query("quantum zymurgy", 10).is_empty());
}

#[test]
fn results_carry_prefix_snippets_and_respect_limit() {
    let (_dir, store) = built_store();
    let options = SearchOptions {
        snippet_chars: 10,
        ..SearchOptions::default()
    };
    let index = SearchIndex::load(&store, options).unwrap();

    let hits = index.query("rust", 2);

    assert_eq!(hits.len(), 2);
    for hit in &hits {
        assert!(hit.snippet.chars().count() <= 10);
    }
    let ownership = index.query("lifetimes", 10);
    assert_eq!(ownership[0].snippet, "Moves, bor");
}

#[test]
fn handle_reports_not_ready_then_reloads() {
    // Given: A handle with nothing loaded
    let (dir, store) = built_store();
    let handle = SearchHandle::new(SearchOptions::default());
    assert_eq!(handle.query("flexbox", 10).unwrap_err().category(), "not_ready");

    // When: Loading the artifact
    assert_eq!(handle.reload(&store).unwrap(), 4);

    // Then: Queries work
    assert_eq!(handle.query("flexbox", 10).unwrap()[0].id, "web/flexbox");

    // When: The corpus changes and the artifact is rebuilt
    let content = dir.path().join("content");
    write(&content, "web/grid.md", "Grid Areas", "[css]", "Named template areas.");
    let report = IndexBuilder::new(&content).build().unwrap();
    store.save(&report.records).unwrap();
    assert_eq!(handle.reload(&store).unwrap(), 5);

    // Then: New documents are searchable without a new handle
    assert_eq!(handle.query("grid areas", 10).unwrap()[0].id, "web/grid");
}

#[test]
fn failed_reload_keeps_previous_index() {
    let (_dir, store) = built_store();
    let handle = SearchHandle::new(SearchOptions::default());
    handle.reload(&store).unwrap();

    fs::write(store.artifact_path(), "not json").unwrap();
    let err = handle.reload(&store).unwrap_err();

    assert_eq!(err.category(), "index");
    assert_eq!(handle.snapshot().unwrap().len(), 4);
}

#[test]
fn concurrent_queries_share_one_index() {
    let (_dir, store) = built_store();
    let handle = Arc::new(SearchHandle::new(SearchOptions::default()));
    handle.reload(&store).unwrap();

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let handle = Arc::clone(&handle);
            thread::spawn(move || {
                for _ in 0..20 {
                    let hits = handle.query("ownership", 10).unwrap();
                    assert_eq!(hits.len(), 2, "worker {i}");
                }
            })
        })
        .collect();
    for _ in 0..5 {
        handle.reload(&store).unwrap();
    }
    for worker in workers {
        worker.join().unwrap();
    }
}
