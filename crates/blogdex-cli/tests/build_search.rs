#![allow(clippy::unwrap_used)]

mod common;

use common::{blogdex_cmd, built_site, site, stdout_json, write_post};
use predicates::prelude::*;
use std::fs;

#[test]
fn build_writes_the_artifact() {
    let dir = site();

    blogdex_cmd(dir.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Indexed 4 documents"));

    let artifact = dir.path().join("public/search-index.json");
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(artifact).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 4);
    assert!(json[0].get("createdAt").is_some());
}

#[test]
fn build_honors_content_and_output_flags() {
    let dir = site();
    fs::rename(dir.path().join("content"), dir.path().join("posts")).unwrap();

    blogdex_cmd(dir.path())
        .args(["build", "--content", "posts", "--output", "out/index.json"])
        .assert()
        .success();

    assert!(dir.path().join("out/index.json").is_file());
}

#[test]
fn build_reports_broken_front_matter_and_continues() {
    let dir = site();
    fs::write(
        dir.path().join("content/broken.md"),
        "---\ntitle: \"unterminated\n---\nStill indexed\n",
    )
    .unwrap();

    blogdex_cmd(dir.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Indexed 5 documents"))
        .stderr(predicate::str::contains("broken"));
}

#[test]
fn build_without_content_root_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();

    blogdex_cmd(dir.path())
        .arg("build")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("content root"));
}

#[test]
fn search_json_ranks_exact_title_first() {
    let dir = built_site();

    let output = blogdex_cmd(dir.path())
        .args(["search", "understanding", "ownership", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let hits = stdout_json(&output);
    assert_eq!(hits[0]["id"], "rust/ownership");
    assert_eq!(hits[0]["title"], "Understanding Ownership");
    assert!(hits[0]["surrounding_text"].as_str().unwrap().starts_with("Moves"));
    assert!(hits[0]["score"].as_f64().unwrap() > 0.0);
}

#[test]
fn search_tolerates_typos_and_respects_limit() {
    let dir = built_site();

    let output = blogdex_cmd(dir.path())
        .args(["search", "flexbx", "-f", "json"])
        .output()
        .unwrap();
    assert_eq!(stdout_json(&output)[0]["id"], "web/flexbox");

    let output = blogdex_cmd(dir.path())
        .args(["search", "rust", "-l", "1", "-f", "json"])
        .output()
        .unwrap();
    assert_eq!(stdout_json(&output).as_array().unwrap().len(), 1);
}

#[test]
fn search_text_reports_no_results() {
    let dir = built_site();

    blogdex_cmd(dir.path())
        .args(["search", "quantum", "zymurgy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results for 'quantum zymurgy'"));
}

#[test]
fn search_sees_new_posts_after_rebuild() {
    let dir = built_site();
    write_post(dir.path(), "web/grid.md", "Grid Areas", "[css]", "Named areas.");

    blogdex_cmd(dir.path()).arg("build").assert().success();

    let output = blogdex_cmd(dir.path())
        .args(["search", "grid", "areas", "-f", "json"])
        .output()
        .unwrap();
    assert_eq!(stdout_json(&output)[0]["id"], "web/grid");
}

#[test]
fn search_without_artifact_exits_not_found() {
    let dir = site();

    blogdex_cmd(dir.path())
        .args(["search", "ownership"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no search index"));
}

#[test]
fn search_with_corrupt_artifact_exits_integrity() {
    let dir = built_site();
    fs::write(dir.path().join("public/search-index.json"), "{ not json").unwrap();

    blogdex_cmd(dir.path())
        .args(["search", "ownership"])
        .assert()
        .code(6);
}

#[test]
fn local_config_file_is_used() {
    let dir = site();
    fs::write(
        dir.path().join("blogdex.toml"),
        "[paths]\nartifact = \"dist/index.json\"\n",
    )
    .unwrap();

    blogdex_cmd(dir.path()).arg("build").assert().success();
    assert!(dir.path().join("dist/index.json").is_file());

    blogdex_cmd(dir.path())
        .args(["search", "trait", "-f", "json"])
        .assert()
        .success();
}

#[test]
fn invalid_config_is_a_usage_error() {
    let dir = site();
    fs::write(dir.path().join("blogdex.toml"), "[search]\nthreshold = 2.0\n").unwrap();

    blogdex_cmd(dir.path())
        .arg("build")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("threshold"));
}
