#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// A `blogdex` command running inside `site` with a clean environment.
#[allow(dead_code)]
pub fn blogdex_cmd(site: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("blogdex"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.current_dir(site);
    cmd.env("NO_COLOR", "1");
    for var in [
        "BLOGDEX_CONFIG",
        "BLOGDEX_CONTENT_DIR",
        "BLOGDEX_ARTIFACT",
        "BLOGDEX_BASE_URL",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    // Keep a developer's global config out of the tests.
    cmd.env("XDG_CONFIG_HOME", site.join(".config"));
    cmd.env("HOME", site);
    cmd
}

#[allow(dead_code)]
pub fn write_post(site: &Path, rel: &str, title: &str, tags: &str, body: &str) {
    let path = site.join("content").join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        path,
        format!("---\ntitle: {title}\nsummary: Notes on {title}\ntags: {tags}\n---\n{body}\n"),
    )
    .unwrap();
}

/// A small blog: a landing page plus two rust posts and one css post.
#[allow(dead_code)]
pub fn site() -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create site dir");
    let root = dir.path();
    write_post(root, "index.md", "Home", "[]", "Welcome to the blog.");
    write_post(
        root,
        "rust/ownership.md",
        "Understanding Ownership",
        "[rust]",
        "Moves, borrows and lifetimes in practice.",
    );
    write_post(
        root,
        "rust/traits.md",
        "Trait Objects",
        "[rust, dispatch]",
        "Dynamic dispatch with dyn.",
    );
    write_post(
        root,
        "web/flexbox.md",
        "Flexbox Layouts",
        "[css]",
        "Aligning items along the main axis.",
    );
    dir
}

/// [`site`] with its search index already built.
#[allow(dead_code)]
pub fn built_site() -> TempDir {
    let dir = site();
    blogdex_cmd(dir.path()).arg("build").assert().success();
    dir
}

#[allow(dead_code)]
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}
