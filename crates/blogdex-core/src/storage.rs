//! Persistence for the search index artifact and the other generated files.
//!
//! Every write goes to a sibling `.tmp` file first and is then renamed over the
//! target, so a reader sees either the old file or the new one, never a
//! partial write.

use crate::{DocumentRecord, Error, Result};
use chrono::{SecondsFormat, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Location of the artifact and the freshness marker.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    artifact_path: PathBuf,
    marker_path: Option<PathBuf>,
}

impl ArtifactStore {
    /// Store writing the artifact to `artifact_path`, without a freshness marker.
    pub fn new(artifact_path: impl Into<PathBuf>) -> Self {
        Self {
            artifact_path: artifact_path.into(),
            marker_path: None,
        }
    }

    /// Rewrite `marker_path` after every save via [`touch_marker`](Self::touch_marker).
    #[must_use]
    pub fn with_marker(mut self, marker_path: impl Into<PathBuf>) -> Self {
        self.marker_path = Some(marker_path.into());
        self
    }

    /// Where the artifact lives.
    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// Where the freshness marker lives, if any.
    pub fn marker_path(&self) -> Option<&Path> {
        self.marker_path.as_deref()
    }

    /// Serialize `records` and atomically replace the artifact.
    pub fn save(&self, records: &[DocumentRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        write_atomic(&self.artifact_path, json.as_bytes())?;
        debug!(
            "wrote {} records to {}",
            records.len(),
            self.artifact_path.display()
        );
        Ok(())
    }

    /// Read the artifact back.
    ///
    /// Returns [`Error::NotFound`] when no artifact has been written yet and
    /// [`Error::Index`] when the file is not a valid artifact.
    pub fn load(&self) -> Result<Vec<DocumentRecord>> {
        let bytes = match fs::read(&self.artifact_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(format!(
                    "no search index at {}",
                    self.artifact_path.display()
                )));
            },
            Err(e) => return Err(Error::Io(e)),
        };
        serde_json::from_slice(&bytes).map_err(|e| {
            Error::Index(format!(
                "{} is not a valid search index: {e}",
                self.artifact_path.display()
            ))
        })
    }

    /// Rewrite the freshness marker with the current time.
    ///
    /// Does nothing when the store has no marker.
    pub fn touch_marker(&self) -> Result<()> {
        let Some(marker) = &self.marker_path else {
            return Ok(());
        };
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        write_atomic(marker, format!("// refreshed at {stamp}\n").as_bytes())
    }

    /// Atomically write any other generated file, such as the sitemap.
    pub fn write_text(&self, path: &Path, contents: &str) -> Result<()> {
        write_atomic(path, contents.as_bytes())
    }
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| Error::Storage(format!("Failed to create {}: {e}", parent.display())))?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, contents)
        .map_err(|e| Error::Storage(format!("Failed to write {}: {e}", tmp_path.display())))?;

    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)
            .map_err(|e| Error::Storage(format!("Failed to remove existing file: {e}")))?;
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        Error::Storage(format!("Failed to commit {}: {e}", path.display()))
    })
}
