//! Core records shared by the builder, the search engine and the catalog views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One indexed markdown document.
///
/// The serialized field order (`title, summary, tags, slug, folder, content,
/// createdAt, updatedAt`) is the artifact format read by the serving layer, so
/// fields must not be reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Front-matter `title`, empty when absent.
    #[serde(default)]
    pub title: String,
    /// Front-matter `summary`, empty when absent.
    #[serde(default)]
    pub summary: String,
    /// Front-matter `tags` in declaration order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Path relative to the content root, extension stripped, `/`-separated.
    pub slug: String,
    /// Directory part of the slug, `"."` at the root.
    pub folder: String,
    /// Markdown body with the front-matter block removed.
    #[serde(default)]
    pub content: String,
    /// File creation time (modification time where the platform has none).
    #[serde(with = "millis")]
    pub created_at: DateTime<Utc>,
    /// File modification time.
    #[serde(with = "millis")]
    pub updated_at: DateTime<Utc>,
}

impl DocumentRecord {
    /// Whether the document carries `tag` (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Slug of the matching document.
    pub id: String,
    /// Title of the matching document.
    pub title: String,
    /// Leading excerpt of the document body.
    #[serde(rename = "surrounding_text")]
    pub snippet: String,
    /// Relevance, higher is better. An exact title hit scores the title weight.
    pub score: f64,
}

/// Severity attached to a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The document was indexed with defaulted fields.
    Warn,
}

/// A problem found with one document during a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Slug of the offending document.
    pub slug: String,
    /// How bad it is.
    pub severity: Severity,
    /// Human readable description.
    pub message: String,
}

/// Output of a full index build.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Records in artifact order.
    pub records: Vec<DocumentRecord>,
    /// Recovered per-document problems, in scan order.
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildReport {
    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the build found no documents.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Summary handed to rebuild listeners after a build has been persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    /// Number of records in the new artifact.
    pub documents: usize,
    /// Number of recovered diagnostics.
    pub warnings: usize,
}

impl From<&BuildReport> for BuildSummary {
    fn from(report: &BuildReport) -> Self {
        Self {
            documents: report.records.len(),
            warnings: report.diagnostics.len(),
        }
    }
}

/// RFC 3339 timestamps with millisecond precision and a `Z` suffix.
mod millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> DocumentRecord {
        DocumentRecord {
            title: "Hello".into(),
            summary: "greeting".into(),
            tags: vec!["intro".into()],
            slug: "notes/hello".into(),
            folder: "notes".into(),
            content: "body".into(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap(),
        }
    }

    #[test]
    fn test_record_serializes_in_artifact_order() {
        // Given: A record
        let json = serde_json::to_string(&record()).unwrap();

        // Then: Keys are camelCase and in artifact order
        let keys = [
            "\"title\"",
            "\"summary\"",
            "\"tags\"",
            "\"slug\"",
            "\"folder\"",
            "\"content\"",
            "\"createdAt\"",
            "\"updatedAt\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
        assert!(json.contains("\"createdAt\":\"2024-01-02T03:04:05.000Z\""));
    }

    #[test]
    fn test_record_tolerates_missing_optional_fields() {
        let json = r#"{"slug":"a","folder":".","createdAt":"2024-01-01T00:00:00.000Z","updatedAt":"2024-01-01T00:00:00.000Z"}"#;
        let parsed: DocumentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.title, "");
        assert!(parsed.tags.is_empty());
    }

    #[test]
    fn test_search_result_uses_surrounding_text_key() {
        let hit = SearchResult {
            id: "a".into(),
            title: "A".into(),
            snippet: "body".into(),
            score: 1.0,
        };
        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json["surrounding_text"], "body");
        assert!(json.get("snippet").is_none());
    }

    #[test]
    fn test_has_tag() {
        let rec = record();
        assert!(rec.has_tag("intro"));
        assert!(!rec.has_tag("Intro"));
    }
}
