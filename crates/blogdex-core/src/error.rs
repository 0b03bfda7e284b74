//! Error types and handling for blogdex-core operations.
//!
//! Every public operation in this crate returns [`Result<T>`]. Failures are
//! classified so callers can decide what is fatal and what is not:
//!
//! - **I/O errors**: the content root or a document cannot be read, the
//!   artifact cannot be written. Fatal to a single build, never to the watcher.
//! - **Parse errors**: malformed front-matter. The builder recovers from these
//!   locally and records a diagnostic instead of aborting the run.
//! - **Index errors**: an artifact that cannot be turned into a search structure.
//! - **Not ready**: a query issued before any artifact has been loaded.
//!
//! ```rust
//! use blogdex_core::Error;
//!
//! let err = Error::NotReady("no artifact loaded".into());
//! assert_eq!(err.category(), "not_ready");
//! assert!(!err.is_recoverable());
//! ```

use thiserror::Error;

/// The main error type for blogdex-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading the content tree, stat-ing documents and writing the
    /// artifact. The underlying `std::io::Error` is preserved.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Front-matter could not be parsed.
    ///
    /// The builder substitutes empty defaults for the document and keeps going;
    /// this variant surfaces only from the lower-level parsing functions.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The search structure could not be built from an artifact.
    ///
    /// ## Common Causes
    ///
    /// - The artifact file is not valid JSON
    /// - The artifact was produced by an incompatible version
    #[error("Index error: {0}")]
    Index(String),

    /// Persisting the artifact, the freshness marker or another generated file failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A query was issued before any artifact was loaded.
    #[error("Search index not ready: {0}")]
    NotReady(String),

    /// The file-system watcher could not be started or lost its subscription.
    #[error("Watch error: {0}")]
    Watch(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        let context = err
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        match err.into_io_error() {
            Some(io) if context.is_empty() => Self::Io(io),
            Some(io) => Self::Io(std::io::Error::new(io.kind(), format!("{context}: {io}"))),
            None => Self::Io(std::io::Error::other(format!(
                "filesystem loop detected at {context}"
            ))),
        }
    }
}

impl From<notify::Error> for Error {
    fn from(err: notify::Error) -> Self {
        Self::Watch(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// Only transient I/O conditions qualify; a watcher uses this to decide
    /// whether a failed rebuild is worth mentioning at `warn` or `error`.
    ///
    /// ```rust
    /// use blogdex_core::Error;
    /// use std::io;
    ///
    /// assert!(Error::Io(io::Error::new(io::ErrorKind::Interrupted, "eintr")).is_recoverable());
    /// assert!(!Error::Parse("bad yaml".into()).is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut
                    | std::io::ErrorKind::Interrupted
                    | std::io::ErrorKind::WouldBlock
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// Returns a static string suitable for structured log fields and for
    /// mapping to process exit codes.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Parse(_) => "parse",
            Self::Index(_) => "index",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::NotReady(_) => "not_ready",
            Self::Watch(_) => "watch",
            Self::Serialization(_) => "serialization",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io;

    #[test]
    fn test_error_display_formatting() {
        // Given: Different error variants
        let cases = vec![
            (Error::Parse("bad yaml".into()), "Parse error"),
            (Error::Index("not an artifact".into()), "Index error"),
            (Error::Storage("disk full".into()), "Storage error"),
            (Error::Config("threshold".into()), "Configuration error"),
            (Error::NotFound("content".into()), "Not found"),
            (Error::NotReady("no artifact".into()), "not ready"),
            (Error::Watch("inotify limit".into()), "Watch error"),
        ];

        for (error, prefix) in cases {
            // When: Converting to string
            let rendered = error.to_string();

            // Then: Should carry the prefix and message
            assert!(rendered.contains(prefix), "{rendered} lacks {prefix}");
        }
    }

    #[test]
    fn test_error_categories() {
        let error_categories = vec![
            (Error::Io(io::Error::other("test")), "io"),
            (Error::Parse("test".into()), "parse"),
            (Error::Index("test".into()), "index"),
            (Error::Storage("test".into()), "storage"),
            (Error::Config("test".into()), "config"),
            (Error::NotFound("test".into()), "not_found"),
            (Error::NotReady("test".into()), "not_ready"),
            (Error::Watch("test".into()), "watch"),
            (Error::Serialization("test".into()), "serialization"),
            (Error::Other("test".into()), "other"),
        ];

        for (error, expected_category) in error_categories {
            assert_eq!(error.category(), expected_category);
        }
    }

    #[test]
    fn test_error_recoverability() {
        assert!(Error::Io(io::Error::new(io::ErrorKind::TimedOut, "timeout")).is_recoverable());
        assert!(
            Error::Io(io::Error::new(io::ErrorKind::Interrupted, "interrupted")).is_recoverable()
        );

        let permanent = vec![
            Error::Io(io::Error::new(io::ErrorKind::NotFound, "missing")),
            Error::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            Error::Parse("bad".into()),
            Error::NotReady("empty".into()),
            Error::Config("bad".into()),
        ];
        for error in permanent {
            assert!(!error.is_recoverable(), "{error:?} should be permanent");
        }
    }

    #[test]
    fn test_walkdir_error_becomes_io() {
        // Given: A walk over a directory that does not exist
        let missing = std::env::temp_dir().join("blogdex-definitely-missing-root");
        let err = walkdir::WalkDir::new(&missing)
            .into_iter()
            .find_map(std::result::Result::err)
            .unwrap();

        // When: Converting into our error type
        let converted: Error = err.into();

        // Then: It is classified as I/O and mentions the path
        assert_eq!(converted.category(), "io");
        assert!(converted.to_string().contains("blogdex-definitely-missing-root"));
    }

    #[test]
    fn test_error_chain_source() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: Error = io_error.into();

        let source = std::error::Error::source(&error);
        assert!(source.unwrap().to_string().contains("access denied"));
    }

    #[test]
    fn test_error_size() {
        let error_size = std::mem::size_of::<Error>();
        assert!(error_size <= 64, "Error type too large: {error_size} bytes");
    }

    proptest! {
        #[test]
        fn test_parse_error_with_arbitrary_messages(msg in r".{0,200}") {
            let error = Error::Parse(msg.clone());
            let rendered = error.to_string();

            prop_assert!(rendered.contains("Parse error"));
            prop_assert!(rendered.contains(&msg));
            prop_assert_eq!(error.category(), "parse");
            prop_assert!(!error.is_recoverable());
        }

        #[test]
        fn test_other_error_with_arbitrary_messages(msg in r".{0,200}") {
            let error = Error::Other(msg.clone());
            prop_assert_eq!(error.to_string(), msg);
            prop_assert_eq!(error.category(), "other");
        }
    }
}
