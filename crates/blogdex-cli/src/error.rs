//! CLI error handling with semantic exit codes.
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Command completed successfully |
//! | 1 | `Internal` | Unexpected/internal error |
//! | 2 | `Usage` | Invalid arguments or configuration |
//! | 3 | `NotFound` | Content root, artifact or article missing |
//! | 4 | `Io` | Reading or writing files failed |
//! | 5 | `NotReady` | No search index is loaded |
//! | 6 | `Integrity` | The artifact is corrupt |
//!
//! ```bash
//! blogdex search "ownership"
//! case $? in
//!     0) echo "ok" ;;
//!     3) echo "run 'blogdex build' first" ;;
//!     6) echo "artifact is corrupt, rebuild it" ;;
//! esac
//! ```

use std::fmt;
use std::process::ExitCode;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,
    /// Invalid arguments or configuration (exit code 2).
    Usage = 2,
    /// Requested resource not found (exit code 3).
    NotFound = 3,
    /// File system failure (exit code 4).
    Io = 4,
    /// Query issued before an index was loaded (exit code 5).
    NotReady = 5,
    /// Index or data corruption (exit code 6).
    Integrity = 6,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Create an `ExitCode` from this category.
    #[must_use]
    pub fn as_exit_code(self) -> ExitCode {
        ExitCode::from(self.exit_code())
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::Io => "i/o error",
            Self::NotReady => "index not ready",
            Self::Integrity => "integrity error",
        }
    }

    /// Category for a core library error.
    #[must_use]
    pub fn from_core(err: &blogdex_core::Error) -> Self {
        use blogdex_core::Error;
        match err {
            Error::Config(_) => Self::Usage,
            Error::NotFound(_) => Self::NotFound,
            Error::Io(_) | Error::Storage(_) | Error::Watch(_) => Self::Io,
            Error::NotReady(_) => Self::NotReady,
            Error::Index(_) | Error::Parse(_) | Error::Serialization(_) => Self::Integrity,
            Error::Other(_) => Self::Internal,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create a usage error.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// Create a not-found error.
    pub fn not_found(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::NotFound, source)
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// An explicit [`CliError`] wins; otherwise the first core error in the
/// chain decides; anything else is internal.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    err.chain()
        .find_map(|cause| cause.downcast_ref::<blogdex_core::Error>())
        .map_or(ErrorCategory::Internal, ErrorCategory::from_core)
        .exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            ErrorCategory::Internal,
            ErrorCategory::Usage,
            ErrorCategory::NotFound,
            ErrorCategory::Io,
            ErrorCategory::NotReady,
            ErrorCategory::Integrity,
        ]
        .map(ErrorCategory::exit_code);
        assert_eq!(codes, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_core_errors_map_through_context() {
        // Given: A core error wrapped in extra context
        let err = Err::<(), _>(blogdex_core::Error::NotFound("artifact".into()))
            .context("Failed to load the search index")
            .unwrap_err();

        // Then: The core category still decides the exit code
        assert_eq!(exit_code_from_error(&err), 3);
    }

    #[test]
    fn test_corrupt_artifact_is_integrity() {
        let err = anyhow::Error::from(blogdex_core::Error::Index("bad json".into()));
        assert_eq!(exit_code_from_error(&err), 6);
    }

    #[test]
    fn test_cli_error_category_wins() {
        let err = anyhow::Error::from(CliError::usage(anyhow!("unknown folder")));
        assert_eq!(exit_code_from_error(&err), 2);
    }

    #[test]
    fn test_unknown_errors_are_internal() {
        assert_eq!(exit_code_from_error(&anyhow!("boom")), 1);
    }
}
