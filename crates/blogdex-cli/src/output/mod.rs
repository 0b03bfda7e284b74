//! # Output Formatting
//!
//! Commands that print data accept `--format`:
//!
//! - **text**: human-readable, colored unless disabled
//! - **json**: pretty-printed JSON for scripts
//!
//! ```bash
//! blogdex search "ownership" --format json | jq '.[0].id'
//! ```

mod text;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

pub use text::{print_article_lines, print_search_hits};

/// Output format options supported by the CLI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Whether the output is meant for programs rather than people.
    pub const fn is_machine(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
