//! # CLI Structure and Argument Parsing
//!
//! Command-line interface for `blogdex`, built with `clap` derive macros.
//!
//! ```bash
//! # Build the search index once
//! blogdex build
//!
//! # Rebuild on every change until Ctrl-C
//! blogdex watch --marker lib/force-refresh.ts
//!
//! # Query the artifact
//! blogdex search "trait objects" --format json
//!
//! # Preview a paginator
//! blogdex pages --total 160 --page 6
//! ```
//!
//! Every path or setting that has a flag also has a config key; flags win.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Main CLI structure for the `blogdex` command.
#[derive(Parser, Clone, Debug)]
#[command(name = "blogdex")]
#[command(version)]
#[command(about = "blogdex - content index and fuzzy search for a markdown blog", long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file (defaults to ./blogdex.toml, then the global config)
    #[arg(long, global = true, env = "BLOGDEX_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Build the search index from the content tree
    Build {
        /// Content root to scan
        #[arg(long, value_name = "DIR")]
        content: Option<PathBuf>,

        /// Artifact to write
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Rebuild the index whenever a markdown file changes
    Watch {
        /// Content root to watch
        #[arg(long, value_name = "DIR")]
        content: Option<PathBuf>,

        /// Artifact to write
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// File rewritten after every rebuild
        #[arg(long, value_name = "FILE")]
        marker: Option<PathBuf>,
    },

    /// Search the index
    Search {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Artifact to search
        #[arg(long, value_name = "FILE")]
        index: Option<PathBuf>,

        /// Maximum number of results
        #[arg(short = 'l', long)]
        limit: Option<usize>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the paginator for one page of a listing
    Pages {
        /// Number of items in the listing
        #[arg(long)]
        total: usize,

        /// Items per page
        #[arg(long)]
        per_page: Option<usize>,

        /// Current page (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Pages shown on each side of the current one
        #[arg(long)]
        range: Option<usize>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List articles, optionally narrowed to a folder or tag
    List {
        /// Only articles in this folder
        #[arg(long)]
        folder: Option<String>,

        /// Only articles with this tag
        #[arg(long)]
        tag: Option<String>,

        /// Page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show recommended articles
    Recommend {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show articles related to one article
    Related {
        /// Slug of the article
        slug: String,

        /// Maximum number of articles
        #[arg(short = 'l', long, default_value_t = 3)]
        limit: usize,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Write sitemap.xml for the indexed articles
    Sitemap {
        /// Public origin of the site
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,

        /// File to write
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Commands {
    /// Output format requested by the command, if it has one.
    pub const fn format(&self) -> Option<OutputFormat> {
        match self {
            Self::Search { format, .. }
            | Self::Pages { format, .. }
            | Self::List { format, .. }
            | Self::Recommend { format }
            | Self::Related { format, .. } => Some(*format),
            Self::Build { .. } | Self::Watch { .. } | Self::Sitemap { .. } => None,
        }
    }
}
