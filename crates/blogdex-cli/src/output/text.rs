//! Text renderers shared by the listing and search commands.

use blogdex_core::{DocumentRecord, SearchResult};
use colored::Colorize;

/// One line per article: slug, title and tags, then the summary indented.
pub fn print_article_lines(records: &[&DocumentRecord]) {
    for record in records {
        let title = if record.title.is_empty() {
            "(untitled)".dimmed().to_string()
        } else {
            record.title.bold().to_string()
        };
        print!("{}  {title}", record.slug.cyan());
        if !record.tags.is_empty() {
            print!("  {}", format!("[{}]", record.tags.join(", ")).bright_black());
        }
        println!();
        if !record.summary.is_empty() {
            println!("    {}", record.summary);
        }
    }
}

/// Ranked hits with their score and snippet.
pub fn print_search_hits(hits: &[SearchResult]) {
    for (rank, hit) in hits.iter().enumerate() {
        println!(
            "{:>2}. {} {}  {}",
            rank + 1,
            format!("{:.2}", hit.score).green(),
            hit.title.bold(),
            hit.id.cyan()
        );
        let snippet = hit.snippet.replace('\n', " ");
        if !snippet.trim().is_empty() {
            println!("    {}", snippet.trim().bright_black());
        }
    }
}
