//! Front-matter extraction.
//!
//! A document may open with a YAML block fenced by `---` lines. Only three keys
//! matter to the index (`title`, `summary`, `tags`); everything else in the
//! block is ignored. Shapes that do not fit are defaulted per field instead of
//! failing the document.

use crate::{Error, Result};
use serde_yaml::Value;

const DELIMITER: &str = "---";
const BOM: char = '\u{feff}';

/// A document split into its front-matter block and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// Raw text between the fences, if the document has a block.
    pub front: Option<&'a str>,
    /// Everything after the closing fence.
    pub body: &'a str,
}

/// Metadata the index cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    /// `title` key.
    pub title: Option<String>,
    /// `summary` key.
    pub summary: Option<String>,
    /// `tags` key, scalar elements only.
    pub tags: Vec<String>,
}

/// Split `raw` into front-matter and body.
///
/// Returns [`Error::Parse`] when an opening fence is never closed; callers
/// should then treat the whole text as body.
pub fn split(raw: &str) -> Result<Split<'_>> {
    let text = raw.strip_prefix(BOM).unwrap_or(raw);
    let (first, mut rest) = next_line(text);

    let Some(tag) = first.strip_prefix(DELIMITER) else {
        return Ok(Split {
            front: None,
            body: text,
        });
    };
    // `---` followed by a language tag (`---yaml`) still opens a block, `----` does not.
    let tag = tag.trim_end();
    if !tag.chars().all(char::is_alphanumeric) {
        return Ok(Split {
            front: None,
            body: text,
        });
    }

    let block_start = text.len() - rest.len();
    while !rest.is_empty() {
        let line_start = text.len() - rest.len();
        let (line, after) = next_line(rest);
        if line.trim_end() == DELIMITER {
            return Ok(Split {
                front: Some(&text[block_start..line_start]),
                body: after,
            });
        }
        rest = after;
    }

    Err(Error::Parse("front-matter block is not closed".into()))
}

/// Parse a front-matter block.
pub fn parse(block: &str) -> Result<FrontMatter> {
    if block.trim().is_empty() {
        return Ok(FrontMatter::default());
    }

    let value: Value =
        serde_yaml::from_str(block).map_err(|e| Error::Parse(format!("invalid YAML: {e}")))?;
    let Value::Mapping(map) = value else {
        return Err(Error::Parse("front-matter is not a key/value mapping".into()));
    };

    let tags = match map.get("tags") {
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar).collect(),
        _ => Vec::new(),
    };

    Ok(FrontMatter {
        title: map.get("title").and_then(scalar),
        summary: map.get("summary").and_then(scalar),
        tags,
    })
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// First line of `text` (without terminator) and the remainder after it.
fn next_line(text: &str) -> (&str, &str) {
    match text.find('\n') {
        Some(idx) => {
            let line = &text[..idx];
            (line.strip_suffix('\r').unwrap_or(line), &text[idx + 1..])
        },
        None => (text, ""),
    }
}
