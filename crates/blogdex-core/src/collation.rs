//! Locale-aware string ordering for document titles.
//!
//! Approximates root-locale collation in three levels, then falls back to code
//! point order so the comparison is total:
//!
//! 1. base letters, ignoring case and accents (`"apple" < "Banana" < "cafe"`)
//! 2. accents (`"cafe" < "café"`)
//! 3. case, lowercase first (`"rust" < "Rust"`)

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Compare two strings the way a reader would expect them sorted.
pub fn compare(a: &str, b: &str) -> Ordering {
    primary(a)
        .cmp(primary(b))
        .then_with(|| secondary(a).cmp(secondary(b)))
        .then_with(|| tertiary(a).cmp(tertiary(b)))
        .then_with(|| a.cmp(b))
}

/// Base letters, lowercased, accents removed.
fn primary(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Decomposed lowercase text, so an accented letter sorts after its base.
fn secondary(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// One flag per base letter: `false` for lowercase, `true` for uppercase.
fn tertiary(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
}
