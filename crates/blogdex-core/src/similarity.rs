//! Approximate string matching.
//!
//! Distances use optimal string alignment: insertion, deletion, substitution
//! and transposition of two adjacent characters each cost 1. All functions
//! compare characters exactly; callers fold case beforehand.

/// Normalized distance between `pattern` and its best-matching substring of `text`.
///
/// `0.0` means `pattern` occurs verbatim, `1.0` means nothing useful matched.
/// An empty pattern scores `0.0`.
///
/// ```rust
/// use blogdex_core::similarity::similarity;
///
/// assert_eq!(similarity("rust", "trust me"), 0.0);
/// assert_eq!(similarity("rsut", "rust"), 0.25);
/// ```
pub fn similarity(pattern: &str, text: &str) -> f64 {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    substring_distance_ratio(&pattern, &text)
}

/// [`similarity`] over pre-split characters.
pub fn substring_distance_ratio(pattern: &[char], text: &[char]) -> f64 {
    if pattern.is_empty() {
        return 0.0;
    }
    ratio(substring_distance(pattern, text), pattern.len())
}

/// Edit distance between two whole strings, normalized by the longer length.
pub fn edit_ratio(a: &[char], b: &[char]) -> f64 {
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 0.0;
    }
    ratio(osa(a, b, false), longest)
}

/// Minimum distance from `pattern` to any substring of `text`.
pub fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    osa(pattern, text, true)
}

#[allow(clippy::cast_precision_loss)]
fn ratio(distance: usize, len: usize) -> f64 {
    (distance as f64 / len as f64).min(1.0)
}

/// Optimal string alignment distance between `a` and `b`.
///
/// With `free_ends` the alignment may start and stop anywhere in `b`, which
/// yields the best substring match instead of a whole-string comparison.
fn osa(a: &[char], b: &[char], free_ends: bool) -> usize {
    let n = b.len();
    // Rows i-2, i-1 and i of the DP table, indexed by position in `b`.
    let mut before: Vec<usize> = vec![0; n + 1];
    let mut prev: Vec<usize> = (0..=n)
        .map(|j| if free_ends { 0 } else { j })
        .collect();
    let mut row: Vec<usize> = vec![0; n + 1];

    for i in 1..=a.len() {
        row[0] = i;
        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut best = (prev[j] + 1).min(row[j - 1] + 1).min(prev[j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(before[j - 2] + 1);
            }
            row[j] = best;
        }
        std::mem::swap(&mut before, &mut prev);
        std::mem::swap(&mut prev, &mut row);
    }

    if free_ends {
        prev.iter().copied().min().unwrap_or(a.len())
    } else {
        prev[n]
    }
}
