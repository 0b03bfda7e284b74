//! "Did you mean" suggestions for unknown folder and tag names.

use blogdex_core::similarity::similarity;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Edit-distance ratio below which a typo still counts as a suggestion.
const TYPO_RATIO: f64 = 0.34;

/// Up to `max` known names resembling `input`, best first.
///
/// Names are ranked by skim subsequence score; names the subsequence matcher
/// misses (transposed letters, small typos) are kept when their edit ratio is
/// low enough and ranked after them.
pub fn suggest<'a>(input: &str, known: impl IntoIterator<Item = &'a str>, max: usize) -> Vec<String> {
    let matcher = SkimMatcherV2::default();
    let needle = input.to_lowercase();

    let mut scored: Vec<(i64, f64, &str)> = known
        .into_iter()
        .filter_map(|name| {
            let hay = name.to_lowercase();
            if let Some(score) = matcher.fuzzy_match(&hay, &needle) {
                return Some((score, 0.0, name));
            }
            let ratio = similarity(&needle, &hay).max(similarity(&hay, &needle));
            (ratio <= TYPO_RATIO).then_some((0, ratio, name))
        })
        .collect();

    scored.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| a.1.total_cmp(&b.1))
            .then_with(|| a.2.cmp(b.2))
    });
    scored
        .into_iter()
        .take(max)
        .map(|(_, _, name)| name.to_string())
        .collect()
}
