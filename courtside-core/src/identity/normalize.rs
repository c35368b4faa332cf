//! Name normalization used by the fuzzy match tiers.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold a name for comparison.
///
/// Diacritics are removed, letters lowercased, every non-alphanumeric run
/// becomes a single space. `"Nikola Jokić"` and `"nikola  jokic"` fold to the
/// same string; `"L. James"` folds to `"l james"`.
#[must_use]
pub fn fold(raw: &str) -> String {
    let spaced: String = raw
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when one folded name abbreviates the other token by token.
///
/// Both must have the same number of tokens (at least two) and the same last
/// token; every earlier token is either equal or a single letter matching the
/// other side's initial (`"l james"` / `"lebron james"`).
#[must_use]
pub fn abbreviates(a: &str, b: &str) -> bool {
    let ta: Vec<&str> = a.split(' ').collect();
    let tb: Vec<&str> = b.split(' ').collect();
    if ta.len() < 2 || ta.len() != tb.len() || ta.last() != tb.last() {
        return false;
    }
    ta.iter()
        .zip(&tb)
        .take(ta.len() - 1)
        .all(|(x, y)| x == y || initial_of(x, y) || initial_of(y, x))
}

fn initial_of(short: &str, long: &str) -> bool {
    let mut chars = short.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if long.starts_with(c))
}

/// Number of leading characters two strings share.
#[must_use]
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

/// First `len` alphanumeric characters of `raw`, uppercased.
///
/// Returns `None` when `raw` has fewer than `len` of them.
#[must_use]
pub fn code_prefix(raw: &str, len: usize) -> Option<String> {
    let prefix: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(len)
        .flat_map(char::to_uppercase)
        .collect();
    (prefix.chars().count() >= len && len > 0).then_some(prefix)
}
