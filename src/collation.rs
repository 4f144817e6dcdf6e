//! Headword ordering.
//!
//! The index is sorted once and then binary-searched, so both steps must agree on a single
//! comparator or lookups silently miss. Everything that orders headwords goes through
//! [`CollationKey`].
//!
//! The order resembles a locale-aware string comparison: words are first compared with
//! diacritics and case folded away ("é" sorts next to "e", "Apple" next to "apple"), then by
//! diacritics, then by case with lower case first. Only identical strings compare equal.
use std::cmp::Ordering;

use unidecode::unidecode;

/// Sort key of a headword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollationKey {
    primary: String,
    secondary: String,
    original: String,
}

impl CollationKey {
    pub fn new(word: &str) -> Self {
        Self {
            primary: primary_key(word),
            secondary: word.to_lowercase(),
            original: word.to_string(),
        }
    }

    /// The folded form used for the first comparison level.
    pub fn primary(&self) -> &str {
        &self.primary
    }
}

impl Ord for CollationKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary
            .cmp(&other.primary)
            .then_with(|| self.secondary.cmp(&other.secondary))
            .then_with(|| compare_case(&self.original, &other.original))
    }
}

impl PartialOrd for CollationKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Fold diacritics and case: the first comparison level.
///
/// Folding works character by character, so the key of a word starts with the key of each of its
/// prefixes. Prefix search relies on this.
pub fn primary_key(word: &str) -> String {
    unidecode(word).to_ascii_lowercase()
}

/// Compare two headwords.
pub fn compare(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

// Lower case before upper case, then code point order
fn compare_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(|c| (c.is_uppercase(), c))
        .cmp(b.chars().map(|c| (c.is_uppercase(), c)))
}
