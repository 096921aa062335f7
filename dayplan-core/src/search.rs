//! Pluggable text normalization for event search.
//!
//! Search itself is always the same substring test; what varies is the
//! normalization applied to both sides first. `CaseFold` is the mandatory
//! baseline, `SuffixStemmer` is the fuzzy variant. A full lemmatizer can be
//! plugged in by implementing [`Normalizer`] without touching the store.

pub trait Normalizer {
    fn normalize(&self, text: &str) -> String;
}

/// Unicode lowercasing only.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseFold;

impl Normalizer for CaseFold {
    fn normalize(&self, text: &str) -> String {
        text.to_lowercase()
    }
}

/// Case-folds, then strips common inflection suffixes from each word so
/// inflected forms and their stems compare equal under the substring test.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixStemmer;

/// Longest-match-first; a suffix is only stripped when at least
/// `MIN_STEM_CHARS` characters remain.
const SUFFIXES: &[&str] = &["ations", "ation", "ing", "ers", "ies", "ed", "er", "es", "s"];
const MIN_STEM_CHARS: usize = 3;

impl Normalizer for SuffixStemmer {
    fn normalize(&self, text: &str) -> String {
        text.to_lowercase()
            .split_whitespace()
            .map(strip_suffix)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn strip_suffix(word: &str) -> String {
    for suffix in SUFFIXES {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.chars().count() >= MIN_STEM_CHARS {
                return stem.to_string();
            }
        }
    }
    word.to_string()
}
