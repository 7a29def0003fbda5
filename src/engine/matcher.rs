// src/engine/matcher.rs
//! Vocabulary matching and substring lookups.
//!
//! `match_one` folds the label (lowercase, alphanumerics only) and returns the
//! first token, in vocabulary order, that the folded label is a prefix of. So
//! "Ice" resolves to `ice` in the element vocabulary and to `iceblight` in the
//! status vocabulary. An empty label never matches.

use crate::config::vocab::Vocabulary;
use crate::core::sanitize::fold;

pub fn match_one(vocab: &Vocabulary, label: &str) -> Option<&'static str> {
    let key = fold(label);
    if key.is_empty() {
        return None;
    }
    vocab.tokens().iter().copied().find(|token| fold(token).starts_with(&key))
}

/// Matches for every label that resolves; the rest are dropped.
pub fn match_many<S: AsRef<str>>(vocab: &Vocabulary, labels: &[S]) -> Vec<&'static str> {
    labels
        .iter()
        .filter_map(|l| {
            let hit = match_one(vocab, l.as_ref());
            if hit.is_none() {
                tracing::debug!(vocab = vocab.name(), label = l.as_ref(), "label not in vocabulary");
            }
            hit
        })
        .collect()
}

/// First entry whose needle is contained in `text` (case-insensitive).
pub fn lookup_contains<T: Copy>(table: &[(&str, T)], text: &str) -> Option<T> {
    let haystack = text.to_lowercase();
    table
        .iter()
        .find(|(needle, _)| haystack.contains(needle))
        .map(|(_, v)| *v)
}
