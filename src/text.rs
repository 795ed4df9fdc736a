//! Plain-text measurement helpers shared by the auditor, the keyword
//! analyzer and the composer.
//!
//! All counting is done in characters (`char`), never bytes, so accented
//! French text measures the way an editor counts it.

use crate::patterns::{SENTENCE_SPLIT, SLUG_STRIP, WHITESPACE_NORMALIZE};

/// Count whitespace-delimited words.
#[inline]
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Collapse whitespace runs into single spaces and trim the ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text.trim(), " ").to_string()
}

/// Split prose into raw sentence segments on terminal punctuation runs.
///
/// Leading, trailing and doubled punctuation produce empty segments. Callers
/// that want prose sentences skip the empties but keep the raw indices, so
/// positional buckets stay aligned with the unfiltered segmentation.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_SPLIT.split(text).collect()
}

/// First `limit` characters of `text`, cut on a character boundary.
#[must_use]
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Count non-overlapping occurrences of `term` in `text`.
///
/// Case-sensitive. Callers lowercase both sides when they want a
/// case-blind count.
#[must_use]
pub fn count_occurrences(text: &str, term: &str) -> usize {
    if term.is_empty() {
        return 0;
    }
    text.matches(term).count()
}

/// Derive a lowercase filename slug from an article title.
///
/// Unicode word characters survive, punctuation is dropped and whitespace
/// runs fold into single hyphens. Hyphens already in the title stay put.
#[must_use]
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = SLUG_STRIP.replace_all(&lowered, "");
    WHITESPACE_NORMALIZE
        .replace_all(stripped.trim(), "-")
        .to_string()
}
