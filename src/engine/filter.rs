//! Token filtering: stop words and pure numbers never reach the index.
//!
//! The stop-word set is built once and shared read-only by every worker
//! through an `Arc<dyn StopWords>`.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::types::{IndexError, IndexResult};

/// Built-in English stop words.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "shall", "can",
    "need", "must", "to", "of", "in", "for", "on", "with", "at", "by", "from", "as", "into",
    "about", "but", "not", "or", "and", "if", "it", "its", "this", "that", "which", "who", "what",
    "when", "where", "how", "all", "each", "both", "few", "more", "most", "other", "some", "such",
    "no", "than", "too", "very", "just", "also",
];

/// A read-only set of words to exclude from the index.
///
/// Lookups are exact and case-sensitive; tokens arrive already lower-cased.
pub trait StopWords: Send + Sync {
    fn contains(&self, word: &str) -> bool;
}

impl StopWords for HashSet<String> {
    fn contains(&self, word: &str) -> bool {
        HashSet::contains(self, word)
    }
}

/// The default [`StopWords`] implementation: an immutable hash set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// A set that excludes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in English list.
    pub fn english() -> Self {
        Self::new(STOP_WORDS.iter().copied())
    }

    /// Parse a word list: one word per line, surrounding whitespace trimmed,
    /// blank lines and `#` comments skipped. Case is kept as written.
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Load a word list file in the [`StopWordSet::parse`] format.
    pub fn from_file(path: &Path) -> IndexResult<Self> {
        let text =
            std::fs::read_to_string(path).map_err(|e| IndexError::unavailable(path, e))?;
        let set = Self::parse(&text);
        log::debug!("Loaded {} stop words from {}", set.len(), path.display());
        Ok(set)
    }

    /// Union of two sets.
    pub fn union(mut self, other: StopWordSet) -> Self {
        self.words.extend(other.words);
        self
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl StopWords for StopWordSet {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

/// True when `token` is one or more ASCII decimal digits and nothing else.
pub fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Accepts a token only if it is non-empty, not a stop word, and not numeric.
#[derive(Clone)]
pub struct TokenFilter {
    stop_words: Arc<dyn StopWords>,
}

impl TokenFilter {
    /// Build a filter around an already shared stop-word collaborator.
    pub fn new(stop_words: Arc<dyn StopWords>) -> Self {
        Self { stop_words }
    }

    /// Build a filter that takes ownership of `stop_words`.
    pub fn with_stop_words(stop_words: impl StopWords + 'static) -> Self {
        Self::new(Arc::new(stop_words))
    }

    pub fn accepts(&self, token: &str) -> bool {
        !token.is_empty() && !self.stop_words.contains(token) && !is_numeric(token)
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// The shared stop-word handle.
    pub fn stop_words(&self) -> &Arc<dyn StopWords> {
        &self.stop_words
    }
}

impl Default for TokenFilter {
    fn default() -> Self {
        Self::with_stop_words(StopWordSet::english())
    }
}

impl fmt::Debug for TokenFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenFilter").finish_non_exhaustive()
    }
}
