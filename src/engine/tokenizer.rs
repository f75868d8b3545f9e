//! Lexical tokenizer shared by index building and lookups.

use std::collections::HashMap;

use super::filter::TokenFilter;

/// Characters that may appear inside a token. Everything else is a delimiter.
fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\''
}

/// Deterministic tokenizer: lower-cases text and splits it on every maximal
/// run of characters that are neither alphanumeric nor an apostrophe.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer.
    pub fn new() -> Self {
        Self
    }

    /// Trim and lower-case `text`. Splitting happens lazily in [`Tokens::iter`].
    pub fn tokenize(&self, text: &str) -> Tokens {
        Tokens {
            buffer: text.trim().to_lowercase(),
        }
    }

    /// Tokenize, drop tokens rejected by `filter`, and count the survivors.
    pub fn term_frequencies(&self, text: &str, filter: &TokenFilter) -> TermFrequencies {
        let mut freqs = TermFrequencies::default();
        for token in self.tokenize(text).iter() {
            freqs.tokens_seen += 1;
            if filter.accepts(token) {
                *freqs.counts.entry(token.to_string()).or_insert(0) += 1;
            } else {
                freqs.tokens_dropped += 1;
            }
        }
        freqs
    }
}

/// Surviving-token counts of one text, with the number of raw tokens seen
/// and rejected by the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermFrequencies {
    pub counts: HashMap<String, u32>,
    pub tokens_seen: u64,
    pub tokens_dropped: u64,
}

impl TermFrequencies {
    pub fn get(&self, word: &str) -> u32 {
        self.counts.get(word).copied().unwrap_or(0)
    }
}

/// Lower-cased text of one document. Owns the buffer; tokens borrow from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    buffer: String,
}

impl Tokens {
    /// Lazily yield the raw tokens. Never yields an empty string.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.buffer
            .split(|c: char| !is_token_char(c))
            .filter(|token| !token.is_empty())
    }

    /// The normalized text the tokens are sliced from.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Number of raw tokens. Walks the buffer.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}
