//! The finished inverted index: words in ascending order, each with its
//! ranked posting list.

use std::collections::HashSet;

use crate::engine::filter::is_numeric;
use crate::types::{IndexError, IndexResult, Posting, WordPosting};

use super::ranker::is_ranked;

/// An inverted index mapping words to ranked posting lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    /// Strictly ascending by word.
    words: Vec<WordPosting>,
    /// Distinct document ids referenced by any posting.
    doc_count: usize,
}

impl InvertedIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap postings produced by the ranker. Caller guarantees ordering.
    pub(crate) fn from_ranked(words: Vec<WordPosting>) -> Self {
        let doc_count = count_documents(&words);
        Self { words, doc_count }
    }

    /// Build from untrusted postings (e.g. read back from disk), checking
    /// every ordering and uniqueness guarantee.
    pub fn from_words(words: Vec<WordPosting>) -> IndexResult<Self> {
        for (i, entry) in words.iter().enumerate() {
            if entry.word.is_empty() || is_numeric(&entry.word) {
                return Err(IndexError::MalformedIndexRecord(format!(
                    "invalid word {:?}",
                    entry.word
                )));
            }
            if entry.word != entry.word.to_lowercase() {
                return Err(IndexError::MalformedIndexRecord(format!(
                    "word {:?} is not lower-case",
                    entry.word
                )));
            }
            if i > 0 && words[i - 1].word >= entry.word {
                return Err(IndexError::MalformedIndexRecord(format!(
                    "word {:?} out of order after {:?}",
                    entry.word,
                    words[i - 1].word
                )));
            }
            if entry.postings.is_empty() {
                return Err(IndexError::MalformedIndexRecord(format!(
                    "word {:?} has no postings",
                    entry.word
                )));
            }
            if entry.postings.iter().any(|p| p.count == 0) {
                return Err(IndexError::MalformedIndexRecord(format!(
                    "word {:?} has a zero count",
                    entry.word
                )));
            }
            if !is_ranked(&entry.postings) {
                return Err(IndexError::MalformedIndexRecord(format!(
                    "postings for {:?} are not ranked",
                    entry.word
                )));
            }
        }
        Ok(Self::from_ranked(words))
    }

    /// Look up a word. Returns its ranked postings, or an empty slice.
    pub fn get(&self, word: &str) -> &[Posting] {
        self.posting(word)
            .map(|entry| entry.postings.as_slice())
            .unwrap_or(&[])
    }

    /// Look up a word's full entry.
    pub fn posting(&self, word: &str) -> Option<&WordPosting> {
        self.words
            .binary_search_by(|entry| entry.word.as_str().cmp(word))
            .ok()
            .map(|pos| &self.words[pos])
    }

    /// Number of documents containing a word.
    pub fn doc_frequency(&self, word: &str) -> usize {
        self.get(word).len()
    }

    /// Number of distinct documents referenced by the index.
    pub fn doc_count(&self) -> usize {
        self.doc_count
    }

    /// Number of unique words.
    pub fn term_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Entries in ascending word order.
    pub fn iter(&self) -> std::slice::Iter<'_, WordPosting> {
        self.words.iter()
    }

    pub fn words(&self) -> &[WordPosting] {
        &self.words
    }

    pub fn into_words(self) -> Vec<WordPosting> {
        self.words
    }
}

impl<'a> IntoIterator for &'a InvertedIndex {
    type Item = &'a WordPosting;
    type IntoIter = std::slice::Iter<'a, WordPosting>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

fn count_documents(words: &[WordPosting]) -> usize {
    words
        .iter()
        .flat_map(|entry| entry.postings.iter().map(|p| p.document_id.as_str()))
        .collect::<HashSet<&str>>()
        .len()
}
