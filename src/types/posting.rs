//! Count entries and posting lists.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of times `word` occurs in `document_id`, summed over the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountEntry {
    pub word: String,
    pub document_id: String,
    pub count: u32,
}

/// One (document, count) element of a posting list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Posting {
    pub document_id: String,
    pub count: u32,
}

impl Posting {
    pub fn new(document_id: impl Into<String>, count: u32) -> Self {
        Self {
            document_id: document_id.into(),
            count,
        }
    }
}

/// Renders as `(documentId,count)`.
impl fmt::Display for Posting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.document_id, self.count)
    }
}

/// A word and its ranked posting list. One per distinct word in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPosting {
    pub word: String,
    pub postings: Vec<Posting>,
}

impl WordPosting {
    /// Number of documents containing the word.
    pub fn doc_frequency(&self) -> usize {
        self.postings.len()
    }

    /// Total occurrences of the word across the corpus.
    pub fn total_count(&self) -> u64 {
        self.postings.iter().map(|p| p.count as u64).sum()
    }
}
