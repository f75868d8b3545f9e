//! Per-(word, document) occurrence counting.
//!
//! Each document is counted on its own; tables then combine through
//! [`CountTable::merge`], which is associative and commutative so documents
//! can be reduced in any order and grouping.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::engine::filter::TokenFilter;
use crate::engine::tokenizer::Tokenizer;
use crate::types::{CountEntry, Document};

/// (word, document_id)
pub type CountKey = (String, String);

/// Occurrence counts keyed by (word, document), plus token accounting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountTable {
    counts: HashMap<CountKey, u32>,
    tokens_seen: u64,
    tokens_dropped: u64,
}

impl CountTable {
    /// Create an empty table. The identity element of [`CountTable::merge`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the surviving tokens of a single document.
    pub fn count_document(
        document: &Document,
        tokenizer: &Tokenizer,
        filter: &TokenFilter,
    ) -> Self {
        let freqs = tokenizer.term_frequencies(&document.text, filter);
        let mut table = Self {
            counts: HashMap::with_capacity(freqs.counts.len()),
            tokens_seen: freqs.tokens_seen,
            tokens_dropped: freqs.tokens_dropped,
        };
        for (word, count) in freqs.counts {
            table.counts.insert((word, document.id.clone()), count);
        }
        table
    }

    /// Add `count` occurrences of `word` in `document_id`. Zero counts are ignored.
    pub fn add(&mut self, word: &str, document_id: &str, count: u32) {
        if count == 0 {
            return;
        }
        let slot = self
            .counts
            .entry((word.to_string(), document_id.to_string()))
            .or_insert(0);
        *slot = slot.saturating_add(count);
    }

    /// Sum two tables key by key.
    pub fn merge(mut self, mut other: Self) -> Self {
        // Fold the smaller table into the larger one.
        if self.counts.len() < other.counts.len() {
            std::mem::swap(&mut self, &mut other);
        }
        for (key, count) in other.counts {
            let slot = self.counts.entry(key).or_insert(0);
            *slot = slot.saturating_add(count);
        }
        self.tokens_seen += other.tokens_seen;
        self.tokens_dropped += other.tokens_dropped;
        self
    }

    /// Count for one (word, document) pair; 0 when absent.
    pub fn get(&self, word: &str, document_id: &str) -> u32 {
        self.counts
            .get(&(word.to_string(), document_id.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct (word, document) pairs.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Tokens produced by the tokenizer, before filtering.
    pub fn tokens_seen(&self) -> u64 {
        self.tokens_seen
    }

    /// Tokens rejected by the filter.
    pub fn tokens_dropped(&self) -> u64 {
        self.tokens_dropped
    }

    /// Consume the table into one entry per (word, document) pair, in no particular order.
    pub fn into_entries(self) -> impl Iterator<Item = CountEntry> {
        self.counts
            .into_iter()
            .map(|((word, document_id), count)| CountEntry {
                word,
                document_id,
                count,
            })
    }

    /// Split the entries into `shards` key partitions. Every entry for a given
    /// word lands in the same shard, so shards can be grouped independently.
    pub fn partition(self, shards: usize) -> Vec<Vec<CountEntry>> {
        let shards = shards.max(1);
        let mut out: Vec<Vec<CountEntry>> = (0..shards).map(|_| Vec::new()).collect();
        for entry in self.into_entries() {
            out[shard_of(&entry.word, shards)].push(entry);
        }
        out
    }
}

/// Stable shard assignment for a word.
pub fn shard_of(word: &str, shards: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    word.hash(&mut hasher);
    (hasher.finish() % shards.max(1) as u64) as usize
}
