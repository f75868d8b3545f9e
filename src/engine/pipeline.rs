//! The indexing pipeline: tokenize → filter → count → group → rank.
//!
//! Documents are counted in parallel and reduced into a single table. The
//! table is then split into key partitions by word, and every shard is
//! grouped and ranked independently before the final word ordering.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::format::corpus::Corpus;
use crate::index::counter::CountTable;
use crate::index::grouper::group_by_word;
use crate::index::inverted_index::InvertedIndex;
use crate::index::ranker::rank;
use crate::types::{Document, IndexError, IndexResult, WordPosting};

use super::filter::TokenFilter;
use super::tokenizer::Tokenizer;

/// Default number of key partitions for the grouping stage.
pub const DEFAULT_SHARDS: usize = 8;

/// Summary of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexReport {
    /// Documents with content (malformed-line placeholders excluded).
    pub documents: usize,
    /// Input lines that did not match `(documentId, text)`.
    pub malformed_lines: usize,
    pub tokens_seen: u64,
    /// Tokens rejected as stop words or numbers.
    pub tokens_dropped: u64,
    /// Distinct (word, document) pairs.
    pub count_entries: usize,
    pub words: usize,
}

/// Builds an [`InvertedIndex`] from a closed batch of documents.
#[derive(Debug, Clone)]
pub struct IndexPipeline {
    tokenizer: Tokenizer,
    filter: TokenFilter,
    shards: usize,
}

impl IndexPipeline {
    pub fn new(filter: TokenFilter) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            filter,
            shards: DEFAULT_SHARDS,
        }
    }

    /// Set the number of key partitions (at least 1).
    pub fn with_shards(mut self, shards: usize) -> Self {
        self.shards = shards.max(1);
        self
    }

    pub fn shards(&self) -> usize {
        self.shards
    }

    pub fn filter(&self) -> &TokenFilter {
        &self.filter
    }

    /// Count every (word, document) pair across the corpus.
    pub fn count(&self, documents: &[Document]) -> CountTable {
        documents
            .par_iter()
            .map(|doc| CountTable::count_document(doc, &self.tokenizer, &self.filter))
            .reduce(CountTable::new, CountTable::merge)
    }

    /// Group and rank a finished count table.
    pub fn rank(&self, table: CountTable) -> Vec<WordPosting> {
        let shards = table.partition(self.shards);
        log::debug!("Grouping across {} shards", shards.len());

        let mut words: Vec<WordPosting> = shards
            .into_par_iter()
            .flat_map_iter(|entries| rank(group_by_word(entries)))
            .collect();
        // Shards hold disjoint words, so this only interleaves them.
        words.par_sort_unstable_by(|a, b| a.word.cmp(&b.word));
        words
    }

    /// Build the index.
    pub fn build(&self, documents: &[Document]) -> InvertedIndex {
        self.build_with_report(documents).0
    }

    /// Build the index and report what happened.
    pub fn build_with_report(&self, documents: &[Document]) -> (InvertedIndex, IndexReport) {
        let table = self.count(documents);
        let mut report = IndexReport {
            documents: documents.iter().filter(|d| !d.is_empty()).count(),
            tokens_seen: table.tokens_seen(),
            tokens_dropped: table.tokens_dropped(),
            count_entries: table.len(),
            ..IndexReport::default()
        };
        log::debug!(
            "Counted {} (word, document) pairs from {} tokens",
            report.count_entries,
            report.tokens_seen
        );

        let index = InvertedIndex::from_ranked(self.rank(table));
        report.words = index.term_count();
        (index, report)
    }

    /// Build from a parsed corpus, carrying its malformed-line count into the report.
    pub fn build_corpus(&self, corpus: &Corpus) -> (InvertedIndex, IndexReport) {
        let (index, mut report) = self.build_with_report(&corpus.documents);
        report.malformed_lines = corpus.malformed;
        (index, report)
    }

    /// Run [`IndexPipeline::build_corpus`] on a dedicated pool of `threads`
    /// workers. `0` uses the global pool.
    pub fn build_corpus_in_pool(
        &self,
        corpus: &Corpus,
        threads: usize,
    ) -> IndexResult<(InvertedIndex, IndexReport)> {
        if threads == 0 {
            return Ok(self.build_corpus(corpus));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("invidx-worker-{}", i))
            .build()
            .map_err(|e| IndexError::ThreadPool(e.to_string()))?;
        Ok(pool.install(|| self.build_corpus(corpus)))
    }
}

impl Default for IndexPipeline {
    fn default() -> Self {
        Self::new(TokenFilter::default())
    }
}
