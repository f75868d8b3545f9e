//! Inverted index construction over a static batch of documents.
//!
//! For every distinct word the index lists the documents containing it and
//! how often, ranked by count descending then document id ascending. Words
//! are emitted in ascending order.
//!
//! ```
//! use inverted_index::{Document, IndexPipeline, StopWordSet, TokenFilter};
//!
//! let docs = vec![
//!     Document::new("doc1", "the cat sat"),
//!     Document::new("doc2", "the dog sat"),
//! ];
//! let pipeline = IndexPipeline::new(TokenFilter::with_stop_words(StopWordSet::new(["the"])));
//! let index = pipeline.build(&docs);
//!
//! assert_eq!(index.term_count(), 3);
//! assert_eq!(index.doc_frequency("sat"), 2);
//! assert!(index.get("the").is_empty());
//! ```

pub mod config;
pub mod engine;
pub mod format;
pub mod index;
pub mod types;

pub use config::IndexConfig;
pub use engine::{
    is_numeric, run, IndexPipeline, IndexReport, JobSummary, StopWordSet, StopWords,
    TermFrequencies, TokenFilter, Tokenizer, Tokens,
};
pub use format::{
    clear_output, parse_record, Corpus, Formatter, IndexReader, IndexWriter, OutputFormat,
    WriteSummary, SUCCESS_MARKER,
};
pub use index::{CountTable, InvertedIndex};
pub use types::{CountEntry, Document, IndexError, IndexResult, Posting, WordPosting};
