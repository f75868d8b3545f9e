//! Aggregation stages and the finished index: counting, grouping, ranking.

pub mod counter;
pub mod grouper;
pub mod inverted_index;
pub mod ranker;

pub use counter::{CountKey, CountTable};
pub use grouper::group_by_word;
pub use inverted_index::InvertedIndex;
pub use ranker::{posting_order, rank, rank_postings};
