//! Processing stages: tokenizing, filtering, and the pipeline that drives them.

pub mod filter;
pub mod job;
pub mod pipeline;
pub mod tokenizer;

pub use filter::{is_numeric, StopWordSet, StopWords, TokenFilter};
pub use job::{run, JobSummary};
pub use pipeline::{IndexPipeline, IndexReport};
pub use tokenizer::{TermFrequencies, Tokenizer, Tokens};
