//! Record I/O: corpus input, output formatting, and the output directory.

pub mod corpus;
pub mod formatter;
pub mod reader;
pub mod writer;

pub use corpus::{parse_record, Corpus};
pub use formatter::{Formatter, OutputFormat};
pub use reader::IndexReader;
pub use writer::{clear_output, IndexWriter, WriteSummary, SUCCESS_MARKER};
