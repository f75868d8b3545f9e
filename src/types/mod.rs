//! Core data types: documents, count entries, posting lists, and errors.

pub mod document;
pub mod error;
pub mod posting;

pub use document::Document;
pub use error::{IndexError, IndexResult};
pub use posting::{CountEntry, Posting, WordPosting};
