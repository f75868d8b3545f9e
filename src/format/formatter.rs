//! Output records: one line per word.

use serde::{Deserialize, Serialize};

use crate::types::{IndexError, IndexResult, Posting, WordPosting};

/// Separator between the word and its posting list in text output.
pub const DEFAULT_SEPARATOR: &str = "\t";

/// Separator between postings in text output.
pub const LIST_SEPARATOR: &str = ", ";

/// Output record syntax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `word<SEP>(doc1,count1), (doc2,count2), ...`
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Renders ranked postings without re-ordering them, and parses them back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    format: OutputFormat,
    separator: String,
}

impl Formatter {
    pub fn new(format: OutputFormat, separator: impl Into<String>) -> Self {
        Self {
            format,
            separator: separator.into(),
        }
    }

    pub fn text(separator: impl Into<String>) -> Self {
        Self::new(OutputFormat::Text, separator)
    }

    pub fn json() -> Self {
        Self::new(OutputFormat::Json, DEFAULT_SEPARATOR)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Render one record, without a trailing newline.
    ///
    /// Text records cannot carry a document id containing the list separator
    /// or a line break; those fail with [`IndexError::MalformedIndexRecord`]
    /// instead of producing a line that would not parse back.
    pub fn format(&self, entry: &WordPosting) -> IndexResult<String> {
        match self.format {
            OutputFormat::Text => {
                if let Some(posting) = entry
                    .postings
                    .iter()
                    .find(|p| !is_text_safe_id(&p.document_id))
                {
                    return Err(IndexError::MalformedIndexRecord(format!(
                        "document id {:?} under {:?} cannot be written as text",
                        posting.document_id, entry.word
                    )));
                }
                Ok(format!(
                    "{}{}{}",
                    entry.word,
                    self.separator,
                    format_list(&entry.postings)
                ))
            }
            OutputFormat::Json => Ok(serde_json::to_string(entry)?),
        }
    }

    /// Parse a record produced by [`Formatter::format`].
    pub fn parse(&self, line: &str) -> IndexResult<WordPosting> {
        match self.format {
            OutputFormat::Text => self.parse_text(line),
            OutputFormat::Json => serde_json::from_str(line)
                .map_err(|e| IndexError::MalformedIndexRecord(format!("{}: {:?}", e, line))),
        }
    }

    fn parse_text(&self, line: &str) -> IndexResult<WordPosting> {
        let malformed = || IndexError::MalformedIndexRecord(format!("{:?}", line));

        let (word, list) = line.split_once(self.separator.as_str()).ok_or_else(malformed)?;
        let postings = list
            .split(LIST_SEPARATOR)
            .map(|item| parse_posting(item).ok_or_else(malformed))
            .collect::<IndexResult<Vec<_>>>()?;

        Ok(WordPosting {
            word: word.to_string(),
            postings,
        })
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::text(DEFAULT_SEPARATOR)
    }
}

/// `(doc1,count1), (doc2,count2), ...`
pub fn format_list(postings: &[Posting]) -> String {
    postings
        .iter()
        .map(Posting::to_string)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Whether `id` survives a round trip through the text syntax.
pub fn is_text_safe_id(id: &str) -> bool {
    !id.contains(LIST_SEPARATOR) && !id.contains(['\n', '\r'])
}

/// Document ids never contain a comma, so the last comma splits id from count.
fn parse_posting(item: &str) -> Option<Posting> {
    let inner = item.strip_prefix('(')?.strip_suffix(')')?;
    let (document_id, count) = inner.rsplit_once(',')?;
    Some(Posting {
        document_id: document_id.to_string(),
        count: count.parse().ok()?,
    })
}
