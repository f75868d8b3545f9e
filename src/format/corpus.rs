//! Corpus input: one `(documentId, text)` record per line.
//!
//! Malformed lines are logged and replaced by an empty document, so a bad
//! line never aborts a run and never contributes tokens. Blank lines are
//! logged at debug level and skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::types::{Document, IndexError, IndexResult};

/// Parse one record. `line_number` is 1-based and only used for the error.
///
/// The document id is everything between the opening parenthesis and the
/// first comma; the text is everything after that comma up to the closing
/// parenthesis. Both are trimmed.
pub fn parse_record(line: &str, line_number: usize) -> IndexResult<Document> {
    let malformed = || IndexError::MalformedInputLine {
        line_number,
        line: line.to_string(),
    };

    let inner = line
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(malformed)?;
    let (id, text) = inner.split_once(',').ok_or_else(malformed)?;
    let id = id.trim();
    if id.is_empty() {
        return Err(malformed());
    }

    Ok(Document::new(id, text.trim()))
}

/// All documents of one run.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// One entry per non-blank input line, placeholders included.
    pub documents: Vec<Document>,
    /// Number of malformed lines replaced by placeholders.
    pub malformed: usize,
    /// Number of blank lines skipped. They carry no record.
    pub blank: usize,
    /// Files the corpus was read from, in read order.
    pub sources: Vec<PathBuf>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from in-memory lines.
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut corpus = Self::new();
        for (i, line) in lines.into_iter().enumerate() {
            corpus.push_line(line, i + 1, "<memory>");
        }
        corpus
    }

    /// Read a corpus file, or every data file of a corpus directory.
    pub fn read(path: &Path) -> IndexResult<Self> {
        let mut corpus = Self::new();
        for file in corpus_files(path)? {
            corpus.read_file(&file)?;
        }
        log::info!(
            "Read {} records ({} malformed) from {} file(s)",
            corpus.documents.len(),
            corpus.malformed,
            corpus.sources.len()
        );
        Ok(corpus)
    }

    fn read_file(&mut self, path: &Path) -> IndexResult<()> {
        let file = File::open(path).map_err(|e| IndexError::unavailable(path, e))?;
        let source = path.display().to_string();
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| IndexError::unavailable(path, e))?;
            self.push_line(&line, i + 1, &source);
        }
        self.sources.push(path.to_path_buf());
        Ok(())
    }

    fn push_line(&mut self, line: &str, line_number: usize, source: &str) {
        if line.trim().is_empty() {
            log::debug!("{}:{}: skipping blank line", source, line_number);
            self.blank += 1;
            return;
        }
        match parse_record(line, line_number) {
            Ok(doc) => self.documents.push(doc),
            Err(e) => {
                log::warn!("{}: {}", source, e);
                self.malformed += 1;
                self.documents.push(Document::empty());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Resolve the input location to the files to read. A directory yields its
/// regular files whose names do not start with `.` or `_`, sorted by name.
pub fn corpus_files(path: &Path) -> IndexResult<Vec<PathBuf>> {
    let meta = std::fs::metadata(path).map_err(|e| IndexError::unavailable(path, e))?;
    if !meta.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(path).map_err(|e| IndexError::unavailable(path, e))? {
        let entry = entry.map_err(|e| IndexError::unavailable(path, e))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }
        let file_path = entry.path();
        if file_path.is_file() {
            files.push(file_path);
        }
    }
    files.sort();
    Ok(files)
}
