//! Reads an index back from an output directory.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::index::InvertedIndex;
use crate::types::{IndexError, IndexResult};

use super::formatter::Formatter;
use super::writer::SUCCESS_MARKER;

/// Parses part files written by [`super::writer::IndexWriter`].
#[derive(Debug, Clone, Default)]
pub struct IndexReader {
    formatter: Formatter,
}

impl IndexReader {
    pub fn new(formatter: Formatter) -> Self {
        Self { formatter }
    }

    /// Read and validate a complete index. Directories without the success
    /// marker are rejected.
    pub fn read(&self, dir: &Path) -> IndexResult<InvertedIndex> {
        if !dir.join(SUCCESS_MARKER).is_file() {
            return Err(IndexError::IncompleteOutput(dir.to_path_buf()));
        }

        let mut words = Vec::new();
        for part in part_files(dir)? {
            let file = File::open(&part).map_err(|e| IndexError::unavailable(&part, e))?;
            for line in BufReader::new(file).lines() {
                let line = line.map_err(|e| IndexError::unavailable(&part, e))?;
                if line.is_empty() {
                    continue;
                }
                words.push(self.formatter.parse(&line)?);
            }
        }

        let index = InvertedIndex::from_words(words)?;
        log::debug!("Read {} words from {}", index.term_count(), dir.display());
        Ok(index)
    }
}

/// `part-*` files of an output directory, sorted by name.
pub fn part_files(dir: &Path) -> IndexResult<Vec<PathBuf>> {
    let mut parts = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| IndexError::unavailable(dir, e))? {
        let entry = entry.map_err(|e| IndexError::unavailable(dir, e))?;
        if entry.file_name().to_string_lossy().starts_with("part-") {
            parts.push(entry.path());
        }
    }
    parts.sort();
    Ok(parts)
}
