//! Writes an index to an output directory of part files.
//!
//! Words are range-partitioned, so reading `part-00000`, `part-00001`, … in
//! name order yields ascending words. The `_SUCCESS` marker is written last;
//! a directory without it is not a valid index.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::index::InvertedIndex;
use crate::types::{IndexError, IndexResult, WordPosting};

use super::formatter::Formatter;

/// Marker file written after every part file is complete.
pub const SUCCESS_MARKER: &str = "_SUCCESS";

/// Name of the `i`-th part file.
pub fn part_file_name(i: usize) -> String {
    format!("part-{:05}", i)
}

/// Delete whatever is at `path`. Returns whether anything was removed.
///
/// This is destructive and never called implicitly by [`IndexWriter::write`].
pub fn clear_output(path: &Path) -> IndexResult<bool> {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(IndexError::unavailable(path, e)),
    };
    let removed = if meta.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    removed.map_err(|e| IndexError::unavailable(path, e))?;
    log::warn!("Cleared existing output at {}", path.display());
    Ok(true)
}

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    pub output: PathBuf,
    pub parts: Vec<PathBuf>,
    pub records: usize,
}

/// Writes formatted records into `partitions` part files.
#[derive(Debug, Clone)]
pub struct IndexWriter {
    formatter: Formatter,
    partitions: usize,
}

impl IndexWriter {
    pub fn new(formatter: Formatter, partitions: usize) -> Self {
        Self {
            formatter,
            partitions: partitions.max(1),
        }
    }

    pub fn partitions(&self) -> usize {
        self.partitions
    }

    /// Fail with [`IndexError::OutputAlreadyExists`] if anything is at `output`.
    pub fn ensure_absent(output: &Path) -> IndexResult<()> {
        match std::fs::symlink_metadata(output) {
            Ok(_) => Err(IndexError::OutputAlreadyExists(output.to_path_buf())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(IndexError::unavailable(output, e)),
        }
    }

    /// Write `index` into the new directory `output`. Missing parent
    /// directories are created; `output` itself must not exist.
    pub fn write(&self, index: &InvertedIndex, output: &Path) -> IndexResult<WriteSummary> {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| IndexError::unavailable(parent, e))?;
        }
        std::fs::create_dir(output).map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => {
                IndexError::OutputAlreadyExists(output.to_path_buf())
            }
            _ => IndexError::unavailable(output, e),
        })?;

        let words = index.words();
        let chunk = words.len().div_ceil(self.partitions).max(1);
        let parts = (0..self.partitions)
            .into_par_iter()
            .map(|i| -> IndexResult<PathBuf> {
                let start = (i * chunk).min(words.len());
                let end = ((i + 1) * chunk).min(words.len());
                let path = output.join(part_file_name(i));
                self.write_part(&path, &words[start..end])?;
                Ok(path)
            })
            .collect::<IndexResult<Vec<PathBuf>>>()?;

        let marker = output.join(SUCCESS_MARKER);
        File::create(&marker).map_err(|e| IndexError::unavailable(&marker, e))?;

        log::info!(
            "Wrote {} records to {} ({} part file(s))",
            words.len(),
            output.display(),
            parts.len()
        );
        Ok(WriteSummary {
            output: output.to_path_buf(),
            parts,
            records: words.len(),
        })
    }

    fn write_part(&self, path: &Path, words: &[WordPosting]) -> IndexResult<()> {
        let file = File::create(path).map_err(|e| IndexError::unavailable(path, e))?;
        let mut out = BufWriter::new(file);
        for entry in words {
            let record = self.formatter.format(entry)?;
            writeln!(out, "{}", record).map_err(|e| IndexError::unavailable(path, e))?;
        }
        out.flush().map_err(|e| IndexError::unavailable(path, e))?;
        Ok(())
    }
}
