//! Run configuration, loaded from TOML and overridden by CLI flags.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::filter::{StopWordSet, TokenFilter};
use crate::engine::pipeline::{IndexPipeline, DEFAULT_SHARDS};
use crate::format::formatter::{Formatter, OutputFormat, DEFAULT_SEPARATOR};
use crate::format::writer::IndexWriter;
use crate::types::{IndexError, IndexResult};

/// Configuration for one indexing run. Every field has a default, so a
/// TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Corpus file or directory.
    pub input: Option<PathBuf>,
    /// Output directory. Must not exist unless `clear_output` is set.
    pub output: Option<PathBuf>,
    /// Extra stop words, one per line.
    pub stop_words_file: Option<PathBuf>,
    /// Include the built-in English stop words.
    pub builtin_stop_words: bool,
    /// Delete an existing output location before writing.
    pub clear_output: bool,
    /// Number of output part files.
    pub partitions: usize,
    /// Number of key partitions for grouping.
    pub shards: usize,
    /// Worker threads; 0 means one per core.
    pub threads: usize,
    pub format: OutputFormat,
    /// Text separator between a word and its posting list.
    pub separator: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            stop_words_file: None,
            builtin_stop_words: true,
            clear_output: false,
            partitions: 1,
            shards: DEFAULT_SHARDS,
            threads: 0,
            format: OutputFormat::Text,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl IndexConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> IndexResult<Self> {
        toml::from_str(text).map_err(|e| IndexError::InvalidConfig(e.to_string()))
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> IndexResult<Self> {
        let text =
            std::fs::read_to_string(path).map_err(|e| IndexError::unavailable(path, e))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> IndexResult<()> {
        if self.partitions == 0 {
            return Err(IndexError::InvalidConfig(
                "partitions must be at least 1".into(),
            ));
        }
        if self.shards == 0 {
            return Err(IndexError::InvalidConfig("shards must be at least 1".into()));
        }
        if self.separator.is_empty() {
            return Err(IndexError::InvalidConfig("separator must not be empty".into()));
        }
        // The separator must never be confused with a word or a line break.
        if self
            .separator
            .chars()
            .any(|c| c.is_alphanumeric() || c == '\'' || c == '\n' || c == '\r')
        {
            return Err(IndexError::InvalidConfig(format!(
                "separator {:?} may not contain word characters or line breaks",
                self.separator
            )));
        }
        Ok(())
    }

    pub fn input(&self) -> IndexResult<&Path> {
        self.input
            .as_deref()
            .ok_or_else(|| IndexError::InvalidConfig("input location is required".into()))
    }

    pub fn output(&self) -> IndexResult<&Path> {
        self.output
            .as_deref()
            .ok_or_else(|| IndexError::InvalidConfig("output location is required".into()))
    }

    /// Assemble the stop-word set: built-in list and/or the configured file.
    pub fn stop_words(&self) -> IndexResult<StopWordSet> {
        let mut set = if self.builtin_stop_words {
            StopWordSet::english()
        } else {
            StopWordSet::empty()
        };
        if let Some(path) = &self.stop_words_file {
            set = set.union(StopWordSet::from_file(path)?);
        }
        Ok(set)
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.format, self.separator.clone())
    }

    pub fn writer(&self) -> IndexWriter {
        IndexWriter::new(self.formatter(), self.partitions)
    }

    pub fn pipeline(&self) -> IndexResult<IndexPipeline> {
        let filter = TokenFilter::with_stop_words(self.stop_words()?);
        Ok(IndexPipeline::new(filter).with_shards(self.shards))
    }
}
