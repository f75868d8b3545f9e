//! One complete indexing run: read corpus, build index, write output.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::IndexConfig;
use crate::format::corpus::Corpus;
use crate::format::writer::{clear_output, IndexWriter};
use crate::types::IndexResult;

use super::pipeline::IndexReport;

/// Outcome of [`run`].
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub report: IndexReport,
    pub output: PathBuf,
    pub parts: usize,
    /// Whether an existing output location was cleared first.
    pub cleared: bool,
}

/// Run the whole batch. Any fatal error aborts before the success marker is
/// written, so no partial output is ever valid.
pub fn run(config: &IndexConfig) -> IndexResult<JobSummary> {
    config.validate()?;
    let input = config.input()?;
    let output = config.output()?;

    if !config.clear_output {
        IndexWriter::ensure_absent(output)?;
    }

    // Stop words and input must load before an existing output is cleared.
    let pipeline = config.pipeline()?;
    let corpus = Corpus::read(input)?;
    let cleared = config.clear_output && clear_output(output)?;

    let (index, report) = pipeline.build_corpus_in_pool(&corpus, config.threads)?;
    log::info!(
        "Indexed {} words over {} documents ({} tokens dropped)",
        report.words,
        report.documents,
        report.tokens_dropped
    );

    let written = config.writer().write(&index, output)?;
    Ok(JobSummary {
        report,
        output: written.output,
        parts: written.parts.len(),
        cleared,
    })
}
