use anyhow::{Context, Result};
use posindex::{DocId, DocumentSource, MatchRecord, PhraseExtractor, Position, ProximityQuery, ReadPolicy};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const RESULT_FILE: &str = "proximity_query_result.csv";
pub const DETAILED_FILE: &str = "proximity_query_detailed_result.csv";

const RESULT_HEADER: [&str; 3] = ["DocID", "First Position", "Second Position"];
const DETAILED_HEADER: [&str; 5] = ["DocID", "Filepath", "First Position", "Second Position", "Exact Phrase"];

#[derive(Debug, Serialize)]
struct ResultRow {
    doc_id: DocId,
    first: Position,
    second: Position,
}

#[derive(Debug, Serialize)]
struct DetailedRow<'a> {
    doc_id: DocId,
    path: &'a str,
    first: Position,
    second: Position,
    phrase: &'a str,
}

/// Output files for one query, named `{x}_{y}_{k}_<kind>.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub result: PathBuf,
    pub detailed: PathBuf,
}

impl ReportPaths {
    pub fn new(dir: &Path, query: &ProximityQuery) -> Self {
        let prefix = format!("{}_{}_{}", query.first, query.second, query.distance);
        Self {
            result: dir.join(format!("{prefix}_{RESULT_FILE}")),
            detailed: dir.join(format!("{prefix}_{DETAILED_FILE}")),
        }
    }

    /// Remove both files if present, so a run without matches leaves no stale report behind.
    pub fn clear(&self) -> Result<()> {
        for path in [&self.result, &self.detailed] {
            match fs::remove_file(path) {
                Ok(()) => tracing::debug!(path = %path.display(), "removed previous report"),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(err).with_context(|| format!("cannot remove {}", path.display())),
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    pub rows: usize,
    pub detailed_rows: usize,
}

fn create_writer(path: &Path, header: &[&str]) -> Result<csv::Writer<fs::File>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    writer.write_record(header).with_context(|| format!("cannot write {}", path.display()))?;
    Ok(writer)
}

/// Write both CSV files, each starting with its header row.
///
/// A match whose document cannot be reread under [`ReadPolicy::Lenient`] keeps
/// its result row but gets no detailed row. On any error both files are removed.
pub fn write_reports<S: DocumentSource + ?Sized>(
    paths: &ReportPaths,
    records: &[MatchRecord],
    source: &S,
    policy: ReadPolicy,
) -> Result<WriteSummary> {
    if let Some(dir) = paths.result.parent() {
        fs::create_dir_all(dir).with_context(|| format!("cannot create output directory {}", dir.display()))?;
    }
    match write_rows(paths, records, source, policy) {
        Ok(summary) => {
            tracing::info!(rows = summary.rows, detailed_rows = summary.detailed_rows, "wrote query reports");
            Ok(summary)
        }
        Err(err) => {
            if let Err(cleanup) = paths.clear() {
                tracing::warn!(error = %cleanup, "cannot remove incomplete reports");
            }
            Err(err)
        }
    }
}

fn write_rows<S: DocumentSource + ?Sized>(
    paths: &ReportPaths,
    records: &[MatchRecord],
    source: &S,
    policy: ReadPolicy,
) -> Result<WriteSummary> {
    let mut result = create_writer(&paths.result, &RESULT_HEADER)?;
    let mut detailed = create_writer(&paths.detailed, &DETAILED_HEADER)?;

    let extractor = PhraseExtractor::new(source, policy);
    let mut summary = WriteSummary { rows: 0, detailed_rows: 0 };
    for r in records {
        result
            .serialize(ResultRow { doc_id: r.doc_id, first: r.first_pos, second: r.second_pos })
            .with_context(|| format!("cannot write {}", paths.result.display()))?;
        summary.rows += 1;

        let Some(phrase) = extractor.phrase_for(r)? else { continue };
        let path = source.label(r.doc_id).unwrap_or_default();
        detailed
            .serialize(DetailedRow {
                doc_id: r.doc_id,
                path: &path,
                first: r.first_pos,
                second: r.second_pos,
                phrase: &phrase,
            })
            .with_context(|| format!("cannot write {}", paths.detailed.display()))?;
        summary.detailed_rows += 1;
    }
    result.flush().with_context(|| format!("cannot write {}", paths.result.display()))?;
    detailed.flush().with_context(|| format!("cannot write {}", paths.detailed.display()))?;
    Ok(summary)
}
