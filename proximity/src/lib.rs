pub mod discover;
pub mod report;

use anyhow::Result;
use discover::FileCorpus;
use posindex::index::TermStats;
use posindex::{evaluate, BuildReport, IndexBuilder, ProximityQuery, ReadPolicy, SearchOutcome};
use report::{write_reports, ReportPaths, WriteSummary};
use serde::Serialize;
use std::path::Path;

#[derive(Debug)]
pub struct QueryReport {
    pub outcome: SearchOutcome,
    /// Set when at least one match was written.
    pub written: Option<(ReportPaths, WriteSummary)>,
}

#[derive(Debug, Serialize)]
pub struct StatsFile {
    pub created_at: String,
    pub documents: usize,
    pub skipped: Vec<String>,
    pub tokens: u64,
    pub term_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub terms: Vec<TermStats>,
}

fn build_index(input: &Path, policy: ReadPolicy) -> Result<(FileCorpus, BuildReport)> {
    let corpus = FileCorpus::discover(input)?;
    tracing::info!("building positional index");
    let report = IndexBuilder::build(&corpus, policy)?;
    Ok((corpus, report))
}

/// Index every `.txt` file under `input`, run `query` and write the CSV reports into `output`.
/// Reports from an earlier run of the same query are removed first.
pub fn run_query(input: &Path, output: &Path, query: &ProximityQuery, policy: ReadPolicy) -> Result<QueryReport> {
    let paths = ReportPaths::new(output, query);
    paths.clear()?;
    let (corpus, built) = build_index(input, policy)?;

    tracing::info!(first = %query.first, second = %query.second, k = query.distance, "performing proximity search");
    let outcome = evaluate(&built.index, query);
    let written = match &outcome {
        SearchOutcome::Matches(records) => {
            tracing::info!(matches = records.len(), "writing results into CSV files");
            let summary = write_reports(&paths, records, &corpus, policy)?;
            Some((paths, summary))
        }
        SearchOutcome::TermAbsent { .. } | SearchOutcome::NoMatches => None,
    };
    Ok(QueryReport { outcome, written })
}

/// Index every `.txt` file under `input` and describe the result. `summary` leaves out per-term detail.
pub fn run_stats(input: &Path, policy: ReadPolicy, summary: bool) -> Result<StatsFile> {
    let (_, built) = build_index(input, policy)?;
    let stats = built.index.stats();
    Ok(StatsFile {
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "".into()),
        documents: built.documents,
        skipped: built.skipped.into_iter().map(|s| s.label).collect(),
        tokens: built.tokens,
        term_count: stats.term_count,
        terms: if summary { Vec::new() } else { stats.terms },
    })
}
