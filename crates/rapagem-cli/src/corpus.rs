//! Descriptive corpus report handlers for the CLI.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use rapagem_core::AppConfig;
use rapagem_db::{find_corpus_report, run_corpus_report, CorpusReport, ReportTable, CORPUS_REPORTS};
use rapagem_sentiment::report::write_atomic;
use rapagem_sentiment::SentimentError;
use sqlx::SqlitePool;

/// Sub-commands available under `report`.
#[derive(Debug, Subcommand)]
pub enum ReportCommands {
    /// Write CSV summaries of articles, persons and comments
    Corpus {
        /// Output directory (defaults to `RAPAGEM_REPORTS_DIR`)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Only generate these reports (e.g. `articles people_rank`)
        #[arg(long, num_args = 1..)]
        only: Vec<String>,
    },
}

/// Resolve `--only` names to reports, keeping the canonical order.
///
/// An empty selection means every report.
///
/// # Errors
///
/// Returns an error naming the available reports if a name is unknown.
fn select_reports(only: &[String]) -> anyhow::Result<Vec<&'static CorpusReport>> {
    if only.is_empty() {
        return Ok(CORPUS_REPORTS.iter().collect());
    }

    for name in only {
        if find_corpus_report(name).is_none() {
            let available: Vec<&str> = CORPUS_REPORTS.iter().map(|r| r.name).collect();
            anyhow::bail!(
                "unknown report '{name}'; available: {}",
                available.join(", ")
            );
        }
    }

    Ok(CORPUS_REPORTS
        .iter()
        .filter(|r| only.iter().any(|name| name == r.name))
        .collect())
}

fn write_table<W: Write>(writer: W, table: &ReportTable) -> Result<(), SentimentError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(&table.columns)?;
    for row in &table.rows {
        csv.write_record(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Run the selected corpus reports and write one CSV per report.
///
/// # Errors
///
/// Returns an error on an unknown report name, a failed query, or a failed
/// write. Reports written before the failure are kept.
pub(crate) async fn run_corpus_reports(
    pool: &SqlitePool,
    config: &AppConfig,
    out_dir: Option<PathBuf>,
    only: &[String],
) -> anyhow::Result<()> {
    let reports = select_reports(only)?;
    let dir = out_dir.unwrap_or_else(|| config.reports_dir.clone());

    for report in reports {
        let table = run_corpus_report(pool, report).await?;
        let path = dir.join(report.file_name);
        write_report_file(&path, &table)?;
        tracing::info!(
            report = report.name,
            rows = table.rows.len(),
            path = %path.display(),
            "wrote corpus report"
        );
        println!("{}", path.display());
    }

    Ok(())
}

fn write_report_file(path: &Path, table: &ReportTable) -> Result<(), SentimentError> {
    write_atomic(path, |file| write_table(file, table))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
