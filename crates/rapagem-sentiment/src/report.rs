//! CSV rendering of the detailed and aggregate sentiment reports.
//!
//! Column names and value vocabularies are consumed by editorial tooling
//! downstream and must not change.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::SentimentError;
use crate::pipeline::SentimentRun;
use crate::types::{PairSentiment, PersonAggregate};

pub const DETAILED_HEADER: [&str; 21] = [
    "id_pessoa",
    "nome_pessoa",
    "comment_key",
    "artigo_url",
    "data_comentario",
    "comentario_sentimento",
    "comentario_score",
    "comentario_confianca",
    "comentario_hits",
    "alvo_mencionado",
    "referencia_materia",
    "stance_noticia",
    "noticia_sentimento",
    "noticia_score",
    "noticia_confianca",
    "noticia_hits",
    "sentimento_final",
    "confianca_final",
    "origem",
    "metodo",
    "versao",
];

pub const AGGREGATE_HEADER: [&str; 10] = [
    "id_pessoa",
    "nome_pessoa",
    "qtd_total",
    "qtd_pos",
    "qtd_neg",
    "qtd_neu",
    "pct_pos",
    "pct_neg",
    "pct_neu",
    "pct_mencao_direta",
];

/// Where [`write_reports`] put the two files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub detailed: PathBuf,
    pub aggregate: PathBuf,
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

fn detailed_record(row: &PairSentiment) -> [String; 21] {
    [
        row.person_id.to_string(),
        row.person_name.clone(),
        row.comment_key.clone(),
        row.article_url.clone(),
        row.comment_timestamp.clone().unwrap_or_default(),
        row.comment.label.to_string(),
        format!("{:.4}", row.comment.score),
        format!("{:.3}", row.comment.confidence),
        row.comment.hits.to_string(),
        flag(row.mentioned()).to_string(),
        flag(row.stance.references_article).to_string(),
        row.stance.stance.to_string(),
        row.article.label.to_string(),
        format!("{:.4}", row.article.score),
        format!("{:.3}", row.article.confidence),
        row.article.hits.to_string(),
        row.result.label.to_string(),
        format!("{:.3}", row.result.confidence),
        row.result.origin.to_string(),
        row.method.to_string(),
        row.version.to_string(),
    ]
}

fn aggregate_record(row: &PersonAggregate) -> [String; 10] {
    [
        row.person_id.to_string(),
        row.person_name.clone(),
        row.total.to_string(),
        row.positive.to_string(),
        row.negative.to_string(),
        row.neutral.to_string(),
        format!("{:.2}", row.pct_positive),
        format!("{:.2}", row.pct_negative),
        format!("{:.2}", row.pct_neutral),
        format!("{:.2}", row.pct_direct_mention),
    ]
}

/// Write the detailed report (header plus one row per pair) to `writer`.
///
/// # Errors
///
/// Returns [`SentimentError::Csv`] or [`SentimentError::Io`] if writing fails.
pub fn write_detailed<W: Write>(writer: W, rows: &[PairSentiment]) -> Result<(), SentimentError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(DETAILED_HEADER)?;
    for row in rows {
        csv.write_record(detailed_record(row))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the aggregate report (header plus one row per person) to `writer`.
///
/// # Errors
///
/// Returns [`SentimentError::Csv`] or [`SentimentError::Io`] if writing fails.
pub fn write_aggregate<W: Write>(
    writer: W,
    rows: &[PersonAggregate],
) -> Result<(), SentimentError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(AGGREGATE_HEADER)?;
    for row in rows {
        csv.write_record(aggregate_record(row))?;
    }
    csv.flush()?;
    Ok(())
}

/// Fill a temp file beside `path` without touching `path` itself.
fn stage<F>(path: &Path, fill: F) -> Result<NamedTempFile, SentimentError>
where
    F: FnOnce(&mut NamedTempFile) -> Result<(), SentimentError>,
{
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    if path.file_name().is_none() {
        return Err(SentimentError::InvalidReportPath {
            path: path.display().to_string(),
        });
    }
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    fill(&mut tmp)?;
    tmp.as_file().sync_all()?;
    Ok(tmp)
}

/// Write a file by filling a temp file beside `path` and renaming it into place.
///
/// A failure part-way leaves any previous file at `path` untouched.
///
/// # Errors
///
/// Returns [`SentimentError`] if the directory cannot be created, `fill`
/// fails, or the rename fails.
pub fn write_atomic<F>(path: &Path, fill: F) -> Result<(), SentimentError>
where
    F: FnOnce(&mut NamedTempFile) -> Result<(), SentimentError>,
{
    stage(path, fill)?.persist(path)?;
    Ok(())
}

/// Write both reports for a finished run.
///
/// Both files are rendered to temp files first and only renamed into place
/// once both renders succeeded, so a render failure never leaves a new
/// detailed report next to a stale aggregate.
///
/// # Errors
///
/// Returns [`SentimentError`] if either report cannot be written.
pub fn write_reports(
    run: &SentimentRun,
    detailed: &Path,
    aggregate: &Path,
) -> Result<ReportPaths, SentimentError> {
    let detailed_tmp = stage(detailed, |f| write_detailed(f, &run.pairs))?;
    let aggregate_tmp = stage(aggregate, |f| write_aggregate(f, &run.aggregates))?;

    detailed_tmp.persist(detailed)?;
    tracing::info!(path = %detailed.display(), rows = run.pairs.len(), "wrote detailed report");

    aggregate_tmp.persist(aggregate)?;
    tracing::info!(
        path = %aggregate.display(),
        rows = run.aggregates.len(),
        "wrote aggregate report"
    );

    Ok(ReportPaths {
        detailed: detailed.to_path_buf(),
        aggregate: aggregate.to_path_buf(),
    })
}

/// Render aggregates as a markdown table.
#[must_use]
pub fn render_markdown_summary(rows: &[PersonAggregate]) -> String {
    let mut out = String::new();
    out.push_str("| Pessoa | Total | Pos | Neg | Neu | % Pos | % Neg | % Neu | % Menção |\n");
    out.push_str("|--------|-------|-----|-----|-----|-------|-------|-------|----------|\n");
    for r in rows {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {:.2} | {:.2} | {:.2} | {:.2} |\n",
            r.person_name.replace('|', "\\|"),
            r.total,
            r.positive,
            r.negative,
            r.neutral,
            r.pct_positive,
            r.pct_negative,
            r.pct_neutral,
            r.pct_direct_mention,
        ));
    }
    out
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
