//! Sentiment command handlers for the CLI.

use std::path::PathBuf;

use clap::Subcommand;
use rapagem_core::{normalize, AppConfig};
use rapagem_sentiment::report::render_markdown_summary;
use rapagem_sentiment::{run_sentiment, write_reports, Lexicon, PersonAggregate, SentimentRun};
use sqlx::SqlitePool;

/// Sub-commands available under `sentiment`.
#[derive(Debug, Subcommand)]
pub enum SentimentCommands {
    /// Write the detailed and aggregate sentiment CSV reports
    Report {
        /// Directory for both reports (defaults to `RAPAGEM_REPORTS_DIR`)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// YAML file extending the built-in lexicon
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },
    /// Print per-person sentiment statistics without writing files
    Summary {
        /// Only show persons whose name contains this text (case and accent insensitive)
        #[arg(long)]
        person: Option<String>,

        /// Print JSON instead of a markdown table
        #[arg(long)]
        json: bool,

        /// YAML file extending the built-in lexicon
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },
}

/// Load the lexicon, then the corpus, and score every pair.
///
/// The lexicon goes first so a bad extension file fails before the store is
/// read.
async fn compute(
    pool: &SqlitePool,
    config: &AppConfig,
    lexicon_override: Option<PathBuf>,
) -> anyhow::Result<SentimentRun> {
    let lexicon_path = lexicon_override.or_else(|| config.lexicon_path.clone());
    let lexicon = Lexicon::load(lexicon_path.as_deref())?;
    tracing::debug!(entries = lexicon.len(), "lexicon ready");

    let corpus = rapagem_db::load_corpus(pool).await?;
    let run = run_sentiment(&lexicon, &corpus);
    tracing::info!(
        pairs = run.pairs.len(),
        persons = run.aggregates.len(),
        "sentiment computed"
    );
    Ok(run)
}

/// Compute sentiment for every (comment, person) pair and write both reports.
///
/// # Errors
///
/// Returns an error if the lexicon file is invalid, the corpus cannot be
/// read, or either report cannot be written. No report is written unless
/// the whole corpus was read.
pub(crate) async fn run_sentiment_report(
    pool: &SqlitePool,
    config: &AppConfig,
    out_dir: Option<PathBuf>,
    lexicon: Option<PathBuf>,
) -> anyhow::Result<()> {
    let run = compute(pool, config, lexicon).await?;

    let dir = out_dir.unwrap_or_else(|| config.reports_dir.clone());
    let paths = write_reports(
        &run,
        &dir.join(&config.detailed_report_file),
        &dir.join(&config.aggregate_report_file),
    )?;

    println!("{}", paths.detailed.display());
    println!("{}", paths.aggregate.display());
    Ok(())
}

/// Print the per-person aggregate as markdown or JSON.
///
/// # Errors
///
/// Returns an error if the corpus cannot be read or no person matches the
/// filter.
pub(crate) async fn run_sentiment_summary(
    pool: &SqlitePool,
    config: &AppConfig,
    person_filter: Option<&str>,
    json: bool,
    lexicon: Option<PathBuf>,
) -> anyhow::Result<()> {
    let run = compute(pool, config, lexicon).await?;
    let rows = filter_aggregates(run.aggregates, person_filter);

    if let Some(filter) = person_filter {
        if rows.is_empty() {
            anyhow::bail!("no person matching '{filter}'");
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render_markdown_summary(&rows));
    }
    Ok(())
}

fn filter_aggregates(rows: Vec<PersonAggregate>, filter: Option<&str>) -> Vec<PersonAggregate> {
    let Some(filter) = filter.map(normalize).filter(|f| !f.is_empty()) else {
        return rows;
    };
    rows.into_iter()
        .filter(|row| normalize(&row.person_name).contains(&filter))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
