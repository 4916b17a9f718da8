mod corpus;
mod sentiment;

use clap::{Parser, Subcommand};
use rapagem_core::AppConfig;
use rapagem_db::PoolConfig;
use sqlx::SqlitePool;
use tracing_subscriber::EnvFilter;

use crate::corpus::ReportCommands;
use crate::sentiment::SentimentCommands;

#[derive(Debug, Parser)]
#[command(name = "rapagem-cli")]
#[command(about = "Targeted sentiment and corpus reports over scraped news comments")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Per-person comment sentiment
    Sentiment {
        #[command(subcommand)]
        command: SentimentCommands,
    },
    /// Descriptive reports over the stored corpus
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database can be opened and queried
    Ping,
    /// Apply pending schema migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = rapagem_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Db { command }) => match command {
            DbCommands::Ping => {
                let pool = connect_read_only(&config).await?;
                rapagem_db::ping(&pool).await?;
                println!("database ok");
            }
            DbCommands::Migrate => {
                let pool = rapagem_db::connect_pool(
                    &config.database_url,
                    PoolConfig::from_app_config(&config),
                )
                .await?;
                let applied = rapagem_db::run_migrations(&pool).await?;
                println!("applied {applied} migration(s)");
            }
        },
        Some(Commands::Sentiment { command }) => {
            let pool = connect_read_only(&config).await?;
            match command {
                SentimentCommands::Report { out_dir, lexicon } => {
                    sentiment::run_sentiment_report(&pool, &config, out_dir, lexicon).await?;
                }
                SentimentCommands::Summary {
                    person,
                    json,
                    lexicon,
                } => {
                    sentiment::run_sentiment_summary(
                        &pool,
                        &config,
                        person.as_deref(),
                        json,
                        lexicon,
                    )
                    .await?;
                }
            }
        }
        Some(Commands::Report { command }) => {
            let pool = connect_read_only(&config).await?;
            match command {
                ReportCommands::Corpus { out_dir, only } => {
                    corpus::run_corpus_reports(&pool, &config, out_dir, &only).await?;
                }
            }
        }
        None => println!("rapagem-cli: run with --help to list commands"),
    }

    Ok(())
}

/// Reports never write to the store, and a missing database is an error
/// rather than something to create.
async fn connect_read_only(config: &AppConfig) -> anyhow::Result<SqlitePool> {
    let pool_config = PoolConfig::from_app_config(config).read_only();
    let pool = rapagem_db::connect_pool(&config.database_url, pool_config).await?;
    Ok(pool)
}
