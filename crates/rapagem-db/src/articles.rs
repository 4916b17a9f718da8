//! Database operations for the `artigos` table.

use chrono::{DateTime, Utc};
use rapagem_core::Article;
use sqlx::SqlitePool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `artigos` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArticleRow {
    pub url: String,
    pub title: Option<String>,
    pub body: Option<String>,
    pub date: Option<String>,
    /// Names that matched the scraper's filter, comma separated.
    pub matched_names: Option<String>,
    pub scraped_at: DateTime<Utc>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Article {
            url: row.url,
            date: row.date,
            title: row.title.unwrap_or_default(),
            body: row.body.unwrap_or_default(),
            scraped_at: row.scraped_at,
        }
    }
}

/// Fields written by [`upsert_article`].
#[derive(Debug, Clone, Default)]
pub struct NewArticle {
    pub url: String,
    pub title: Option<String>,
    pub body: Option<String>,
    pub date: Option<String>,
    pub matched_names: Option<String>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns all articles ordered by URL.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_articles<'e, E>(executor: E) -> Result<Vec<ArticleRow>, DbError>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, ArticleRow>(
        "SELECT url, title, body, date, matched_names, scraped_at \
         FROM artigos \
         ORDER BY url",
    )
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

/// Insert an article or refresh its content if the URL already exists.
///
/// # Errors
///
/// Returns [`DbError::InvalidInput`] for a blank URL, or [`DbError::Sqlx`]
/// if the statement fails.
pub async fn upsert_article(pool: &SqlitePool, article: &NewArticle) -> Result<(), DbError> {
    if article.url.trim().is_empty() {
        return Err(DbError::InvalidInput("article url must be non-empty".to_string()));
    }

    sqlx::query(
        "INSERT INTO artigos (url, title, body, date, matched_names) \
         VALUES ($1, $2, $3, $4, $5) \
         ON CONFLICT(url) DO UPDATE SET \
             title = excluded.title, \
             body = excluded.body, \
             date = excluded.date, \
             matched_names = excluded.matched_names, \
             updated_at = CURRENT_TIMESTAMP",
    )
    .bind(&article.url)
    .bind(&article.title)
    .bind(&article.body)
    .bind(&article.date)
    .bind(&article.matched_names)
    .execute(pool)
    .await?;

    Ok(())
}
