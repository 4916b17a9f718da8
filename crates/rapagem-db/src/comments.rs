//! Database operations for the `comentarios` table.

use rapagem_core::{comment_key, Comment};
use sqlx::SqlitePool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `comentarios` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRow {
    pub comment_key: String,
    pub article_url: String,
    pub comment_id: Option<String>,
    pub author: Option<String>,
    /// Timestamp as displayed on the page ("há 2 horas").
    pub time_text: Option<String>,
    /// Machine-readable timestamp when the page exposes one.
    pub time_iso: Option<String>,
    pub content: Option<String>,
    pub permalink: Option<String>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            comment_key: row.comment_key,
            article_url: row.article_url,
            author: row.author,
            text: row.content.unwrap_or_default(),
            timestamp: row.time_iso.or(row.time_text),
        }
    }
}

/// Fields written by [`upsert_comment`].
#[derive(Debug, Clone, Default)]
pub struct NewComment {
    pub article_url: String,
    pub comment_id: Option<String>,
    pub author: Option<String>,
    pub time_text: Option<String>,
    pub time_iso: Option<String>,
    pub content: Option<String>,
    pub permalink: Option<String>,
}

impl NewComment {
    /// The key this comment is stored under.
    #[must_use]
    pub fn key(&self) -> String {
        comment_key(
            self.comment_id.as_deref(),
            self.permalink.as_deref(),
            &self.article_url,
            self.content.as_deref().unwrap_or_default(),
        )
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns all comments ordered by article URL then comment key.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_comments<'e, E>(executor: E) -> Result<Vec<CommentRow>, DbError>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, CommentRow>(
        "SELECT comment_key, article_url, comment_id, author, time_text, time_iso, \
                content, permalink \
         FROM comentarios \
         ORDER BY article_url, comment_key",
    )
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

/// Insert a comment or refresh it if its key already exists. Returns the key.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the statement fails (including a foreign-key
/// violation for an unknown article).
pub async fn upsert_comment(pool: &SqlitePool, comment: &NewComment) -> Result<String, DbError> {
    let key = comment.key();

    sqlx::query(
        "INSERT INTO comentarios \
             (comment_key, article_url, comment_id, author, time_text, time_iso, content, permalink) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         ON CONFLICT(comment_key) DO UPDATE SET \
             article_url = excluded.article_url, \
             comment_id = excluded.comment_id, \
             author = excluded.author, \
             time_text = excluded.time_text, \
             time_iso = excluded.time_iso, \
             content = excluded.content, \
             permalink = excluded.permalink, \
             updated_at = CURRENT_TIMESTAMP",
    )
    .bind(&key)
    .bind(&comment.article_url)
    .bind(&comment.comment_id)
    .bind(&comment.author)
    .bind(&comment.time_text)
    .bind(&comment.time_iso)
    .bind(&comment.content)
    .bind(&comment.permalink)
    .execute(pool)
    .await?;

    Ok(key)
}
