//! Database operations for `pessoas` and `artigos_pessoas`.

use rapagem_core::{normalize, ArticlePersonLink, Person};
use sqlx::SqlitePool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `pessoas` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PersonRow {
    pub id: i64,
    pub name: String,
    /// Case- and accent-folded name; unique.
    pub name_norm: String,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Person {
            id: row.id,
            name: row.name,
        }
    }
}

/// A row from the `artigos_pessoas` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArticlePersonRow {
    pub article_url: String,
    pub person_id: i64,
}

impl From<ArticlePersonRow> for ArticlePersonLink {
    fn from(row: ArticlePersonRow) -> Self {
        ArticlePersonLink {
            article_url: row.article_url,
            person_id: row.person_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns all persons ordered by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_persons<'e, E>(executor: E) -> Result<Vec<PersonRow>, DbError>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, PersonRow>(
        "SELECT id, name, name_norm FROM pessoas ORDER BY id",
    )
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

/// Returns every article/person citation ordered by article URL then person id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_article_person_links<'e, E>(
    executor: E,
) -> Result<Vec<ArticlePersonRow>, DbError>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, ArticlePersonRow>(
        "SELECT article_url, person_id FROM artigos_pessoas ORDER BY article_url, person_id",
    )
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

/// Insert a person, deduplicating on the normalized name, and return its id.
///
/// A later spelling of the same name (different case or accents) replaces the
/// stored display name.
///
/// # Errors
///
/// Returns [`DbError::InvalidInput`] for a blank name, or [`DbError::Sqlx`]
/// if the statement fails.
pub async fn upsert_person(pool: &SqlitePool, name: &str) -> Result<i64, DbError> {
    let name = name.trim();
    let name_norm = normalize(name);
    if name_norm.is_empty() {
        return Err(DbError::InvalidInput("person name must be non-empty".to_string()));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO pessoas (name, name_norm) \
         VALUES ($1, $2) \
         ON CONFLICT(name_norm) DO UPDATE SET \
             name = excluded.name, \
             updated_at = CURRENT_TIMESTAMP \
         RETURNING id",
    )
    .bind(name)
    .bind(&name_norm)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Record that `person_id` is cited in `article_url`. Idempotent.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including foreign-key
/// violations for unknown articles or persons).
pub async fn link_article_person(
    pool: &SqlitePool,
    article_url: &str,
    person_id: i64,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT OR IGNORE INTO artigos_pessoas (article_url, person_id) VALUES ($1, $2)",
    )
    .bind(article_url)
    .bind(person_id)
    .execute(pool)
    .await?;

    Ok(())
}
