//! Bulk read of everything the sentiment pipeline consumes.

use rapagem_core::Corpus;
use sqlx::SqlitePool;

use crate::{articles, comments, persons, DbError};

/// Load articles, persons, citations and comments in one read transaction.
///
/// All four collections come from the same snapshot, so a concurrent ingest
/// cannot produce comments for an article the caller never sees.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any of the reads fails. A partial corpus is
/// never returned.
pub async fn load_corpus(pool: &SqlitePool) -> Result<Corpus, DbError> {
    let mut tx = pool.begin().await?;

    let articles = articles::list_articles(&mut *tx).await?;
    let persons = persons::list_persons(&mut *tx).await?;
    let links = persons::list_article_person_links(&mut *tx).await?;
    let comments = comments::list_comments(&mut *tx).await?;

    tx.commit().await?;

    let corpus = Corpus {
        articles: articles.into_iter().map(Into::into).collect(),
        persons: persons.into_iter().map(Into::into).collect(),
        links: links.into_iter().map(Into::into).collect(),
        comments: comments.into_iter().map(Into::into).collect(),
    };

    tracing::info!(
        articles = corpus.articles.len(),
        persons = corpus.persons.len(),
        links = corpus.links.len(),
        comments = corpus.comments.len(),
        "loaded corpus"
    );

    Ok(corpus)
}
