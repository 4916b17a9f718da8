//! Store tests against a fresh, fully-migrated SQLite file per test.

use rapagem_db::{
    connect_pool, find_corpus_report, link_article_person, list_persons, load_corpus, ping,
    run_corpus_report, run_migrations, upsert_article, upsert_comment, upsert_person, DbError,
    NewArticle, NewComment, PoolConfig, CORPUS_REPORTS,
};
use sqlx::SqlitePool;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn database_url(dir: &TempDir) -> String {
    format!("sqlite://{}", dir.path().join("rapagem.db").display())
}

/// Create a migrated database; the `TempDir` must outlive the pool.
async fn fresh_pool() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let pool = connect_pool(&database_url(&dir), PoolConfig::default())
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    (dir, pool)
}

async fn insert_article(pool: &SqlitePool, url: &str, title: &str) {
    upsert_article(
        pool,
        &NewArticle {
            url: url.to_string(),
            title: Some(title.to_string()),
            body: Some(format!("{title} corpo")),
            ..NewArticle::default()
        },
    )
    .await
    .unwrap();
}

async fn insert_comment(pool: &SqlitePool, url: &str, id: &str, author: Option<&str>) {
    upsert_comment(
        pool,
        &NewComment {
            article_url: url.to_string(),
            comment_id: Some(id.to_string()),
            author: author.map(str::to_string),
            content: Some(format!("comentario {id}")),
            ..NewComment::default()
        },
    )
    .await
    .unwrap();
}

/// Two articles, three persons (one never cited), three comments.
async fn seed(pool: &SqlitePool) -> (i64, i64, i64) {
    insert_article(pool, "https://n.example/a1", "Primeira").await;
    insert_article(pool, "https://n.example/a2", "Segunda").await;

    let ana = upsert_person(pool, "Ana Souza").await.unwrap();
    let bruno = upsert_person(pool, "Bruno Lima").await.unwrap();
    let carla = upsert_person(pool, "Carla Dias").await.unwrap();

    link_article_person(pool, "https://n.example/a1", ana).await.unwrap();
    link_article_person(pool, "https://n.example/a1", bruno).await.unwrap();
    link_article_person(pool, "https://n.example/a2", ana).await.unwrap();

    insert_comment(pool, "https://n.example/a1", "c1", Some("  Zé ")).await;
    insert_comment(pool, "https://n.example/a1", "c2", Some("Zé")).await;
    insert_comment(pool, "https://n.example/a2", "c3", None).await;

    (ana, bruno, carla)
}

async fn report_rows(pool: &SqlitePool, name: &str) -> Vec<Vec<String>> {
    let report = find_corpus_report(name).unwrap();
    run_corpus_report(pool, report).await.unwrap().rows
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(ToString::to_string).collect()
}

// ---------------------------------------------------------------------------
// Pool and migrations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn migrations_apply_once() {
    let dir = tempfile::tempdir().unwrap();
    let pool = connect_pool(&database_url(&dir), PoolConfig::default())
        .await
        .unwrap();

    assert_eq!(run_migrations(&pool).await.unwrap(), 1);
    assert_eq!(run_migrations(&pool).await.unwrap(), 0);
    ping(&pool).await.unwrap();
}

#[tokio::test]
async fn read_only_pool_does_not_create_missing_database() {
    let dir = tempfile::tempdir().unwrap();
    let result = connect_pool(&database_url(&dir), PoolConfig::default().read_only()).await;

    assert!(result.is_err());
    assert!(!dir.path().join("rapagem.db").exists());
}

#[tokio::test]
async fn read_only_pool_reads_but_rejects_writes() {
    let (dir, pool) = fresh_pool().await;
    seed(&pool).await;
    pool.close().await;

    let ro = connect_pool(&database_url(&dir), PoolConfig::default().read_only())
        .await
        .unwrap();
    let corpus = load_corpus(&ro).await.unwrap();
    assert_eq!(corpus.articles.len(), 2);

    let err = upsert_person(&ro, "Nova Pessoa").await.unwrap_err();
    assert!(matches!(err, DbError::Sqlx(_)));
}

// ---------------------------------------------------------------------------
// Ingest helpers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upsert_person_dedups_on_normalized_name() {
    let (_dir, pool) = fresh_pool().await;

    let first = upsert_person(&pool, "João Silva").await.unwrap();
    let second = upsert_person(&pool, "  JOAO SILVA ").await.unwrap();
    assert_eq!(first, second);

    let persons = list_persons(&pool).await.unwrap();
    assert_eq!(persons.len(), 1);
    assert_eq!(persons[0].name, "JOAO SILVA");
    assert_eq!(persons[0].name_norm, "joao silva");
}

#[tokio::test]
async fn upsert_person_rejects_blank_name() {
    let (_dir, pool) = fresh_pool().await;

    let err = upsert_person(&pool, "   ").await.unwrap_err();
    assert!(matches!(err, DbError::InvalidInput(_)));
}

#[tokio::test]
async fn link_to_unknown_article_violates_foreign_key() {
    let (_dir, pool) = fresh_pool().await;
    let id = upsert_person(&pool, "Ana").await.unwrap();

    let result = link_article_person(&pool, "https://n.example/missing", id).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn link_article_person_is_idempotent() {
    let (_dir, pool) = fresh_pool().await;
    insert_article(&pool, "https://n.example/a1", "T").await;
    let id = upsert_person(&pool, "Ana").await.unwrap();

    link_article_person(&pool, "https://n.example/a1", id).await.unwrap();
    link_article_person(&pool, "https://n.example/a1", id).await.unwrap();

    assert_eq!(load_corpus(&pool).await.unwrap().links.len(), 1);
}

#[tokio::test]
async fn upsert_comment_updates_existing_key() {
    let (_dir, pool) = fresh_pool().await;
    insert_article(&pool, "https://n.example/a1", "T").await;

    let mut comment = NewComment {
        article_url: "https://n.example/a1".to_string(),
        permalink: Some("https://n.example/a1#c1".to_string()),
        time_text: Some("ontem".to_string()),
        content: Some("primeira versao".to_string()),
        ..NewComment::default()
    };
    let key = upsert_comment(&pool, &comment).await.unwrap();
    assert_eq!(key, "https://n.example/a1#c1");

    comment.content = Some("editado".to_string());
    comment.time_iso = Some("2024-05-01T12:00:00Z".to_string());
    upsert_comment(&pool, &comment).await.unwrap();

    let corpus = load_corpus(&pool).await.unwrap();
    assert_eq!(corpus.comments.len(), 1);
    assert_eq!(corpus.comments[0].text, "editado");
    assert_eq!(
        corpus.comments[0].timestamp.as_deref(),
        Some("2024-05-01T12:00:00Z")
    );
}

// ---------------------------------------------------------------------------
// load_corpus
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_corpus_returns_every_collection_in_order() {
    let (_dir, pool) = fresh_pool().await;
    let (ana, bruno, carla) = seed(&pool).await;

    let corpus = load_corpus(&pool).await.unwrap();

    let urls: Vec<_> = corpus.articles.iter().map(|a| a.url.as_str()).collect();
    assert_eq!(urls, ["https://n.example/a1", "https://n.example/a2"]);
    assert_eq!(corpus.articles[0].title, "Primeira");

    let ids: Vec<_> = corpus.persons.iter().map(|p| p.id).collect();
    assert_eq!(ids, [ana, bruno, carla]);

    let links: Vec<_> = corpus
        .links
        .iter()
        .map(|l| (l.article_url.as_str(), l.person_id))
        .collect();
    assert_eq!(
        links,
        [
            ("https://n.example/a1", ana),
            ("https://n.example/a1", bruno),
            ("https://n.example/a2", ana),
        ]
    );

    let keys: Vec<_> = corpus.comments.iter().map(|c| c.comment_key.as_str()).collect();
    assert_eq!(keys, ["c1", "c2", "c3"]);
    assert_eq!(corpus.comments[2].author, None);
}

#[tokio::test]
async fn load_corpus_on_empty_store_is_empty() {
    let (_dir, pool) = fresh_pool().await;

    let corpus = load_corpus(&pool).await.unwrap();
    assert!(corpus.articles.is_empty());
    assert!(corpus.persons.is_empty());
    assert!(corpus.links.is_empty());
    assert!(corpus.comments.is_empty());
}

// ---------------------------------------------------------------------------
// Corpus reports
// ---------------------------------------------------------------------------

#[tokio::test]
async fn every_report_runs_on_empty_store() {
    let (_dir, pool) = fresh_pool().await;

    for report in CORPUS_REPORTS {
        let table = run_corpus_report(&pool, report).await.unwrap();
        assert_eq!(table.columns.len(), report.columns.len());
        assert!(table.rows.is_empty(), "{} returned rows", report.name);
    }
}

#[tokio::test]
async fn every_report_row_matches_its_header_width() {
    let (_dir, pool) = fresh_pool().await;
    seed(&pool).await;

    for report in CORPUS_REPORTS {
        let table = run_corpus_report(&pool, report).await.unwrap();
        for cells in &table.rows {
            assert_eq!(cells.len(), table.columns.len(), "{}", report.name);
        }
    }
}

#[tokio::test]
async fn people_rank_includes_uncited_persons() {
    let (_dir, pool) = fresh_pool().await;
    let (ana, bruno, carla) = seed(&pool).await;

    assert_eq!(
        report_rows(&pool, "people_rank").await,
        vec![
            row(&[ana.to_string().as_str(), "Ana Souza", "2"]),
            row(&[bruno.to_string().as_str(), "Bruno Lima", "1"]),
            row(&[carla.to_string().as_str(), "Carla Dias", "0"]),
        ]
    );
}

#[tokio::test]
async fn co_mentions_pairs_each_couple_once() {
    let (_dir, pool) = fresh_pool().await;
    seed(&pool).await;

    assert_eq!(
        report_rows(&pool, "co_mentions").await,
        vec![row(&["Ana Souza", "Bruno Lima", "1"])]
    );
}

#[tokio::test]
async fn top_commenters_trims_and_skips_anonymous() {
    let (_dir, pool) = fresh_pool().await;
    seed(&pool).await;

    assert_eq!(
        report_rows(&pool, "top_commenters").await,
        vec![row(&["Zé", "2"])]
    );
}

#[tokio::test]
async fn comments_per_person_counts_comments_on_citing_articles() {
    let (_dir, pool) = fresh_pool().await;
    let (ana, bruno, carla) = seed(&pool).await;

    assert_eq!(
        report_rows(&pool, "comments_per_person").await,
        vec![
            row(&[ana.to_string().as_str(), "Ana Souza", "3"]),
            row(&[bruno.to_string().as_str(), "Bruno Lima", "2"]),
            row(&[carla.to_string().as_str(), "Carla Dias", "0"]),
        ]
    );
}

#[tokio::test]
async fn comments_summary_orders_by_count() {
    let (_dir, pool) = fresh_pool().await;
    seed(&pool).await;

    assert_eq!(
        report_rows(&pool, "comments_summary").await,
        vec![
            row(&["https://n.example/a1", "Primeira", "", "2"]),
            row(&["https://n.example/a2", "Segunda", "", "1"]),
        ]
    );
}

#[tokio::test]
async fn articles_report_counts_body_and_comments() {
    let (_dir, pool) = fresh_pool().await;
    seed(&pool).await;

    let mut rows = report_rows(&pool, "articles").await;
    rows.sort();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "https://n.example/a1");
    assert_eq!(rows[0][4], "Primeira corpo".len().to_string());
    assert_eq!(rows[0][5], "2");
    assert_eq!(rows[1][5], "1");
}
