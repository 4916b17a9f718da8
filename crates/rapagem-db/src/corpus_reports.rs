//! Descriptive CSV-ready reports over the scraped corpus.
//!
//! Every selected column is cast to text in SQL so a report can be rendered
//! without knowing its shape; ordering uses the underlying numeric values.

use sqlx::{Row, SqlitePool};

use crate::DbError;

/// A named, fixed query over the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusReport {
    /// Selector used on the command line.
    pub name: &'static str,
    /// Output file name inside the reports directory.
    pub file_name: &'static str,
    pub columns: &'static [&'static str],
    query: &'static str,
}

/// Result of [`run_corpus_report`]: header plus stringly-typed rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub const CORPUS_REPORTS: &[CorpusReport] = &[
    CorpusReport {
        name: "articles",
        file_name: "artigos.csv",
        columns: &[
            "url",
            "data",
            "titulo",
            "citacoes",
            "tamanho_corpo",
            "qtd_comentarios",
            "raspado_em",
        ],
        query: "SELECT \
                    a.url, \
                    a.date, \
                    a.title, \
                    a.matched_names, \
                    CAST(LENGTH(COALESCE(a.body, '')) AS TEXT), \
                    CAST((SELECT COUNT(1) FROM comentarios c WHERE c.article_url = a.url) AS TEXT), \
                    CAST(a.scraped_at AS TEXT) \
                FROM artigos a \
                ORDER BY a.scraped_at DESC, a.url",
    },
    CorpusReport {
        name: "person_articles",
        file_name: "pessoa_artigos.csv",
        columns: &["id_pessoa", "nome_pessoa", "url", "data", "titulo", "raspado_em"],
        query: "SELECT \
                    CAST(p.id AS TEXT), \
                    p.name, \
                    a.url, \
                    a.date, \
                    a.title, \
                    CAST(a.scraped_at AS TEXT) \
                FROM artigos_pessoas ap \
                JOIN pessoas p ON p.id = ap.person_id \
                JOIN artigos a ON a.url = ap.article_url \
                ORDER BY p.name, p.id, a.scraped_at DESC, a.url",
    },
    CorpusReport {
        name: "people_rank",
        file_name: "ranking_pessoas.csv",
        columns: &["id_pessoa", "nome_pessoa", "qtd_artigos"],
        query: "SELECT \
                    CAST(p.id AS TEXT), \
                    p.name, \
                    CAST(COUNT(ap.article_url) AS TEXT) \
                FROM pessoas p \
                LEFT JOIN artigos_pessoas ap ON ap.person_id = p.id \
                GROUP BY p.id, p.name \
                ORDER BY COUNT(ap.article_url) DESC, p.name, p.id",
    },
    CorpusReport {
        name: "co_mentions",
        file_name: "co_citacoes.csv",
        columns: &["pessoa_a", "pessoa_b", "qtd_artigos_juntos"],
        query: "SELECT \
                    p1.name, \
                    p2.name, \
                    CAST(COUNT(*) AS TEXT) \
                FROM artigos_pessoas ap1 \
                JOIN artigos_pessoas ap2 \
                  ON ap1.article_url = ap2.article_url \
                 AND ap1.person_id < ap2.person_id \
                JOIN pessoas p1 ON p1.id = ap1.person_id \
                JOIN pessoas p2 ON p2.id = ap2.person_id \
                GROUP BY p1.id, p2.id \
                ORDER BY COUNT(*) DESC, p1.name, p2.name",
    },
    CorpusReport {
        name: "comments_summary",
        file_name: "resumo_comentarios.csv",
        columns: &["url", "titulo", "data", "qtd_comentarios"],
        query: "SELECT \
                    a.url, \
                    a.title, \
                    a.date, \
                    CAST(COUNT(c.comment_key) AS TEXT) \
                FROM artigos a \
                LEFT JOIN comentarios c ON c.article_url = a.url \
                GROUP BY a.url, a.title, a.date \
                ORDER BY COUNT(c.comment_key) DESC, a.title, a.url",
    },
    CorpusReport {
        name: "top_commenters",
        file_name: "top_comentadores.csv",
        columns: &["autor", "qtd_comentarios"],
        query: "SELECT \
                    TRIM(COALESCE(author, '')), \
                    CAST(COUNT(*) AS TEXT) \
                FROM comentarios \
                WHERE TRIM(COALESCE(author, '')) <> '' \
                GROUP BY TRIM(COALESCE(author, '')) \
                ORDER BY COUNT(*) DESC, TRIM(COALESCE(author, ''))",
    },
    CorpusReport {
        name: "timeline_person_month",
        file_name: "linha_tempo_pessoa_mes.csv",
        columns: &["mes", "nome_pessoa", "qtd_artigos"],
        query: "SELECT \
                    strftime('%Y-%m', a.scraped_at), \
                    p.name, \
                    CAST(COUNT(*) AS TEXT) \
                FROM artigos a \
                JOIN artigos_pessoas ap ON ap.article_url = a.url \
                JOIN pessoas p ON p.id = ap.person_id \
                GROUP BY strftime('%Y-%m', a.scraped_at), p.name \
                ORDER BY strftime('%Y-%m', a.scraped_at), p.name",
    },
    CorpusReport {
        name: "comments_per_person",
        file_name: "comentarios_por_pessoa.csv",
        columns: &["id_pessoa", "nome_pessoa", "qtd_comentarios"],
        query: "SELECT \
                    CAST(p.id AS TEXT), \
                    p.name, \
                    CAST(COUNT(c.comment_key) AS TEXT) \
                FROM pessoas p \
                LEFT JOIN artigos_pessoas ap ON ap.person_id = p.id \
                LEFT JOIN comentarios c ON c.article_url = ap.article_url \
                GROUP BY p.id, p.name \
                ORDER BY COUNT(c.comment_key) DESC, p.name, p.id",
    },
];

/// Look up a report by its selector name.
#[must_use]
pub fn find_corpus_report(name: &str) -> Option<&'static CorpusReport> {
    CORPUS_REPORTS.iter().find(|r| r.name == name)
}

/// Run one report. SQL `NULL`s become empty cells.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails or a column cannot be read
/// as text.
pub async fn run_corpus_report(
    pool: &SqlitePool,
    report: &CorpusReport,
) -> Result<ReportTable, DbError> {
    let rows = sqlx::query(report.query).fetch_all(pool).await?;

    let mut out = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut cells = Vec::with_capacity(report.columns.len());
        for idx in 0..report.columns.len() {
            let cell: Option<String> = row.try_get(idx)?;
            cells.push(cell.unwrap_or_default());
        }
        out.push(cells);
    }

    tracing::debug!(report = report.name, rows = out.len(), "ran corpus report");

    Ok(ReportTable {
        columns: report.columns.iter().map(ToString::to_string).collect(),
        rows: out,
    })
}
