use chrono::{TimeZone, Utc};
use rapagem_core::{Article, ArticlePersonLink, Comment, Corpus, Person};

use super::*;
use crate::lexicon::Lexicon;
use crate::pipeline::run_sentiment;

fn corpus() -> Corpus {
    let url = "https://noticias.example/a1";
    Corpus {
        articles: vec![Article {
            url: url.to_string(),
            date: None,
            title: "Silva, o corrupto".to_string(),
            body: "Silva enganou todos.".to_string(),
            scraped_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }],
        persons: vec![
            Person {
                id: 7,
                name: "João Silva".to_string(),
            },
            Person {
                id: 8,
                name: "Sem, Vírgula".to_string(),
            },
        ],
        links: vec![ArticlePersonLink {
            article_url: url.to_string(),
            person_id: 7,
        }],
        comments: vec![
            Comment {
                comment_key: "k1".to_string(),
                article_url: url.to_string(),
                author: None,
                text: "concordo com a matéria, ele é péssimo mesmo".to_string(),
                timestamp: Some("2024-01-01T10:00:00Z".to_string()),
            },
            Comment {
                comment_key: "k2".to_string(),
                article_url: url.to_string(),
                author: None,
                text: "Silva é muito bom".to_string(),
                timestamp: None,
            },
        ],
    }
}

fn render(run: &SentimentRun) -> (String, String) {
    let mut detailed = Vec::new();
    write_detailed(&mut detailed, &run.pairs).unwrap();
    let mut aggregate = Vec::new();
    write_aggregate(&mut aggregate, &run.aggregates).unwrap();
    (
        String::from_utf8(detailed).unwrap(),
        String::from_utf8(aggregate).unwrap(),
    )
}

#[test]
fn detailed_header_is_exact() {
    let (detailed, _) = render(&run_sentiment(&Lexicon::pt_br(), &corpus()));
    let header = detailed.lines().next().unwrap();
    assert_eq!(
        header,
        "id_pessoa,nome_pessoa,comment_key,artigo_url,data_comentario,\
         comentario_sentimento,comentario_score,comentario_confianca,comentario_hits,\
         alvo_mencionado,referencia_materia,stance_noticia,noticia_sentimento,noticia_score,\
         noticia_confianca,noticia_hits,sentimento_final,confianca_final,origem,metodo,versao"
    );
}

#[test]
fn aggregate_header_is_exact() {
    let (_, aggregate) = render(&run_sentiment(&Lexicon::pt_br(), &corpus()));
    assert_eq!(
        aggregate.lines().next().unwrap(),
        "id_pessoa,nome_pessoa,qtd_total,qtd_pos,qtd_neg,qtd_neu,pct_pos,pct_neg,pct_neu,pct_mencao_direta"
    );
}

#[test]
fn detailed_rows_encode_values() {
    let (detailed, _) = render(&run_sentiment(&Lexicon::pt_br(), &corpus()));
    let lines: Vec<&str> = detailed.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[1],
        "7,João Silva,k1,https://noticias.example/a1,2024-01-01T10:00:00Z,\
         negative,-2.0000,1.000,1,0,1,concorda,negative,-2.0000,1.000,2,\
         negative,1.000,alinhamento_noticia_stance,lexico_v1,0.1.0"
    );
    assert_eq!(
        lines[2],
        "7,João Silva,k2,https://noticias.example/a1,,\
         positive,1.5000,1.000,1,1,0,indefinido,negative,-2.0000,1.000,2,\
         positive,1.000,comentario_direto,lexico_v1,0.1.0"
    );
}

#[test]
fn aggregate_rows_encode_percentages_and_quote_names() {
    let (_, aggregate) = render(&run_sentiment(&Lexicon::pt_br(), &corpus()));
    let lines: Vec<&str> = aggregate.lines().collect();
    assert_eq!(lines[1], "7,João Silva,2,1,1,0,50.00,50.00,0.00,50.00");
    assert_eq!(lines[2], "8,\"Sem, Vírgula\",0,0,0,0,0.00,0.00,0.00,0.00");
}

#[test]
fn rendering_is_byte_identical_across_runs() {
    let first = render(&run_sentiment(&Lexicon::pt_br(), &corpus()));
    let second = render(&run_sentiment(&Lexicon::pt_br(), &corpus()));
    assert_eq!(first, second);
}

#[test]
fn write_reports_creates_directory_and_files() {
    let dir = tempfile::tempdir().unwrap();
    let detailed = dir.path().join("out/detalhado.csv");
    let aggregate = dir.path().join("out/agregado.csv");
    let run = run_sentiment(&Lexicon::pt_br(), &corpus());

    let paths = write_reports(&run, &detailed, &aggregate).unwrap();
    assert_eq!(paths.detailed, detailed);
    assert_eq!(paths.aggregate, aggregate);

    let (expected_detailed, expected_aggregate) = render(&run);
    assert_eq!(fs::read_to_string(&detailed).unwrap(), expected_detailed);
    assert_eq!(fs::read_to_string(&aggregate).unwrap(), expected_aggregate);

    // Only the two reports remain; no temp files left behind.
    let entries = fs::read_dir(dir.path().join("out")).unwrap().count();
    assert_eq!(entries, 2);
}

#[test]
fn failed_fill_keeps_previous_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("r.csv");
    fs::write(&path, "old").unwrap();

    let result = write_atomic(&path, |f| {
        f.write_all(b"partial")?;
        Err(SentimentError::Io(std::io::Error::other("boom")))
    });
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "old");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn failed_aggregate_keeps_previous_detailed_report() {
    let dir = tempfile::tempdir().unwrap();
    let detailed = dir.path().join("detalhado.csv");
    fs::write(&detailed, "old").unwrap();
    // A regular file where the aggregate's directory should be.
    let blocker = dir.path().join("bloqueio");
    fs::write(&blocker, "").unwrap();
    let aggregate = blocker.join("agregado.csv");

    let run = run_sentiment(&Lexicon::pt_br(), &corpus());
    assert!(write_reports(&run, &detailed, &aggregate).is_err());

    assert_eq!(fs::read_to_string(&detailed).unwrap(), "old");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn markdown_summary_has_one_row_per_person() {
    let run = run_sentiment(&Lexicon::pt_br(), &corpus());
    let md = render_markdown_summary(&run.aggregates);
    let lines: Vec<&str> = md.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("| João Silva | 2 | 1 | 1 | 0 | 50.00"));
}
