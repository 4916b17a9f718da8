use serde::Serialize;

/// Value of the `metodo` column.
pub const METHOD: &str = "lexico_v1";

/// Value of the `versao` column.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Polarity label shared by comment, article and final sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }

    /// Swap positive and negative; neutral stays neutral.
    #[must_use]
    pub fn invert(self) -> Self {
        match self {
            SentimentLabel::Positive => SentimentLabel::Negative,
            SentimentLabel::Negative => SentimentLabel::Positive,
            SentimentLabel::Neutral => SentimentLabel::Neutral,
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the targeted scorer for one text and one target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    /// Mean weighted polarity over `hits`; 0.0 when nothing hit.
    pub score: f64,
    /// In `[0.0, 1.0]`.
    pub confidence: f64,
    pub hits: usize,
    pub mentioned: bool,
}

/// A comment's declared position toward the article it answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Concorda,
    Discorda,
    Indefinido,
}

impl Stance {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Stance::Concorda => "concorda",
            Stance::Discorda => "discorda",
            Stance::Indefinido => "indefinido",
        }
    }
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StanceResult {
    pub references_article: bool,
    pub stance: Stance,
}

/// Which derivation rule produced a final label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// The comment names the person; its own sentiment is used.
    ComentarioDireto,
    /// The comment explicitly agrees or disagrees with the article.
    AlinhamentoNoticiaStance,
    /// The comment's tone is read relative to the article's tone.
    AlinhamentoNoticia,
    Indefinido,
}

impl Origin {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::ComentarioDireto => "comentario_direto",
            Origin::AlinhamentoNoticiaStance => "alinhamento_noticia_stance",
            Origin::AlinhamentoNoticia => "alinhamento_noticia",
            Origin::Indefinido => "indefinido",
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Derivation {
    pub label: SentimentLabel,
    pub confidence: f64,
    pub origin: Origin,
}

/// One row of the detailed report: a comment scored toward one person cited
/// in the comment's article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairSentiment {
    pub person_id: i64,
    pub person_name: String,
    pub comment_key: String,
    pub article_url: String,
    pub comment_timestamp: Option<String>,
    pub comment: SentimentResult,
    pub article: SentimentResult,
    pub stance: StanceResult,
    pub result: Derivation,
    pub method: &'static str,
    pub version: &'static str,
}

impl PairSentiment {
    /// Whether the comment names the person directly.
    #[must_use]
    pub fn mentioned(&self) -> bool {
        self.comment.mentioned
    }
}

/// Per-person fold of [`PairSentiment`] rows. Percentages are on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonAggregate {
    #[serde(rename = "id_pessoa")]
    pub person_id: i64,
    #[serde(rename = "nome_pessoa")]
    pub person_name: String,
    #[serde(rename = "qtd_total")]
    pub total: usize,
    #[serde(rename = "qtd_pos")]
    pub positive: usize,
    #[serde(rename = "qtd_neg")]
    pub negative: usize,
    #[serde(rename = "qtd_neu")]
    pub neutral: usize,
    #[serde(rename = "pct_pos")]
    pub pct_positive: f64,
    #[serde(rename = "pct_neg")]
    pub pct_negative: f64,
    #[serde(rename = "pct_neu")]
    pub pct_neutral: f64,
    #[serde(rename = "pct_mencao_direta")]
    pub pct_direct_mention: f64,
}
