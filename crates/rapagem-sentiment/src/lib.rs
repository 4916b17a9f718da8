//! Targeted sentiment for reader comments on news articles.
//!
//! Scores each (comment, cited person) pair with a PT-BR lexicon, falls back
//! to the article's own tone toward the person when the comment does not name
//! them, and folds the per-pair labels into per-person statistics.

pub mod aggregate;
pub mod derive;
pub mod error;
pub mod lexicon;
pub mod pipeline;
pub mod report;
pub mod scorer;
pub mod stance;
pub mod types;

pub use aggregate::{aggregate_all, aggregate_person};
pub use derive::{derive_final, PairContext};
pub use error::SentimentError;
pub use lexicon::Lexicon;
pub use pipeline::{build_pair_sentiments, run_sentiment, SentimentRun};
pub use report::{write_reports, ReportPaths};
pub use scorer::score_targeted;
pub use stance::classify_stance;
pub use types::{
    Derivation, Origin, PairSentiment, PersonAggregate, SentimentLabel, SentimentResult, Stance,
    StanceResult, METHOD,
};
