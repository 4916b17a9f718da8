//! Shared domain records, text normalization and configuration for rapagem.

pub mod app_config;
pub mod config;
pub mod lexicon_file;
pub mod records;
pub mod text;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use lexicon_file::{load_lexicon_file, parse_lexicon_file, LexiconFile};
pub use records::{Article, ArticlePersonLink, Comment, Corpus, Person};
pub use text::{comment_key, normalize, strip_accents, tokenize, TargetNames};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read lexicon file {path}: {source}")]
    LexiconFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse lexicon file: {0}")]
    LexiconFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
