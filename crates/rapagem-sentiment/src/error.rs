use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to move report into place: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("report path {path} has no file name")]
    InvalidReportPath { path: String },
}
