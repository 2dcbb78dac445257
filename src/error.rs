use crate::models::Fallback;

#[derive(Debug, thiserror::Error)]
pub enum SphaeraError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("No market for ticker: {0}")]
    MissingTicker(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SphaeraError {
    /// The metric fallback a failed fetch degrades to.
    pub fn fallback(&self) -> Fallback {
        match self {
            SphaeraError::MissingTicker(_) => Fallback::MissingTicker,
            _ => Fallback::FetchFailure,
        }
    }
}

pub type Result<T> = std::result::Result<T, SphaeraError>;
