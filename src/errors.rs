use thiserror::Error;

#[derive(Error, Debug)]
pub enum BreadthError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Provider error [{code}]: {description}")]
    ProviderError { code: String, description: String },

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to fetch market data: {0}")]
    FetchFailure(String),

    #[error("Insufficient history: no date has every moving average defined ({fetched_days} trading days fetched)")]
    InsufficientHistory { fetched_days: usize },

    #[error("Symbol universe is empty")]
    EmptyUniverse,
}

impl BreadthError {
    /// Short advice shown in the dashboard warning state.
    pub fn user_hint(&self) -> &'static str {
        match self {
            BreadthError::InsufficientHistory { .. } => {
                "Not enough history for the longest moving average. Widen the date range."
            }
            BreadthError::EmptyUniverse => "No symbols are being tracked. Check the ticker lists.",
            BreadthError::ConfigError(_) => "Adjust the parameters and try again.",
            _ => "Market data could not be loaded. Try refreshing.",
        }
    }

    /// Fold any error raised at the fetch boundary into a single `FetchFailure`.
    pub fn into_fetch_failure(self) -> Self {
        match self {
            e @ BreadthError::FetchFailure(_) => e,
            other => BreadthError::FetchFailure(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BreadthError>;
