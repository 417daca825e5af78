use thiserror::Error;

/// Failures raised by the market data and universe providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected HTTP status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("API error [{code}]: {description}")]
    Api { code: String, description: String },
    #[error("no data returned for {0}")]
    NoData(String),
    #[error("invalid series: {0}")]
    InvalidSeries(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl ProviderError {
    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Request(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ProviderError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
