use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("API error: {message}")]
    Api { code: Option<i64>, message: String },

    #[error("Unexpected data from exchange: {0}")]
    UnexpectedData(String),
}

#[derive(Debug, Error)]
pub enum TimeError {
    #[error("invalid date {input:?}, expected YYYY-MM-DD: {source}")]
    InvalidDate {
        input: String,
        source: chrono::ParseError,
    },

    #[error("timestamp {0} ms is out of range")]
    OutOfRange(i64),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
