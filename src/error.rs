use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to fetch dataset: {0}")]
    Fetch(String),

    #[error("Failed to parse dataset: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a sanitized error message safe for logging
    /// Filters out raw payload fragments and request details
    pub fn log_safe(&self) -> String {
        match self {
            // Fetch failures may carry URLs with credentials in them
            Error::Fetch(_) => "Dataset fetch failed".to_string(),
            Error::Http(_) => "HTTP client setup failed".to_string(),

            // serde messages quote pieces of the payload
            Error::Parse(_) => "Dataset payload could not be decoded".to_string(),

            Error::Validation(msg) => format!("Validation error: {msg}"),
            Error::Cache(msg) => format!("Cache error: {msg}"),
            Error::InvalidUrl(_) => "Invalid URL provided".to_string(),
            Error::Io(_) => "File system operation failed".to_string(),
            Error::Config(msg) => format!("Configuration error: {msg}"),
        }
    }

    /// Whether the caller can re-prompt and carry on with the same session
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
