use thiserror::Error;

/// Application-wide error types for novella.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// HTTP request failed or returned a non-2xx status.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// A link could not be turned into an absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The source URL does not belong to a supported site.
    #[error("Unsupported site: {0} (only faloo.com and qidian.com are supported)")]
    UnsupportedSite(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Writing a chapter, summary, or log file failed.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::IoError(e.to_string())
    }
}
